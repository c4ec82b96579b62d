use std::time::Instant;

use chrono::{DateTime, NaiveDateTime};
use rusqlite::{params, OptionalExtension, Row};
use tokio::sync::{
    mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender},
    oneshot,
};

use crate::templates::models::{Board, OwnPost, Post, Topic, TopicOverview};

mod queries;

fn datetime(secs: i64) -> NaiveDateTime {
    DateTime::from_timestamp(secs, 0).map_or(NaiveDateTime::MIN, |dt| dt.naive_utc())
}

fn post_from_row(r: &Row) -> rusqlite::Result<Post> {
    Ok(Post {
        id: r.get(0)?,
        topic: r.get(1)?,
        message: r.get(2)?,
        created_by: r.get(3)?,
        created_at: datetime(r.get(4)?),
        updated_by: r.get(5)?,
        updated_at: r.get::<_, Option<i64>>(6)?.map(datetime),
    })
}

macro_rules! generate_executor {
    ($($task:ident / $fn:ident, ($db:ident $(, $arg:ident: $ty:ty)*) => $ret:ty $handler:block)*) => {
        #[derive(Clone)]
        pub struct ExecutorConnection(UnboundedSender<Task>);

        #[derive(Debug)]
        enum Task {
            $($task{tx:oneshot::Sender<$ret>,$($arg:$ty,)*}),*
        }

        impl ExecutorConnection {
            $(pub async fn $fn(&self, $($arg: $ty),*) -> $ret {
                let (tx, rx) = oneshot::channel();
                self.0.send(Task::$task{tx,$($arg),*}).unwrap();
                rx.await.unwrap()
            })*
        }

        pub struct DbExecutor {
            rx: UnboundedReceiver<Task>,
            db: rusqlite::Connection,
        }

        impl DbExecutor {
            pub fn create(dbpath: &str) -> rusqlite::Result<(Self, ExecutorConnection)> {
                let (tx, rx) = unbounded_channel();
                let db = rusqlite::Connection::open(dbpath)?;
                db.execute_batch(include_str!("schema.sql"))?;
                tracing::info!("Database connected ({})", dbpath);
                Ok((Self { rx, db }, ExecutorConnection(tx)))
            }

            pub fn run(mut self) {
                while let Some(task) = self.rx.blocking_recv() {
                    let before = Instant::now();
                    tracing::debug!("received task {:?}", task);
                    match task {
                        $(Task::$task{tx,$($arg),*} => {
                            let $db = &mut self.db;
                            let _e = tx.send((||$handler)());
                        })*
                    }
                    tracing::debug!("task took {}ms", before.elapsed().as_secs_f64() * 1000.0);
                }
            }
        }
    };
}

generate_executor! {
    GetBoards / get_boards, (db) => rusqlite::Result<Vec<Board>> {
        let mut stmt = db.prepare_cached(queries::SELECT_BOARDS)?;
        let rows = stmt.query_map([], |r| {
            Ok(Board { id: r.get(0)?, name: r.get(1)?, description: r.get(2)? })
        })?;
        rows.collect()
    }
    GetBoard / get_board, (db, board: i64) => rusqlite::Result<Option<Board>> {
        db.query_row(queries::SELECT_BOARD, [board], |r| {
            Ok(Board { id: r.get(0)?, name: r.get(1)?, description: r.get(2)? })
        })
        .optional()
    }
    GetTopic / get_topic, (db, board: i64, topic: i64) => rusqlite::Result<Option<Topic>> {
        db.query_row(queries::SELECT_TOPIC, params![board, topic], |r| {
            Ok(Topic {
                id: r.get(0)?,
                board: r.get(1)?,
                board_name: r.get(2)?,
                title: r.get(3)?,
                starter: r.get(4)?,
                created_at: datetime(r.get(5)?),
                last_updated: datetime(r.get(6)?),
                views: r.get(7)?,
            })
        })
        .optional()
    }
    CountTopics / count_topics, (db, board: i64) => rusqlite::Result<usize> {
        let total: i64 = db.query_row(queries::COUNT_TOPICS, [board], |r| r.get(0))?;
        Ok(total as usize)
    }
    TopicsPage / topics_page, (db, board: i64, offset: usize, limit: usize) => rusqlite::Result<Vec<TopicOverview>> {
        let mut stmt = db.prepare_cached(queries::SELECT_TOPICS_PAGE)?;
        let rows = stmt.query_map(params![board, limit as i64, offset as i64], |r| {
            Ok(TopicOverview {
                id: r.get(0)?,
                title: r.get(1)?,
                starter: r.get(2)?,
                last_updated: datetime(r.get(3)?),
                views: r.get(4)?,
                replies: r.get(5)?,
            })
        })?;
        rows.collect()
    }
    // A topic and its opening post are created in one transaction, so every
    // topic always has at least one post.
    CreateTopic / create_topic, (db, board: i64, starter: String, title: String, message: String, now: i64) => rusqlite::Result<i64> {
        let tx = db.transaction()?;
        tx.prepare_cached(queries::INSERT_TOPIC)?
            .execute(params![board, title, starter, now, now])?;
        let topic_id = tx.last_insert_rowid();
        tx.prepare_cached(queries::INSERT_POST)?
            .execute(params![topic_id, message, starter, now])?;
        tx.commit()?;
        Ok(topic_id)
    }
    CountPosts / count_posts, (db, topic: i64) => rusqlite::Result<usize> {
        let total: i64 = db.query_row(queries::COUNT_POSTS, [topic], |r| r.get(0))?;
        Ok(total as usize)
    }
    PostsPage / posts_page, (db, topic: i64, offset: usize, limit: usize) => rusqlite::Result<Vec<Post>> {
        let mut stmt = db.prepare_cached(queries::SELECT_POSTS_PAGE)?;
        let rows = stmt.query_map(params![topic, limit as i64, offset as i64], |r| post_from_row(r))?;
        rows.collect()
    }
    AllPosts / all_posts, (db, topic: i64) => rusqlite::Result<Vec<Post>> {
        let mut stmt = db.prepare_cached(queries::SELECT_POSTS_ALL)?;
        let rows = stmt.query_map([topic], |r| post_from_row(r))?;
        rows.collect()
    }
    // Returns the new post id and the post count after the insert, which the
    // reply handler turns into the page number to redirect to.
    CreateReply / create_reply, (db, topic: i64, author: String, message: String, now: i64) => rusqlite::Result<(i64, usize)> {
        let tx = db.transaction()?;
        tx.prepare_cached(queries::INSERT_POST)?
            .execute(params![topic, message, author, now])?;
        let post_id = tx.last_insert_rowid();
        tx.prepare_cached(queries::TOUCH_TOPIC)?
            .execute(params![now, topic])?;
        let total: i64 = tx.query_row(queries::COUNT_POSTS, [topic], |r| r.get(0))?;
        tx.commit()?;
        Ok((post_id, total as usize))
    }
    BumpViews / bump_views, (db, topic: i64) => rusqlite::Result<()> {
        db.execute(queries::BUMP_VIEWS, [topic])?;
        Ok(())
    }
    GetOwnPost / get_own_post, (db, post: i64, user: String) => rusqlite::Result<Option<OwnPost>> {
        db.query_row(queries::SELECT_OWN_POST, params![post, user], |r| {
            Ok(OwnPost {
                id: r.get(0)?,
                topic: r.get(1)?,
                board: r.get(2)?,
                topic_title: r.get(3)?,
                message: r.get(4)?,
            })
        })
        .optional()
    }
    // The ownership filter lives in the query itself: editing a foreign post
    // is indistinguishable from editing a missing one.
    UpdatePost / update_post, (db, post: i64, user: String, message: String, now: i64) => rusqlite::Result<bool> {
        let affected = db
            .prepare_cached(queries::UPDATE_OWN_POST)?
            .execute(params![message, user, now, post, user])?;
        Ok(affected > 0)
    }
}
