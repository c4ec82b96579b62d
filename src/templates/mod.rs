use askama::Template;

use crate::{
    forms::{FieldErrors, NewTopicForm, PostForm},
    pagination::Pager,
};

use self::models::{Board, Flash, OwnPost, PostView, Topic, TopicOverview};

pub mod models;

#[derive(Template)]
#[template(path = "home.html")]
pub struct Home {
    pub user: Option<String>,
    pub boards: Vec<Board>,
}

#[derive(Template)]
#[template(path = "topics.html")]
pub struct Topics {
    pub user: Option<String>,
    pub board: Board,
    pub topics: Vec<TopicOverview>,
    pub pager: Pager,
}

#[derive(Template)]
#[template(path = "topic_posts.html")]
pub struct TopicPosts {
    pub user: Option<String>,
    pub topic: Topic,
    pub posts: Vec<PostView>,
    pub pager: Pager,
    pub flash: Flash,
}

#[derive(Template)]
#[template(path = "new_topic.html")]
pub struct NewTopic {
    pub user: Option<String>,
    pub board: Board,
    pub form: NewTopicForm,
    pub errors: FieldErrors,
}

#[derive(Template)]
#[template(path = "reply_topic.html")]
pub struct ReplyTopic {
    pub user: Option<String>,
    pub topic: Topic,
    pub form: PostForm,
    pub errors: FieldErrors,
}

#[derive(Template)]
#[template(path = "edit_post.html")]
pub struct EditPost {
    pub user: Option<String>,
    pub post: OwnPost,
    pub form: PostForm,
    pub errors: FieldErrors,
}

#[derive(Template, Default)]
#[template(path = "login.html")]
pub struct Login {
    pub user: Option<String>,
    pub flash: Flash,
}
