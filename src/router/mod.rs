use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use axum_sessions::{
    async_session::{
        base64::{self, URL_SAFE_NO_PAD},
        MemoryStore,
    },
    SessionLayer,
};
use color_eyre::Result;

use crate::{config::Config, database::ExecutorConnection};

mod auth;
mod boards;
mod error;
mod posts;
mod static_files;
mod topics;

#[derive(Clone)]
pub struct AppState {
    db: ExecutorConnection,
    cfg: Arc<Config>,
}

pub async fn build(db: ExecutorConnection, cfg: Arc<Config>, store: MemoryStore) -> Result<Router> {
    let secret = base64::decode_config(&cfg.cookie_secret, URL_SAFE_NO_PAD)?;
    let router = Router::new()
        .route("/", get(boards::handle_home))
        .route("/login", get(auth::handle_loginpage).post(auth::handle_login))
        .route("/logout", post(auth::handle_logout))
        .route("/boards/:board", get(topics::handle_topics))
        .route(
            "/boards/:board/new",
            get(topics::handle_new_topic_form).post(topics::handle_new_topic),
        )
        .route(
            "/boards/:board/topics/:topic",
            get(posts::handle_topic_posts),
        )
        .route(
            "/boards/:board/topics/:topic/all",
            get(posts::handle_topic_posts_all),
        )
        .route(
            "/boards/:board/topics/:topic/reply",
            get(posts::handle_reply_form).post(posts::handle_reply),
        )
        .route(
            "/posts/:post/edit",
            get(posts::handle_edit_form).post(posts::handle_edit),
        )
        .route("/static/*file", get(static_files::static_handler))
        .fallback_service(get(|| async { error::http_404() }))
        .layer(SessionLayer::new(store, &secret))
        .with_state(AppState { db, cfg });
    Ok(router)
}
