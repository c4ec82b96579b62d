//! Shared helper functions for the API tests.

#![allow(dead_code)]

use std::{sync::Arc, thread};

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use axum_sessions::async_session::{base64, MemoryStore};
use chrono::Utc;
use ropucha::{
    config::{Account, Config},
    database::{DbExecutor, ExecutorConnection},
    router,
};
use tower::ServiceExt;

fn account(name: &str) -> Account {
    Account {
        name: name.to_string(),
        email: format!("{name}@example.com"),
        password: format!("{name}pass"),
    }
}

fn test_config() -> Config {
    Config {
        log_level: "debug".into(),
        listen: "127.0.0.1:0".parse().unwrap(),
        cookie_secret: base64::encode_config([7u8; 64], base64::URL_SAFE_NO_PAD),
        db: None,
        accounts: vec![account("alice"), account("bob")],
    }
}

/// Router over a fresh in-memory database, plus a connection for asserting
/// against storage directly. Accounts "alice" and "bob" exist, with
/// passwords "alicepass" and "bobpass".
pub async fn create_test_app() -> (Router, ExecutorConnection) {
    let (db_exec, db_conn) = DbExecutor::create(":memory:").unwrap();
    thread::spawn(move || db_exec.run());
    let app = router::build(db_conn.clone(), Arc::new(test_config()), MemoryStore::new())
        .await
        .unwrap();
    (app, db_conn)
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<axum::body::BoxBody> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(
    app: &Router,
    uri: &str,
    body: &str,
    cookie: Option<&str>,
) -> Response<axum::body::BoxBody> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

/// Logs an account in and returns its session cookie.
pub async fn login(app: &Router, name: &str) -> String {
    let response = post_form(app, "/login", &format!("user={name}&pass={name}pass"), None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    session_cookie(&response).expect("login did not set a session cookie")
}

/// The `key=value` part of the response's session cookie, if any.
pub fn session_cookie<B>(response: &Response<B>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().split(';').next().unwrap().to_string())
}

pub fn location<B>(response: &Response<B>) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

pub async fn body_string(response: Response<axum::body::BoxBody>) -> String {
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Creates a topic (with its opening post) directly through storage.
pub async fn seed_topic(db: &ExecutorConnection, starter: &str, title: &str, message: &str) -> i64 {
    db.create_topic(
        1,
        starter.to_string(),
        title.to_string(),
        message.to_string(),
        Utc::now().timestamp(),
    )
    .await
    .unwrap()
}

/// Adds a reply directly through storage, returning the new post id.
pub async fn seed_reply(db: &ExecutorConnection, topic: i64, author: &str, message: &str) -> i64 {
    db.create_reply(
        topic,
        author.to_string(),
        message.to_string(),
        Utc::now().timestamp(),
    )
    .await
    .unwrap()
    .0
}
