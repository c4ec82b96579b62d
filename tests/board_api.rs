mod common;

use axum::http::StatusCode;

use common::helpers::{body_string, create_test_app, get};

#[tokio::test]
async fn home_lists_all_boards() {
    let (app, _db) = create_test_app().await;

    let response = get(&app, "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("General"));
    assert!(body.contains("/boards/1"));
}

#[tokio::test]
async fn unknown_board_is_not_found() {
    let (app, _db) = create_test_app().await;

    let response = get(&app, "/boards/999", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn static_stylesheet_is_served() {
    let (app, _db) = create_test_app().await;

    let response = get(&app, "/static/style.css", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/css");
}
