mod common;

use axum::http::StatusCode;

use common::helpers::{body_string, create_test_app, get, location, login, post_form};

#[tokio::test]
async fn login_round_trip() {
    let (app, _db) = create_test_app().await;

    let cookie = login(&app, "alice").await;

    // the navbar now shows the account name
    let response = get(&app, "/", Some(&cookie)).await;
    let body = body_string(response).await;
    assert!(body.contains("alice"));
    assert!(body.contains("log out"));
}

#[tokio::test]
async fn wrong_password_redisplays_login() {
    let (app, _db) = create_test_app().await;

    let response = post_form(&app, "/login", "user=alice&pass=nope", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Invalid password"));
}

#[tokio::test]
async fn unknown_account_redisplays_login() {
    let (app, _db) = create_test_app().await;

    let response = post_form(&app, "/login", "user=mallory&pass=x", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Invalid login"));
}

#[tokio::test]
async fn logout_clears_the_session() {
    let (app, _db) = create_test_app().await;

    let cookie = login(&app, "alice").await;
    let response = post_form(&app, "/logout", "", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    // the old cookie no longer authenticates
    let response = get(&app, "/boards/1/new", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn protected_pages_redirect_anonymous_users_to_login() {
    let (app, db) = create_test_app().await;
    let topic = common::helpers::seed_topic(&db, "alice", "Hello", "World").await;

    for uri in [
        "/boards/1/new".to_string(),
        format!("/boards/1/topics/{topic}/reply"),
        "/posts/1/edit".to_string(),
    ] {
        let response = get(&app, &uri, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/login", "{uri}");
    }
}
