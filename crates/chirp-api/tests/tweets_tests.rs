//! Feed and posting tests driven through the real router.

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{request, signup, test_app};

async fn post_tweet(app: &axum::Router, token: &str, message: &str) -> serde_json::Value {
    let (status, body) = request(
        app,
        "POST",
        "/tweets",
        Some(token),
        Some(json!({ "message": message })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "posting failed: {body}");
    body
}

#[tokio::test]
async fn root_says_hello() {
    let app = test_app();

    let (status, body) = request(&app, "GET", "/", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "hello from chirp api");
}

#[tokio::test]
async fn feed_starts_empty() {
    let app = test_app();

    let (status, body) = request(&app, "GET", "/tweets", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn posted_tweet_is_first_in_feed() {
    let app = test_app();
    let token = signup(&app, "Ann", "ann", "pw").await;

    let created = post_tweet(&app, &token, "hi").await;
    assert_eq!(created["message"], "hi");
    assert!(created["id"].is_string());
    assert!(created["created_at"].is_string());
    assert!(created["user_id"].is_string());

    let (status, feed) = request(&app, "GET", "/tweets", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let first = &feed[0];
    assert_eq!(first["message"], "hi");
    assert_eq!(first["name"], "Ann");
    assert_eq!(first["handle"], "ann");
    assert_eq!(first["id"], created["id"]);
}

#[tokio::test]
async fn feed_is_reverse_chronological() {
    let app = test_app();
    let token = signup(&app, "Ann", "ann", "pw").await;

    for message in ["one", "two", "three"] {
        post_tweet(&app, &token, message).await;
        tokio::time::sleep(Duration::from_millis(2)).await;
    }

    let (_, feed) = request(&app, "GET", "/tweets", None, None).await;
    let messages: Vec<&str> = feed
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["message"].as_str().unwrap())
        .collect();

    assert_eq!(messages, ["three", "two", "one"]);
}

#[tokio::test]
async fn by_handle_filters_and_keeps_order() {
    let app = test_app();
    let ann = signup(&app, "Ann", "ann", "pw").await;
    let bob = signup(&app, "Bob", "bob", "pw").await;

    post_tweet(&app, &ann, "a1").await;
    tokio::time::sleep(Duration::from_millis(2)).await;
    post_tweet(&app, &bob, "b1").await;
    tokio::time::sleep(Duration::from_millis(2)).await;
    post_tweet(&app, &ann, "a2").await;

    let (status, feed) = request(&app, "GET", "/tweets/ann", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let messages: Vec<&str> = feed
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["message"].as_str().unwrap())
        .collect();
    assert_eq!(messages, ["a2", "a1"]);
    assert!(
        feed.as_array()
            .unwrap()
            .iter()
            .all(|t| t["handle"] == "ann")
    );
}

#[tokio::test]
async fn unknown_handle_yields_empty_feed_not_error() {
    let app = test_app();
    let token = signup(&app, "Ann", "ann", "pw").await;
    post_tweet(&app, &token, "hi").await;

    let (status, body) = request(&app, "GET", "/tweets/unknownhandle", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn tweet_is_attributed_to_the_token_owner() {
    let app = test_app();
    let ann = signup(&app, "Ann", "ann", "pw").await;
    let bob = signup(&app, "Bob", "bob", "pw").await;

    post_tweet(&app, &bob, "from bob").await;
    post_tweet(&app, &ann, "from ann").await;

    let (_, feed) = request(&app, "GET", "/tweets/bob", None, None).await;
    let feed = feed.as_array().unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0]["message"], "from bob");
    assert_eq!(feed[0]["name"], "Bob");
}
