pub mod auth;
pub mod error;
pub mod extract;
pub mod tweets;

use std::sync::Arc;

use axum::{
    Json, Router,
    routing::{get, post},
};

use chirp_db::Database;
use chirp_types::api::MessageResponse;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    /// Raw token-signing key, already base64-decoded from config.
    pub jwt_key: Vec<u8>,
}

/// Build the full route table. The server binary and the integration tests
/// both go through here so they exercise the same router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/tweets", get(tweets::list_tweets).post(tweets::post_tweet))
        .route("/tweets/{handle}", get(tweets::list_tweets_by_handle))
        .route("/signup", post(auth::signup))
        .route("/session", post(auth::login).get(auth::whoami))
        .with_state(state)
}

async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "hello from chirp api".to_string(),
    })
}
