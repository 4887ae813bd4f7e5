use axum::{
    Json,
    extract::{Path, State},
};
use chrono::SecondsFormat;
use tracing::warn;
use uuid::Uuid;

use chirp_db::models::FeedRow;
use chirp_types::api::{FeedTweet, PostTweetRequest, TweetResponse};

use crate::error::{ApiError, join_error};
use crate::extract::AuthUser;
use crate::AppState;

pub async fn list_tweets(State(state): State<AppState>) -> Result<Json<Vec<FeedTweet>>, ApiError> {
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.list_tweets())
        .await
        .map_err(join_error)??;

    Ok(Json(rows.into_iter().map(feed_tweet).collect()))
}

pub async fn list_tweets_by_handle(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<Vec<FeedTweet>>, ApiError> {
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.list_tweets_by_handle(&handle))
        .await
        .map_err(join_error)??;

    Ok(Json(rows.into_iter().map(feed_tweet).collect()))
}

pub async fn post_tweet(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<PostTweetRequest>,
) -> Result<Json<TweetResponse>, ApiError> {
    let tweet_id = Uuid::new_v4();
    let created_at = chrono::Utc::now();

    // Microsecond precision keeps back-to-back tweets strictly ordered.
    let stamp = created_at.to_rfc3339_opts(SecondsFormat::Micros, true);

    let db = state.clone();
    let message = req.message.clone();
    let user_id = claims.sub.to_string();
    tokio::task::spawn_blocking(move || {
        db.db
            .insert_tweet(&tweet_id.to_string(), &message, &stamp, &user_id)
    })
    .await
    .map_err(join_error)??;

    Ok(Json(TweetResponse {
        id: tweet_id,
        message: req.message,
        created_at,
        user_id: claims.sub,
    }))
}

fn feed_tweet(row: FeedRow) -> FeedTweet {
    FeedTweet {
        id: row.id.parse().unwrap_or_else(|e| {
            warn!("Corrupt tweet id '{}': {}", row.id, e);
            Uuid::default()
        }),
        created_at: row
            .created_at
            .parse::<chrono::DateTime<chrono::Utc>>()
            .unwrap_or_else(|e| {
                warn!(
                    "Corrupt created_at '{}' on tweet '{}': {}",
                    row.created_at, row.id, e
                );
                chrono::DateTime::default()
            }),
        message: row.message,
        name: row.name,
        handle: row.handle,
    }
}
