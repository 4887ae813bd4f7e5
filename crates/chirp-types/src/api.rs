use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// -- JWT Claims --

/// Bearer-token claims shared between token issuance (chirp-api::auth) and
/// the auth gate (chirp-api::extract). Canonical definition lives here in
/// chirp-types to eliminate duplication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub handle: Option<String>,
    pub name: String,
    pub exp: usize,
}

// -- Auth --

/// `name` stays optional so an absent field surfaces as the documented
/// "missing username" error instead of a bare deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignupRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub handle: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

// -- Tweets --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostTweetRequest {
    pub message: String,
}

/// The persisted tweet row echoed back to the author.
#[derive(Debug, Serialize)]
pub struct TweetResponse {
    pub id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub user_id: Uuid,
}

/// One element of the public feed: a tweet joined with its author.
#[derive(Debug, Serialize)]
pub struct FeedTweet {
    pub id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub handle: Option<String>,
}

// -- Misc --

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
