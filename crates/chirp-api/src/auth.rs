use anyhow::anyhow;
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Json, extract::State};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use chirp_types::api::{Claims, LoginRequest, MessageResponse, SignupRequest, TokenResponse};

use crate::error::{ApiError, join_error};
use crate::extract::AuthUser;
use crate::AppState;

/// Tokens expire rather than living forever; 30 days is generous for a toy
/// feed and still bounds the blast radius of a leaked token.
const TOKEN_TTL_DAYS: i64 = 30;

pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let name = req
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or(ApiError::MissingUsername)?
        .to_string();

    let handle = req
        .handle
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_string);

    // Check the handle before paying for a password hash.
    if let Some(h) = handle.clone() {
        let db = state.clone();
        let taken = tokio::task::spawn_blocking(move || db.db.get_user_by_handle(&h))
            .await
            .map_err(join_error)??
            .is_some();
        if taken {
            return Err(ApiError::HandleTaken);
        }
    }

    // Hashing is deliberately CPU-costly; keep it off the async runtime.
    let password = req.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(join_error)??;

    let user_id = Uuid::new_v4();
    {
        let db = state.clone();
        let name = name.clone();
        let handle = handle.clone();
        tokio::task::spawn_blocking(move || {
            db.db
                .create_user(&user_id.to_string(), &name, handle.as_deref(), &password_hash)
        })
        .await
        .map_err(join_error)??;
    }

    let token = create_token(&state.jwt_key, user_id, handle.as_deref(), &name)?;

    Ok(Json(TokenResponse { token }))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let db = state.clone();
    let handle = req.handle.clone();
    let user = tokio::task::spawn_blocking(move || db.db.get_user_by_handle(&handle))
        .await
        .map_err(join_error)??
        .ok_or(ApiError::UnknownUser)?;

    let password = req.password;
    let stored_hash = user.password.clone();
    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(join_error)?;
    if !matches {
        return Err(ApiError::WrongPassword);
    }

    let user_id: Uuid = user
        .id
        .parse()
        .map_err(|e| ApiError::Internal(anyhow!("corrupt user id '{}': {}", user.id, e)))?;

    let token = create_token(&state.jwt_key, user_id, user.handle.as_deref(), &user.name)?;

    Ok(Json(TokenResponse { token }))
}

pub async fn whoami(AuthUser(claims): AuthUser) -> Json<MessageResponse> {
    // Users who signed up without a handle are greeted by name instead.
    let who = claims.handle.as_deref().unwrap_or(&claims.name);

    Json(MessageResponse {
        message: format!("you are authenticated as {}", who),
    })
}

/// Salted argon2id hash in PHC string form; the plaintext is never persisted.
pub fn hash_password(plaintext: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(anyhow!("password hashing failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Constant-time comparison inside the argon2 crate. An unparseable stored
/// hash also reads as a mismatch.
pub fn verify_password(plaintext: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

pub fn create_token(
    key: &[u8],
    user_id: Uuid,
    handle: Option<&str>,
    name: &str,
) -> Result<String, ApiError> {
    let claims = Claims {
        sub: user_id,
        handle: handle.map(str::to_string),
        name: name.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::days(TOKEN_TTL_DAYS)).timestamp() as usize,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(key))
        .map_err(|e| ApiError::Internal(anyhow!("token signing failed: {}", e)))
}
