use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use chirp_api::{AppState, AppStateInner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chirp=debug,tower_http=debug".into()),
        )
        .init();

    // Config — the signing secret is stored base64-encoded and decoded to the
    // raw key bytes here, once, at startup.
    let jwt_secret = std::env::var("CHIRP_JWT_SECRET")
        .unwrap_or_else(|_| "ZGV2LXNlY3JldC1jaGFuZ2UtbWU=".into());
    let jwt_key = B64
        .decode(jwt_secret.trim())
        .context("CHIRP_JWT_SECRET must be valid base64")?;
    let db_path = std::env::var("CHIRP_DB_PATH").unwrap_or_else(|_| "chirp.db".into());
    let host = std::env::var("CHIRP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("CHIRP_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;
    let is_local = std::env::var("CHIRP_LOCAL")
        .is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));

    // Init database
    let db = chirp_db::Database::open(&PathBuf::from(&db_path))?;

    // Shared state, injected into every handler
    let state: AppState = Arc::new(AppStateInner { db, jwt_key });

    // Local development opens CORS wide; deployed instances pin the origin.
    let cors = if is_local {
        CorsLayer::permissive()
    } else {
        match std::env::var("CHIRP_ALLOWED_ORIGIN") {
            Ok(origin) => CorsLayer::new()
                .allow_origin(
                    origin
                        .parse::<HeaderValue>()
                        .context("CHIRP_ALLOWED_ORIGIN is not a valid origin")?,
                )
                .allow_methods(Any)
                .allow_headers(Any),
            Err(_) => CorsLayer::permissive(),
        }
    };

    let app = chirp_api::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("chirp server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
