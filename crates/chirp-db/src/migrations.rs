use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            handle      TEXT UNIQUE,
            password    TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS tweets (
            id          TEXT PRIMARY KEY,
            message     TEXT NOT NULL,
            created_at  TEXT NOT NULL,
            user_id     TEXT NOT NULL REFERENCES users(id)
        );

        CREATE INDEX IF NOT EXISTS idx_tweets_created
            ON tweets(created_at);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
