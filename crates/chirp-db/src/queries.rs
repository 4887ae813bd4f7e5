use crate::Database;
use crate::models::{FeedRow, UserRow};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

impl Database {
    // -- Users --

    pub fn create_user(
        &self,
        id: &str,
        name: &str,
        handle: Option<&str>,
        password_hash: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, name, handle, password) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![id, name, handle, password_hash],
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_handle(&self, handle: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_handle(conn, handle))
    }

    // -- Tweets --

    /// `created_at` is assigned by the caller as an RFC 3339 UTC timestamp so
    /// lexicographic order matches insertion order. The REFERENCES constraint
    /// rejects a `user_id` with no matching user.
    pub fn insert_tweet(
        &self,
        id: &str,
        message: &str,
        created_at: &str,
        user_id: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO tweets (id, message, created_at, user_id) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![id, message, created_at, user_id],
            )?;
            Ok(())
        })
    }

    pub fn list_tweets(&self) -> Result<Vec<FeedRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT t.id, t.message, t.created_at, u.name, u.handle
                 FROM tweets t
                 INNER JOIN users u ON t.user_id = u.id
                 ORDER BY t.created_at DESC",
            )?;

            let rows = stmt
                .query_map([], feed_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    /// Unknown handles simply match no rows; the empty vec is not an error.
    pub fn list_tweets_by_handle(&self, handle: &str) -> Result<Vec<FeedRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT t.id, t.message, t.created_at, u.name, u.handle
                 FROM tweets t
                 INNER JOIN users u ON t.user_id = u.id
                 WHERE u.handle = ?1
                 ORDER BY t.created_at DESC",
            )?;

            let rows = stmt
                .query_map([handle], feed_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }
}

fn query_user_by_handle(conn: &Connection, handle: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn
        .prepare("SELECT id, name, handle, password, created_at FROM users WHERE handle = ?1")?;

    let row = stmt
        .query_row([handle], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                name: row.get(1)?,
                handle: row.get(2)?,
                password: row.get(3)?,
                created_at: row.get(4)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn feed_row(row: &rusqlite::Row<'_>) -> std::result::Result<FeedRow, rusqlite::Error> {
    Ok(FeedRow {
        id: row.get(0)?,
        message: row.get(1)?,
        created_at: row.get(2)?,
        name: row.get(3)?,
        handle: row.get(4)?,
    })
}
