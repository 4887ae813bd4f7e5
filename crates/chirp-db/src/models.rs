/// Database row types — these map directly to SQLite rows.
/// Distinct from the chirp-types API models to keep the DB layer independent.

pub struct UserRow {
    pub id: String,
    pub name: String,
    pub handle: Option<String>,
    pub password: String,
    pub created_at: String,
}

/// A tweet joined with its author's name and handle, as the feed serves it.
pub struct FeedRow {
    pub id: String,
    pub message: String,
    pub created_at: String,
    pub name: String,
    pub handle: Option<String>,
}
