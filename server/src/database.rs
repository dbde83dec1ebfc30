//! # SQLite store
//!
//! Relational backing store for accounts, sessions, journal entries and
//! their analysis results.
//!
//! ## Schema
//!
//! - `users`: one row per account, email doubles as the login name
//! - `sessions`: opaque bearer tokens with an expiry, one row per login
//! - `journal_entries`: raw journal text, newest first everywhere it is read
//! - `emotion_results`: at most one analysis per entry (confidence 0..1)
//! - `user_preferences`: notification/dark-mode flags, created on demand
//!
//! All child tables cascade on user deletion so account removal is a single
//! `DELETE FROM users`.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use tracing::info;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email TEXT NOT NULL UNIQUE,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS sessions (
        token TEXT PRIMARY KEY,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        expires_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS journal_entries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        content TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS emotion_results (
        entry_id INTEGER PRIMARY KEY REFERENCES journal_entries(id) ON DELETE CASCADE,
        emotion TEXT NOT NULL,
        confidence REAL NOT NULL,
        analyzed_at TEXT NOT NULL,
        model_version TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS user_preferences (
        user_id INTEGER PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
        notifications_enabled INTEGER NOT NULL DEFAULT 1,
        dark_mode_enabled INTEGER NOT NULL DEFAULT 0,
        updated_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_entries_user_created
        ON journal_entries(user_id, created_at)",
];

pub async fn init_sqlite(database_url: &str) -> SqlitePool {
    let options = SqliteConnectOptions::from_str(database_url)
        .expect("Invalid database URL")
        .create_if_missing(true)
        .foreign_keys(true);

    // An in-memory database exists per connection, so the pool must not
    // fan out.
    let max_connections = if database_url.contains("memory") { 1 } else { 5 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .expect("Failed to open database");

    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(&pool)
            .await
            .expect("Failed to apply schema");
    }

    info!("Database ready at {database_url}");
    pool
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EntryWithResult {
    pub id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub emotion: Option<String>,
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PreferenceRow {
    pub notifications_enabled: bool,
    pub dark_mode_enabled: bool,
}

// ---- users ----

pub async fn email_in_use(
    pool: &SqlitePool,
    email: &str,
    exclude_user: Option<i64>,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1 AND (?2 IS NULL OR id != ?2))",
    )
    .bind(email)
    .bind(exclude_user)
    .fetch_one(pool)
    .await
}

pub async fn create_user(
    pool: &SqlitePool,
    email: &str,
    first_name: &str,
    last_name: &str,
    password_hash: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO users (email, first_name, last_name, password_hash, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(email)
    .bind(first_name)
    .bind(last_name)
    .bind(password_hash)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = ?1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn update_profile(
    pool: &SqlitePool,
    user_id: i64,
    first_name: &str,
    last_name: &str,
    email: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET first_name = ?1, last_name = ?2, email = ?3 WHERE id = ?4")
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete_user(pool: &SqlitePool, user_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM users WHERE id = ?1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

// ---- sessions ----

pub async fn create_session(
    pool: &SqlitePool,
    token: &str,
    user_id: i64,
    expires_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO sessions (token, user_id, expires_at) VALUES (?1, ?2, ?3)")
        .bind(token)
        .bind(user_id)
        .bind(expires_at)
        .execute(pool)
        .await?;
    Ok(())
}

/// Resolve a session token to its user, ignoring expired rows.
pub async fn session_user(pool: &SqlitePool, token: &str) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>(
        "SELECT u.* FROM users u
         JOIN sessions s ON s.user_id = u.id
         WHERE s.token = ?1 AND s.expires_at > ?2",
    )
    .bind(token)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await
}

pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE token = ?1")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

// ---- journal entries & results ----

pub async fn insert_entry(
    pool: &SqlitePool,
    user_id: i64,
    content: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO journal_entries (user_id, content, created_at) VALUES (?1, ?2, ?3)",
    )
    .bind(user_id)
    .bind(content)
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn insert_result(
    pool: &SqlitePool,
    entry_id: i64,
    emotion: &str,
    confidence: f64,
    model_version: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO emotion_results (entry_id, emotion, confidence, analyzed_at, model_version)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(entry_id)
    .bind(emotion)
    .bind(confidence)
    .bind(Utc::now())
    .bind(model_version)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn entry_with_result(
    pool: &SqlitePool,
    entry_id: i64,
    user_id: i64,
) -> Result<Option<EntryWithResult>, sqlx::Error> {
    sqlx::query_as::<_, EntryWithResult>(
        "SELECT e.id, e.content, e.created_at, er.emotion, er.confidence
         FROM journal_entries e
         LEFT JOIN emotion_results er ON er.entry_id = e.id
         WHERE e.id = ?1 AND e.user_id = ?2",
    )
    .bind(entry_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Entries newest first, optionally narrowed by content substring
/// (case-insensitive), emotion label, and entry date.
pub async fn entries_filtered(
    pool: &SqlitePool,
    user_id: i64,
    query: Option<&str>,
    emotion: Option<&str>,
    date: Option<NaiveDate>,
) -> Result<Vec<EntryWithResult>, sqlx::Error> {
    let date = date.map(|d| d.format("%Y-%m-%d").to_string());

    sqlx::query_as::<_, EntryWithResult>(
        "SELECT e.id, e.content, e.created_at, er.emotion, er.confidence
         FROM journal_entries e
         LEFT JOIN emotion_results er ON er.entry_id = e.id
         WHERE e.user_id = ?1
           AND (?2 IS NULL OR instr(lower(e.content), lower(?2)) > 0)
           AND (?3 IS NULL OR er.emotion = ?3)
           AND (?4 IS NULL OR date(e.created_at) = ?4)
         ORDER BY e.created_at DESC, e.id DESC",
    )
    .bind(user_id)
    .bind(query)
    .bind(emotion)
    .bind(date)
    .fetch_all(pool)
    .await
}

pub async fn delete_entry(
    pool: &SqlitePool,
    entry_id: i64,
    user_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM journal_entries WHERE id = ?1 AND user_id = ?2")
        .bind(entry_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count_entries(pool: &SqlitePool, user_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM journal_entries WHERE user_id = ?1")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

/// `(created_at, emotion)` pairs for analyzed entries, oldest first.
pub async fn results_chronological(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<(DateTime<Utc>, String)>, sqlx::Error> {
    sqlx::query_as::<_, (DateTime<Utc>, String)>(
        "SELECT e.created_at, er.emotion
         FROM journal_entries e
         JOIN emotion_results er ON er.entry_id = e.id
         WHERE e.user_id = ?1
         ORDER BY e.created_at ASC, e.id ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

// ---- preferences ----

pub async fn get_or_create_preferences(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<PreferenceRow, sqlx::Error> {
    sqlx::query(
        "INSERT INTO user_preferences (user_id, updated_at) VALUES (?1, ?2)
         ON CONFLICT(user_id) DO NOTHING",
    )
    .bind(user_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    sqlx::query_as::<_, PreferenceRow>(
        "SELECT notifications_enabled, dark_mode_enabled FROM user_preferences WHERE user_id = ?1",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

pub async fn update_preferences(
    pool: &SqlitePool,
    user_id: i64,
    notifications_enabled: bool,
    dark_mode_enabled: bool,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO user_preferences (user_id, notifications_enabled, dark_mode_enabled, updated_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(user_id) DO UPDATE SET
             notifications_enabled = excluded.notifications_enabled,
             dark_mode_enabled = excluded.dark_mode_enabled,
             updated_at = excluded.updated_at",
    )
    .bind(user_id)
    .bind(notifications_enabled)
    .bind(dark_mode_enabled)
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(())
}
