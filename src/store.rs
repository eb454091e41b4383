use crate::errors::AppError;
use crate::models::{ActionRecord, Classification, User};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use std::env;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// How much history a user fetch returns, newest first.
pub const RECENT_LIMIT: usize = 20;

pub fn resolve_db_path() -> PathBuf {
    if let Ok(path) = env::var("APP_DB_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("data/ledger.db")
}

/// SQLite-backed store for users and their classified actions.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create the database and make sure the schema exists.
    pub fn open(path: &Path) -> Result<Self, AppError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, AppError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), AppError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS actions (
                id TEXT PRIMARY KEY,
                action TEXT NOT NULL,
                subactions TEXT NOT NULL,
                keywords TEXT NOT NULL,
                severity INTEGER NOT NULL,
                factor INTEGER NOT NULL,
                user_id TEXT NOT NULL REFERENCES users(id),
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_actions_user_created
                ON actions(user_id, created_at);",
        )?;
        Ok(())
    }

    pub fn create_user(&self, username: &str) -> Result<User, AppError> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
        };
        self.conn.execute(
            "INSERT INTO users (id, username) VALUES (?1, ?2)",
            params![user.id, user.username],
        )?;
        Ok(user)
    }

    pub fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        let user = self
            .conn
            .query_row(
                "SELECT id, username FROM users WHERE id = ?1",
                params![id],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        username: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    pub fn insert_action(
        &self,
        user_id: &str,
        classification: &Classification,
    ) -> Result<ActionRecord, AppError> {
        self.insert_action_at(user_id, classification, Utc::now().to_rfc3339())
    }

    pub fn insert_action_at(
        &self,
        user_id: &str,
        classification: &Classification,
        created_at: String,
    ) -> Result<ActionRecord, AppError> {
        let record = ActionRecord {
            id: Uuid::new_v4().to_string(),
            action: classification.action.clone(),
            subactions: classification.subactions.clone(),
            keywords: classification.keywords.clone(),
            severity: classification.severity,
            factor: classification.factor,
            user_id: user_id.to_string(),
            created_at,
        };
        self.conn.execute(
            "INSERT INTO actions
                (id, action, subactions, keywords, severity, factor, user_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                record.id,
                record.action,
                serde_json::to_string(&record.subactions)?,
                serde_json::to_string(&record.keywords)?,
                record.severity,
                record.factor,
                record.user_id,
                record.created_at,
            ],
        )?;
        Ok(record)
    }

    /// Up to `limit` of the user's actions, newest first.
    pub fn recent_actions(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<ActionRecord>, AppError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, action, subactions, keywords, severity, factor, user_id, created_at
             FROM actions
             WHERE user_id = ?1
             ORDER BY created_at DESC
             LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![user_id, limit as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, i64>(4)?,
                row.get::<_, i64>(5)?,
                row.get::<_, String>(6)?,
                row.get::<_, String>(7)?,
            ))
        })?;

        let mut actions = Vec::new();
        for row in rows {
            let (id, action, subactions, keywords, severity, factor, user_id, created_at) = row?;
            actions.push(ActionRecord {
                id,
                action,
                subactions: serde_json::from_str(&subactions)?,
                keywords: serde_json::from_str(&keywords)?,
                severity,
                factor,
                user_id,
                created_at,
            });
        }
        Ok(actions)
    }
}
