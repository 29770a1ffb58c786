//! Application persistence
//!
//! The service only needs two store operations: exact-match lookup by code
//! and insert. Code uniqueness is also enforced by the store itself, and a
//! violation surfaces as `StoreError::Conflict`.

use async_trait::async_trait;
use shared::{Application, NewApplication};
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Application code already exists: {code}")]
    Conflict { code: String },
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Look up an application by its exact code
    async fn find_by_code(&self, code: &str) -> Result<Option<Application>, StoreError>;

    /// Insert a new application, returning it with its generated id
    async fn insert(&self, application: NewApplication) -> Result<Application, StoreError>;

    /// Check that the store is reachable
    async fn ping(&self) -> Result<(), StoreError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL-backed store over the `applications` table
#[derive(Clone)]
pub struct PgApplicationStore {
    pool: PgPool,
}

impl PgApplicationStore {
    pub fn new(pool: PgPool) -> Self {
        PgApplicationStore { pool }
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../database/migrations").run(&self.pool).await
    }
}

#[async_trait]
impl ApplicationStore for PgApplicationStore {
    async fn find_by_code(&self, code: &str) -> Result<Option<Application>, StoreError> {
        let found = sqlx::query_as::<_, Application>(
            "SELECT id, code, name, description FROM applications WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(found)
    }

    async fn insert(&self, application: NewApplication) -> Result<Application, StoreError> {
        debug!(code = %application.code, "inserting application");

        sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (code, name, description)
            VALUES ($1, $2, $3)
            RETURNING id, code, name, description
            "#,
        )
        .bind(&application.code)
        .bind(&application.name)
        .bind(&application.desc)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => StoreError::Conflict {
                code: application.code.clone(),
            },
            other => StoreError::Database(other),
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory
// ─────────────────────────────────────────────────────────────────────────────

/// Process-local store keyed by code
///
/// Insert checks and writes under one lock, so concurrent inserts of the
/// same code yield exactly one record and one `Conflict`.
#[derive(Debug, Default)]
pub struct InMemoryApplicationStore {
    records: Mutex<HashMap<String, Application>>,
}

impl InMemoryApplicationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored applications
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Application>> {
        // The map holds no invariant a panicking writer could break halfway.
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ApplicationStore for InMemoryApplicationStore {
    async fn find_by_code(&self, code: &str) -> Result<Option<Application>, StoreError> {
        Ok(self.lock().get(code).cloned())
    }

    async fn insert(&self, application: NewApplication) -> Result<Application, StoreError> {
        let mut records = self.lock();
        if records.contains_key(&application.code) {
            return Err(StoreError::Conflict {
                code: application.code,
            });
        }

        let stored = application.with_id(Uuid::new_v4());
        records.insert(stored.code.clone(), stored.clone());
        Ok(stored)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
