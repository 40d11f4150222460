//! Contact store gateway — the sole owner of the `contacts` table.
//!
//! All reads and writes go through [`ContactStore`], which wraps a shared
//! [`SqlitePool`]. Handlers hold only transient copies of rows during a
//! single request; the database owns the authoritative state.
//!
//! Update and delete report [`StoreError::NotFound`] when the identifier
//! matched no row, so callers can distinguish "no such contact" from a
//! transport-level database failure.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::trace;

/// Schema applied at startup. Idempotent (`IF NOT EXISTS`).
const SCHEMA: &str = include_str!("../migrations/001_contacts.sql");

// ---------------------------------------------------------------------------
// Domain types
// ---------------------------------------------------------------------------

/// A persisted contact row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Row id, assigned by SQLite on insert. Unique and monotonic.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Email address, also the recipient of the welcome notification.
    pub email: String,
    /// Phone number, stored as free-form text.
    pub phone: String,
}

/// The id-less input shape for creating a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
}

impl From<&Contact> for ContactDraft {
    fn from(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from contact store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No row matched the given identifier.
    #[error("contact {id} not found")]
    NotFound {
        /// The identifier that matched nothing.
        id: i64,
    },
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Gateway over the `contacts` table.
///
/// Cheap to clone — wraps the connection pool handle.
#[derive(Clone)]
pub struct ContactStore {
    db: SqlitePool,
}

impl std::fmt::Debug for ContactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactStore").finish_non_exhaustive()
    }
}

impl ContactStore {
    /// Create a store backed by the given SQLite pool.
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Apply the schema. Safe to call on every startup.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema statements fail to execute.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(SCHEMA).execute(&self.db).await?;
        Ok(())
    }

    /// List all contacts, newest first (descending by id).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self) -> Result<Vec<Contact>, StoreError> {
        let rows: Vec<(i64, String, String, String)> = sqlx::query_as(
            "SELECT id, name, email, phone FROM contacts ORDER BY id DESC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, email, phone)| Contact {
                id,
                name,
                email,
                phone,
            })
            .collect())
    }

    /// Persist a new contact and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(&self, draft: ContactDraft) -> Result<Contact, StoreError> {
        let result = sqlx::query(
            "INSERT INTO contacts (name, email, phone) VALUES (?1, ?2, ?3)",
        )
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.phone)
        .execute(&self.db)
        .await?;

        let id = result.last_insert_rowid();
        trace!(id, "contact created");

        Ok(Contact {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
        })
    }

    /// Full-record replace of the row matching `contact.id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the id matched no row, or a
    /// database error if the update fails.
    pub async fn update(&self, contact: &Contact) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE contacts SET name = ?1, email = ?2, phone = ?3 WHERE id = ?4",
        )
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(contact.id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id: contact.id });
        }
        trace!(id = contact.id, "contact updated");
        Ok(())
    }

    /// Delete the row with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the id matched no row, or a
    /// database error if the delete fails.
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ?1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }
        trace!(id, "contact deleted");
        Ok(())
    }

    /// Number of contacts currently stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn count(&self) -> Result<u64, StoreError> {
        let row: (i64,) = sqlx::query_as("SELECT count(*) FROM contacts")
            .fetch_one(&self.db)
            .await?;
        // count(*) is always non-negative, safe to cast.
        Ok(row.0.cast_unsigned())
    }
}
