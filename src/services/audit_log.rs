//! Session activity trail.
//!
//! Records reader events (book opened, settings changed, annotations
//! created, exports) to SQLite. Detail payloads are classified into a
//! [`DetailKind`] variant at record time; listing renders the per-variant
//! human-readable summary shown in the back-office activity view.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::params;
use serde_json::Value;
use uuid::Uuid;

use crate::database::connection::Database;
use crate::types::audit::{AuditEntry, DetailKind};
use crate::types::errors::AuditError;

/// Trait defining the audit log interface.
pub trait AuditLogTrait {
    fn record(
        &mut self,
        action: &str,
        resource_id: Option<&str>,
        details: &Value,
    ) -> Result<AuditEntry, AuditError>;
    fn list(&self, limit: usize) -> Result<Vec<AuditEntry>, AuditError>;
    fn formatted(&self, limit: usize) -> Result<Vec<(AuditEntry, String)>, AuditError>;
}

/// Audit log backed by SQLite.
pub struct AuditLog {
    db: Arc<Database>,
}

impl AuditLog {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }
}

impl AuditLogTrait for AuditLog {
    /// Classifies the detail payload and stores the entry.
    fn record(
        &mut self,
        action: &str,
        resource_id: Option<&str>,
        details: &Value,
    ) -> Result<AuditEntry, AuditError> {
        let entry = AuditEntry {
            id: Uuid::new_v4().to_string(),
            action: action.to_string(),
            resource_id: resource_id.map(str::to_string),
            details: DetailKind::classify(details),
            created_at: Self::now(),
        };
        let details_json = serde_json::to_string(&entry.details)
            .map_err(|e| AuditError::SerializationError(e.to_string()))?;
        self.db
            .connection()
            .execute(
                "INSERT INTO audit_log (id, action, resource_id, details, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    entry.id,
                    entry.action,
                    entry.resource_id,
                    details_json,
                    entry.created_at,
                ],
            )
            .map_err(|e| AuditError::DatabaseError(e.to_string()))?;
        Ok(entry)
    }

    /// Lists entries newest-first.
    fn list(&self, limit: usize) -> Result<Vec<AuditEntry>, AuditError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(
                "SELECT id, action, resource_id, details, created_at \
                 FROM audit_log ORDER BY created_at DESC, id LIMIT ?1",
            )
            .map_err(|e| AuditError::DatabaseError(e.to_string()))?;
        let rows = stmt
            .query_map(params![limit as i64], |row| {
                let details_json: String = row.get(3)?;
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    details_json,
                    row.get::<_, i64>(4)?,
                ))
            })
            .map_err(|e| AuditError::DatabaseError(e.to_string()))?;

        let mut entries = Vec::new();
        for row in rows {
            let (id, action, resource_id, details_json, created_at) =
                row.map_err(|e| AuditError::DatabaseError(e.to_string()))?;
            let details: DetailKind = serde_json::from_str(&details_json)
                .map_err(|e| AuditError::SerializationError(e.to_string()))?;
            entries.push(AuditEntry {
                id,
                action,
                resource_id,
                details,
                created_at,
            });
        }
        Ok(entries)
    }

    /// Lists entries with their rendered detail summaries.
    fn formatted(&self, limit: usize) -> Result<Vec<(AuditEntry, String)>, AuditError> {
        Ok(self
            .list(limit)?
            .into_iter()
            .map(|entry| {
                let summary = entry.details.format();
                (entry, summary)
            })
            .collect())
    }
}
