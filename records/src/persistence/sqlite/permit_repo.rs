//! SQLite-backed repository for permits.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::helpers::{decode_status, order_clause};
use crate::model::{NewPermit, Permit, PermitStatus, RecordId, RecordKind};
use crate::persistence::traits::PermitRepository;
use crate::persistence::{ListOrder, PersistenceError};

const COLUMNS: &str = "id, resident_id, type, status, submitted_at, decided_at";

#[derive(sqlx::FromRow)]
struct PermitRow {
    id: i64,
    resident_id: Option<i64>,
    #[sqlx(rename = "type")]
    permit_type: String,
    status: String,
    submitted_at: DateTime<Utc>,
    decided_at: Option<DateTime<Utc>>,
}

impl TryFrom<PermitRow> for Permit {
    type Error = PersistenceError;

    fn try_from(r: PermitRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            resident_id: r.resident_id,
            permit_type: r.permit_type,
            status: decode_status("permits.status", &r.status)?,
            submitted_at: r.submitted_at,
            decided_at: r.decided_at,
        })
    }
}

/// SQLite implementation of [`PermitRepository`].
#[derive(Clone)]
pub struct SqlitePermitRepository {
    pool: SqlitePool,
}

impl SqlitePermitRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl PermitRepository for SqlitePermitRepository {
    async fn apply(&self, new: &NewPermit) -> Result<Permit, PersistenceError> {
        new.validate()?;

        let row: PermitRow = sqlx::query_as(&format!(
            "INSERT INTO permits (resident_id, type, status, submitted_at) \
             VALUES (?, ?, ?, ?) \
             RETURNING {COLUMNS}"
        ))
        .bind(new.resident_id)
        .bind(&new.permit_type)
        .bind(PermitStatus::Pending.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = row.id, permit_type = %row.permit_type, "permit submitted");
        row.try_into()
    }

    async fn list_permits(
        &self,
        status: Option<PermitStatus>,
        order: ListOrder,
    ) -> Result<Vec<Permit>, PersistenceError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM permits WHERE (?1 IS NULL OR status = ?1) {}",
            order_clause(order, "submitted_at")
        );
        let rows: Vec<PermitRow> = sqlx::query_as(&sql)
            .bind(status.map(PermitStatus::as_str))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Permit::try_from).collect()
    }

    async fn get_permit(&self, id: RecordId) -> Result<Option<Permit>, PersistenceError> {
        let row: Option<PermitRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM permits WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(Permit::try_from).transpose()
    }

    async fn decide(&self, id: RecordId, outcome: &str) -> Result<Permit, PersistenceError> {
        let target = PermitStatus::from_outcome(outcome);

        // Only a pending permit is written; concurrent deciders race on the
        // write lock and the losers fall through to the re-read below.
        let row: Option<PermitRow> = sqlx::query_as(&format!(
            "UPDATE permits SET status = ?, decided_at = ? \
             WHERE id = ? AND status = ? \
             RETURNING {COLUMNS}"
        ))
        .bind(target.as_str())
        .bind(Utc::now())
        .bind(id)
        .bind(PermitStatus::Pending.as_str())
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            tracing::debug!(id, status = %target, "permit decided");
            return row.try_into();
        }

        let existing = self.get_permit(id).await?.ok_or(PersistenceError::NotFound {
            kind: RecordKind::Permit,
            id,
        })?;
        if existing.status == target {
            tracing::debug!(id, status = %target, "permit already decided with same outcome");
            return Ok(existing);
        }
        Err(PersistenceError::AlreadyDecided {
            id,
            status: existing.status,
        })
    }
}
