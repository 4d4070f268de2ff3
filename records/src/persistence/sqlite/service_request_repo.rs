//! SQLite-backed repository for service requests.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::helpers::{decode_status, order_clause, placeholders};
use crate::model::{NewServiceRequest, RecordId, RecordKind, ServiceRequest, ServiceRequestStatus};
use crate::persistence::traits::ServiceRequestRepository;
use crate::persistence::{ListOrder, PersistenceError};

const COLUMNS: &str = "id, resident_id, category, description, status, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct ServiceRequestRow {
    id: i64,
    resident_id: Option<i64>,
    category: String,
    description: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ServiceRequestRow> for ServiceRequest {
    type Error = PersistenceError;

    fn try_from(r: ServiceRequestRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            resident_id: r.resident_id,
            category: r.category,
            description: r.description,
            status: decode_status("service_requests.status", &r.status)?,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

/// SQLite implementation of [`ServiceRequestRepository`].
#[derive(Clone)]
pub struct SqliteServiceRequestRepository {
    pool: SqlitePool,
}

impl SqliteServiceRequestRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ServiceRequestRepository for SqliteServiceRequestRepository {
    async fn open_request(
        &self,
        new: &NewServiceRequest,
    ) -> Result<ServiceRequest, PersistenceError> {
        new.validate()?;
        let now = Utc::now();

        let row: ServiceRequestRow = sqlx::query_as(&format!(
            "INSERT INTO service_requests \
                 (resident_id, category, description, status, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?) \
             RETURNING {COLUMNS}"
        ))
        .bind(new.resident_id)
        .bind(&new.category)
        .bind(&new.description)
        .bind(ServiceRequestStatus::Open.as_str())
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = row.id, category = %row.category, "opened service request");
        row.try_into()
    }

    async fn list_requests(
        &self,
        status: Option<ServiceRequestStatus>,
        order: ListOrder,
    ) -> Result<Vec<ServiceRequest>, PersistenceError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM service_requests \
             WHERE (?1 IS NULL OR status = ?1) {}",
            order_clause(order, "created_at")
        );
        let rows: Vec<ServiceRequestRow> = sqlx::query_as(&sql)
            .bind(status.map(ServiceRequestStatus::as_str))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(ServiceRequest::try_from).collect()
    }

    async fn get_request(&self, id: RecordId) -> Result<Option<ServiceRequest>, PersistenceError> {
        let row: Option<ServiceRequestRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM service_requests WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ServiceRequest::try_from).transpose()
    }

    async fn update_status(
        &self,
        id: RecordId,
        status: ServiceRequestStatus,
    ) -> Result<ServiceRequest, PersistenceError> {
        // One conditional statement: the transition check and the write
        // happen under the same write lock.
        let sources = ServiceRequestStatus::sources_for(status);
        let sql = format!(
            "UPDATE service_requests SET status = ?, updated_at = ? \
             WHERE id = ? AND status IN ({}) \
             RETURNING {COLUMNS}",
            placeholders(sources.len())
        );
        let mut query = sqlx::query_as::<_, ServiceRequestRow>(&sql)
            .bind(status.as_str())
            .bind(Utc::now())
            .bind(id);
        for source in &sources {
            query = query.bind(source.as_str());
        }

        if let Some(row) = query.fetch_optional(&self.pool).await? {
            tracing::debug!(id, to = %status, "updated service request status");
            return row.try_into();
        }

        let current = self
            .get_request(id)
            .await?
            .ok_or(PersistenceError::NotFound {
                kind: RecordKind::ServiceRequest,
                id,
            })?;
        Err(PersistenceError::InvalidTransition {
            kind: RecordKind::ServiceRequest,
            id,
            from: current.status.as_str(),
            to: status.as_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::sqlite::Database;

    async fn test_db() -> (Database, SqliteServiceRequestRepository) {
        let db = Database::new_in_memory().await.unwrap();
        let repo = SqliteServiceRequestRepository::new(db.pool().clone());
        (db, repo)
    }

    fn sample_request(category: &str) -> NewServiceRequest {
        NewServiceRequest {
            resident_id: Some(1),
            category: category.to_string(),
            description: "Main St".to_string(),
        }
    }

    #[tokio::test]
    async fn test_open_defaults() {
        let (_db, repo) = test_db().await;
        let sr = repo.open_request(&sample_request("pothole")).await.unwrap();
        assert_eq!(sr.id, 1);
        assert_eq!(sr.status, ServiceRequestStatus::Open);
        assert_eq!(sr.category, "pothole");
        assert_eq!(sr.description, "Main St");
        assert_eq!(sr.resident_id, Some(1));
        assert_eq!(sr.created_at, sr.updated_at);
    }

    #[tokio::test]
    async fn test_orphaned_resident_reference_is_allowed() {
        let (_db, repo) = test_db().await;
        let mut new = sample_request("graffiti");
        new.resident_id = Some(999);
        let sr = repo.open_request(&new).await.unwrap();
        assert_eq!(sr.resident_id, Some(999));
    }

    #[tokio::test]
    async fn test_get_roundtrip() {
        let (_db, repo) = test_db().await;
        let sr = repo.open_request(&sample_request("pothole")).await.unwrap();
        assert_eq!(repo.get_request(sr.id).await.unwrap(), Some(sr));
        assert_eq!(repo.get_request(77).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_status_stamps_updated_at() {
        let (_db, repo) = test_db().await;
        let sr = repo.open_request(&sample_request("pothole")).await.unwrap();
        let updated = repo
            .update_status(sr.id, ServiceRequestStatus::InProgress)
            .await
            .unwrap();
        assert_eq!(updated.status, ServiceRequestStatus::InProgress);
        assert_eq!(updated.created_at, sr.created_at);
        assert!(updated.updated_at >= sr.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found() {
        let (_db, repo) = test_db().await;
        let result = repo.update_status(5, ServiceRequestStatus::Closed).await;
        assert!(matches!(
            result,
            Err(PersistenceError::NotFound {
                kind: RecordKind::ServiceRequest,
                id: 5
            })
        ));
        assert!(repo
            .list_requests(None, ListOrder::Id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_closed_request_only_reopens() {
        let (_db, repo) = test_db().await;
        let sr = repo.open_request(&sample_request("pothole")).await.unwrap();
        repo.update_status(sr.id, ServiceRequestStatus::Closed)
            .await
            .unwrap();

        let result = repo
            .update_status(sr.id, ServiceRequestStatus::InProgress)
            .await;
        assert!(matches!(
            result,
            Err(PersistenceError::InvalidTransition { .. })
        ));
        let unchanged = repo.get_request(sr.id).await.unwrap().unwrap();
        assert_eq!(unchanged.status, ServiceRequestStatus::Closed);

        let reopened = repo
            .update_status(sr.id, ServiceRequestStatus::Open)
            .await
            .unwrap();
        assert_eq!(reopened.status, ServiceRequestStatus::Open);
    }

    #[tokio::test]
    async fn test_status_filter_returns_exact_subset() {
        let (_db, repo) = test_db().await;
        let a = repo.open_request(&sample_request("pothole")).await.unwrap();
        let b = repo.open_request(&sample_request("streetlight")).await.unwrap();
        repo.open_request(&sample_request("noise")).await.unwrap();
        repo.update_status(a.id, ServiceRequestStatus::Closed)
            .await
            .unwrap();
        repo.update_status(b.id, ServiceRequestStatus::InProgress)
            .await
            .unwrap();

        let open = repo
            .list_requests(Some(ServiceRequestStatus::Open), ListOrder::Id)
            .await
            .unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].category, "noise");

        let closed = repo
            .list_requests(Some(ServiceRequestStatus::Closed), ListOrder::Id)
            .await
            .unwrap();
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].id, a.id);

        let all = repo.list_requests(None, ListOrder::Id).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_newest_first_ordering() {
        let (_db, repo) = test_db().await;
        repo.open_request(&sample_request("old")).await.unwrap();
        repo.open_request(&sample_request("mid")).await.unwrap();
        repo.open_request(&sample_request("new")).await.unwrap();

        let list = repo
            .list_requests(None, ListOrder::NewestFirst)
            .await
            .unwrap();
        let categories: Vec<&str> = list.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(categories, vec!["new", "mid", "old"]);
    }
}
