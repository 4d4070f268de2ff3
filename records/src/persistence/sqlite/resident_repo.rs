//! SQLite-backed implementation of [`ResidentRepository`].

use sqlx::SqlitePool;

use crate::model::{NewResident, RecordId, Resident};
use crate::persistence::traits::ResidentRepository;
use crate::persistence::PersistenceError;

#[derive(sqlx::FromRow)]
struct ResidentRow {
    id: i64,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
}

impl From<ResidentRow> for Resident {
    fn from(r: ResidentRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            email: r.email,
            phone: r.phone,
            address: r.address,
        }
    }
}

#[derive(Clone)]
pub struct SqliteResidentRepository {
    pool: SqlitePool,
}

impl SqliteResidentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ResidentRepository for SqliteResidentRepository {
    async fn create_resident(&self, new: &NewResident) -> Result<Resident, PersistenceError> {
        new.validate()?;

        let row: ResidentRow = sqlx::query_as(
            "INSERT INTO residents (name, email, phone, address) \
             VALUES (?, ?, ?, ?) \
             RETURNING id, name, email, phone, address",
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.address)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = row.id, "inserted resident");
        Ok(row.into())
    }

    async fn list_residents(&self) -> Result<Vec<Resident>, PersistenceError> {
        let rows: Vec<ResidentRow> = sqlx::query_as(
            "SELECT id, name, email, phone, address FROM residents ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Resident::from).collect())
    }

    async fn get_resident(&self, id: RecordId) -> Result<Option<Resident>, PersistenceError> {
        let row: Option<ResidentRow> = sqlx::query_as(
            "SELECT id, name, email, phone, address FROM residents WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Resident::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::sqlite::Database;

    async fn test_db() -> (Database, SqliteResidentRepository) {
        let db = Database::new_in_memory().await.unwrap();
        let repo = SqliteResidentRepository::new(db.pool().clone());
        (db, repo)
    }

    fn sample_resident(name: &str) -> NewResident {
        NewResident {
            name: name.to_string(),
            email: Some(format!("{}@example.org", name.to_lowercase().replace(' ', "."))),
            phone: None,
            address: Some("12 Elm Road".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let (_db, repo) = test_db().await;
        let a = repo.create_resident(&sample_resident("A. Smith")).await.unwrap();
        let b = repo.create_resident(&sample_resident("B. Jones")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.name, "A. Smith");
        assert_eq!(a.address.as_deref(), Some("12 Elm Road"));
        assert_eq!(a.phone, None);
    }

    #[tokio::test]
    async fn test_get_roundtrip() {
        let (_db, repo) = test_db().await;
        let created = repo.create_resident(&sample_resident("A. Smith")).await.unwrap();
        let loaded = repo.get_resident(created.id).await.unwrap();
        assert_eq!(loaded, Some(created));
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let (_db, repo) = test_db().await;
        assert_eq!(repo.get_resident(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_in_insertion_order() {
        let (_db, repo) = test_db().await;
        repo.create_resident(&sample_resident("First")).await.unwrap();
        repo.create_resident(&sample_resident("Second")).await.unwrap();
        let list = repo.list_residents().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].name, "First");
        assert_eq!(list[1].name, "Second");
    }

    #[tokio::test]
    async fn test_blank_name_rejected_before_insert() {
        let (_db, repo) = test_db().await;
        let result = repo.create_resident(&sample_resident(" ")).await;
        assert!(matches!(
            result,
            Err(PersistenceError::Validation { field: "name", .. })
        ));
        assert!(repo.list_residents().await.unwrap().is_empty());
    }
}
