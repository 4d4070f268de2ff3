//! SQLite-backed implementation of [`ContactRepository`].

use sqlx::SqlitePool;

use crate::model::{Contact, NewContact, RecordId};
use crate::persistence::traits::ContactRepository;
use crate::persistence::PersistenceError;

#[derive(sqlx::FromRow)]
struct ContactRow {
    id: i64,
    department: String,
    name: String,
    email: Option<String>,
    phone: Option<String>,
}

impl From<ContactRow> for Contact {
    fn from(r: ContactRow) -> Self {
        Self {
            id: r.id,
            department: r.department,
            name: r.name,
            email: r.email,
            phone: r.phone,
        }
    }
}

#[derive(Clone)]
pub struct SqliteContactRepository {
    pool: SqlitePool,
}

impl SqliteContactRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ContactRepository for SqliteContactRepository {
    async fn create_contact(&self, new: &NewContact) -> Result<Contact, PersistenceError> {
        new.validate()?;

        let row: ContactRow = sqlx::query_as(
            "INSERT INTO contacts (department, name, email, phone) \
             VALUES (?, ?, ?, ?) \
             RETURNING id, department, name, email, phone",
        )
        .bind(&new.department)
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list_contacts(
        &self,
        department: Option<&str>,
    ) -> Result<Vec<Contact>, PersistenceError> {
        let rows: Vec<ContactRow> = sqlx::query_as(
            "SELECT id, department, name, email, phone FROM contacts \
             WHERE (?1 IS NULL OR department = ?1) \
             ORDER BY id ASC",
        )
        .bind(department)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Contact::from).collect())
    }

    async fn get_contact(&self, id: RecordId) -> Result<Option<Contact>, PersistenceError> {
        let row: Option<ContactRow> = sqlx::query_as(
            "SELECT id, department, name, email, phone FROM contacts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Contact::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::sqlite::Database;

    fn make_contact(department: &str, name: &str) -> NewContact {
        NewContact {
            department: department.to_string(),
            name: name.to_string(),
            email: None,
            phone: Some("555-0100".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_roundtrip() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = SqliteContactRepository::new(db.pool().clone());

        let created = repo
            .create_contact(&make_contact("Public Works", "R. Diaz"))
            .await
            .unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.department, "Public Works");
        assert_eq!(created.phone.as_deref(), Some("555-0100"));

        let loaded = repo.get_contact(created.id).await.unwrap();
        assert_eq!(loaded, Some(created));
    }

    #[tokio::test]
    async fn test_department_filter_is_exact() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = SqliteContactRepository::new(db.pool().clone());

        repo.create_contact(&make_contact("Public Works", "R. Diaz"))
            .await
            .unwrap();
        repo.create_contact(&make_contact("Parks", "L. Chen"))
            .await
            .unwrap();
        repo.create_contact(&make_contact("Public Works", "M. Okafor"))
            .await
            .unwrap();

        let works = repo.list_contacts(Some("Public Works")).await.unwrap();
        let names: Vec<&str> = works.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["R. Diaz", "M. Okafor"]);

        assert!(repo.list_contacts(Some("public works")).await.unwrap().is_empty());
        assert_eq!(repo.list_contacts(None).await.unwrap().len(), 3);
    }
}
