//! SQLite-backed repository for follow-up tasks.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use super::helpers::{decode_status, placeholders};
use crate::model::{NewTask, RecordId, RecordKind, Task, TaskStatus};
use crate::persistence::traits::TaskRepository;
use crate::persistence::PersistenceError;

const COLUMNS: &str = "id, title, due_date, assigned_to, status, notes";

#[derive(sqlx::FromRow)]
struct TaskRow {
    id: i64,
    title: String,
    due_date: Option<NaiveDate>,
    assigned_to: Option<String>,
    status: String,
    notes: Option<String>,
}

impl TryFrom<TaskRow> for Task {
    type Error = PersistenceError;

    fn try_from(r: TaskRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            title: r.title,
            due_date: r.due_date,
            assigned_to: r.assigned_to,
            status: decode_status("tasks.status", &r.status)?,
            notes: r.notes,
        })
    }
}

#[derive(Clone)]
pub struct SqliteTaskRepository {
    pool: SqlitePool,
}

impl SqliteTaskRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl TaskRepository for SqliteTaskRepository {
    async fn create_task(&self, new: &NewTask) -> Result<Task, PersistenceError> {
        new.validate()?;

        let row: TaskRow = sqlx::query_as(&format!(
            "INSERT INTO tasks (title, due_date, assigned_to, status, notes) \
             VALUES (?, ?, ?, ?, ?) \
             RETURNING {COLUMNS}"
        ))
        .bind(&new.title)
        .bind(new.due_date)
        .bind(&new.assigned_to)
        .bind(TaskStatus::Todo.as_str())
        .bind(&new.notes)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = row.id, "added task");
        row.try_into()
    }

    async fn list_tasks(&self, status: Option<TaskStatus>) -> Result<Vec<Task>, PersistenceError> {
        let rows: Vec<TaskRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM tasks WHERE (?1 IS NULL OR status = ?1) ORDER BY id ASC"
        ))
        .bind(status.map(TaskStatus::as_str))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn get_task(&self, id: RecordId) -> Result<Option<Task>, PersistenceError> {
        let row: Option<TaskRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM tasks WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(Task::try_from).transpose()
    }

    async fn update_task_status(
        &self,
        id: RecordId,
        status: TaskStatus,
    ) -> Result<Task, PersistenceError> {
        let sources = TaskStatus::sources_for(status);
        let sql = format!(
            "UPDATE tasks SET status = ? WHERE id = ? AND status IN ({}) RETURNING {COLUMNS}",
            placeholders(sources.len())
        );
        let mut query = sqlx::query_as::<_, TaskRow>(&sql)
            .bind(status.as_str())
            .bind(id);
        for source in &sources {
            query = query.bind(source.as_str());
        }

        if let Some(row) = query.fetch_optional(&self.pool).await? {
            tracing::debug!(id, to = %status, "updated task status");
            return row.try_into();
        }

        let current = self.get_task(id).await?.ok_or(PersistenceError::NotFound {
            kind: RecordKind::Task,
            id,
        })?;
        Err(PersistenceError::InvalidTransition {
            kind: RecordKind::Task,
            id,
            from: current.status.as_str(),
            to: status.as_str(),
        })
    }
}
