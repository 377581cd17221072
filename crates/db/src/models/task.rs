//! Task model and its CRUD query operations.
//!
//! A task is a unit of work with a status, a priority and an optional due
//! date. Rows live in the `tasks` table; ids are generated by the caller
//! and timestamps are bound here so `created_at == updated_at` holds
//! exactly on insert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, Type, Serialize, Deserialize, PartialEq, Eq, EnumString, Display, Default,
)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

#[derive(
    Debug, Clone, Copy, Type, Serialize, Deserialize, PartialEq, Eq, EnumString, Display, Default,
)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
}

/// Partial update. Absent fields are left untouched.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<DateTime<Utc>>,
}

impl UpdateTask {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }
}

/// Optional equality filters for list queries, ANDed when both are present.
#[derive(Debug, Default, Clone, Copy)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

const TASK_COLUMNS: &str =
    "id, title, description, status, priority, due_date, created_at, updated_at";

/// Append the WHERE clause for `filter`, binding values positionally.
fn push_filter(query: &mut QueryBuilder<'_, Sqlite>, filter: &TaskFilter) {
    let mut keyword = " WHERE ";
    if let Some(status) = filter.status {
        query.push(keyword).push("status = ").push_bind(status);
        keyword = " AND ";
    }
    if let Some(priority) = filter.priority {
        query.push(keyword).push("priority = ").push_bind(priority);
    }
}

impl Task {
    pub async fn create(
        pool: &SqlitePool,
        data: &CreateTask,
        id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        let now = Utc::now();
        sqlx::query_as::<_, Task>(
            r#"INSERT INTO tasks (id, title, description, status, priority, due_date, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               RETURNING id, title, description, status, priority, due_date, created_at, updated_at"#,
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.status)
        .bind(data.priority)
        .bind(data.due_date)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"SELECT id, title, description, status, priority, due_date, created_at, updated_at
               FROM tasks
               WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Return one page of tasks plus the total count of rows matching the
    /// filter. Count and page are two separate statements; writes landing
    /// between them can skew the pair.
    pub async fn list(
        pool: &SqlitePool,
        filter: &TaskFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Self>, i64), sqlx::Error> {
        let mut count_query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM tasks");
        push_filter(&mut count_query, filter);
        let total: i64 = count_query.build_query_scalar().fetch_one(pool).await?;

        let mut page_query =
            QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM tasks", TASK_COLUMNS));
        push_filter(&mut page_query, filter);
        page_query.push(" ORDER BY created_at DESC LIMIT ");
        page_query.push_bind(limit);
        page_query.push(" OFFSET ");
        page_query.push_bind(offset);

        let tasks = page_query.build_query_as::<Task>().fetch_all(pool).await?;

        Ok((tasks, total))
    }

    /// Apply the supplied fields and refresh `updated_at`. Returns `None`
    /// when no row matches `id`. Callers must supply at least one field.
    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = QueryBuilder::<Sqlite>::new("UPDATE tasks SET ");

        let mut fields = query.separated(", ");
        if let Some(title) = &data.title {
            fields.push("title = ").push_bind_unseparated(title.clone());
        }
        if let Some(description) = &data.description {
            fields
                .push("description = ")
                .push_bind_unseparated(description.clone());
        }
        if let Some(status) = data.status {
            fields.push("status = ").push_bind_unseparated(status);
        }
        if let Some(priority) = data.priority {
            fields.push("priority = ").push_bind_unseparated(priority);
        }
        if let Some(due_date) = data.due_date {
            fields.push("due_date = ").push_bind_unseparated(due_date);
        }
        fields
            .push("updated_at = ")
            .push_bind_unseparated(Utc::now());

        query.push(" WHERE id = ").push_bind(id);
        query.push(format!(" RETURNING {}", TASK_COLUMNS));

        query.build_query_as::<Task>().fetch_optional(pool).await
    }

    /// Hard delete. Returns the number of rows removed (0 or 1).
    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
