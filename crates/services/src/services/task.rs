//! Business rules on top of the task repository.
//!
//! The service validates titles, rejects empty partial updates, normalizes
//! pagination, and checks that a row exists before mutating it. The
//! existence check and the mutation are two separate statements; a delete
//! racing in between surfaces as `TaskNotFound` from the second statement.

use db::{
    DBService,
    models::task::{CreateTask, Task, TaskFilter, UpdateTask},
};
use sqlx::SqlitePool;
use thiserror::Error;
use uuid::Uuid;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;
pub const MAX_TITLE_CHARS: usize = 255;

#[derive(Debug, Error)]
pub enum TaskServiceError {
    #[error("task not found")]
    TaskNotFound,
    #[error("invalid task title: {0}")]
    InvalidTitle(String),
    #[error("no fields supplied for update")]
    EmptyUpdate,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[derive(Clone)]
pub struct TaskService {
    db: DBService,
}

impl TaskService {
    pub fn new(db: DBService) -> Self {
        Self { db }
    }

    fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    pub async fn create_task(&self, data: &CreateTask) -> Result<Task, TaskServiceError> {
        validate_title(&data.title)?;

        let id = Uuid::new_v4();
        tracing::debug!(task_id = %id, title = %data.title, "creating task");

        Ok(Task::create(self.pool(), data, id).await?)
    }

    pub async fn get_task(&self, id: Uuid) -> Result<Task, TaskServiceError> {
        Task::find_by_id(self.pool(), id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound)
    }

    /// List one page of tasks plus the total matching count. Out-of-range
    /// page and page_size values fall back to their defaults.
    pub async fn list_tasks(
        &self,
        filter: &TaskFilter,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<(Vec<Task>, i64), TaskServiceError> {
        let (limit, offset) = normalize_pagination(page, page_size);
        Ok(Task::list(self.pool(), filter, limit, offset).await?)
    }

    pub async fn update_task(&self, id: Uuid, data: &UpdateTask) -> Result<Task, TaskServiceError> {
        self.get_task(id).await?;

        if let Some(title) = &data.title {
            validate_title(title)?;
        }
        if data.is_empty() {
            return Err(TaskServiceError::EmptyUpdate);
        }

        Task::update(self.pool(), id, data)
            .await?
            .ok_or(TaskServiceError::TaskNotFound)
    }

    pub async fn delete_task(&self, id: Uuid) -> Result<(), TaskServiceError> {
        self.get_task(id).await?;

        let deleted = Task::delete(self.pool(), id).await?;
        if deleted == 0 {
            return Err(TaskServiceError::TaskNotFound);
        }

        tracing::debug!(task_id = %id, "deleted task");
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<(), TaskServiceError> {
    if title.trim().is_empty() {
        return Err(TaskServiceError::InvalidTitle(
            "title must not be empty".to_string(),
        ));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(TaskServiceError::InvalidTitle(format!(
            "title must be at most {} characters",
            MAX_TITLE_CHARS
        )));
    }
    Ok(())
}

/// Convert (page, page_size) into (limit, offset). Page defaults to 1 when
/// absent or < 1; page_size defaults to 10 when absent or outside 1..=100.
pub fn normalize_pagination(page: Option<i64>, page_size: Option<i64>) -> (i64, i64) {
    let page = page.filter(|p| *p >= 1).unwrap_or(1);
    let page_size = page_size
        .filter(|s| (1..=MAX_PAGE_SIZE).contains(s))
        .unwrap_or(DEFAULT_PAGE_SIZE);
    (page_size, (page - 1).saturating_mul(page_size))
}

#[cfg(test)]
mod tests {
    use db::models::task::{TaskPriority, TaskStatus};
    use tempfile::TempDir;

    use super::*;

    async fn setup_service() -> (TaskService, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db = DBService::new_with_path(&db_path.to_string_lossy())
            .await
            .expect("Failed to open database");
        (TaskService::new(db), temp_dir)
    }

    fn sample_create(title: &str) -> CreateTask {
        CreateTask {
            title: title.to_string(),
            description: None,
            status: TaskStatus::Pending,
            priority: TaskPriority::Low,
            due_date: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_roundtrip() {
        let (service, _temp_dir) = setup_service().await;

        let task = service
            .create_task(&sample_create("Buy milk"))
            .await
            .expect("Create failed");
        assert_eq!(task.created_at, task.updated_at);

        let found = service.get_task(task.id).await.expect("Get failed");
        assert_eq!(found, task);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title() {
        let (service, _temp_dir) = setup_service().await;

        for title in ["", "   "] {
            let err = service.create_task(&sample_create(title)).await.unwrap_err();
            assert!(matches!(err, TaskServiceError::InvalidTitle(_)));
        }
    }

    #[tokio::test]
    async fn test_create_rejects_overlong_title() {
        let (service, _temp_dir) = setup_service().await;

        let err = service
            .create_task(&sample_create(&"x".repeat(256)))
            .await
            .unwrap_err();
        assert!(matches!(err, TaskServiceError::InvalidTitle(_)));

        // 255 characters is still within bounds.
        service
            .create_task(&sample_create(&"x".repeat(255)))
            .await
            .expect("Create failed");
    }

    #[tokio::test]
    async fn test_get_update_delete_missing_yield_not_found() {
        let (service, _temp_dir) = setup_service().await;
        let id = Uuid::new_v4();

        let err = service.get_task(id).await.unwrap_err();
        assert!(matches!(err, TaskServiceError::TaskNotFound));

        let data = UpdateTask {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        };
        let err = service.update_task(id, &data).await.unwrap_err();
        assert!(matches!(err, TaskServiceError::TaskNotFound));

        let err = service.delete_task(id).await.unwrap_err();
        assert!(matches!(err, TaskServiceError::TaskNotFound));
    }

    #[tokio::test]
    async fn test_empty_update_rejected_and_row_untouched() {
        let (service, _temp_dir) = setup_service().await;

        let task = service
            .create_task(&sample_create("Keep me"))
            .await
            .expect("Create failed");

        let err = service
            .update_task(task.id, &UpdateTask::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TaskServiceError::EmptyUpdate));

        let found = service.get_task(task.id).await.expect("Get failed");
        assert_eq!(found, task);
    }

    #[tokio::test]
    async fn test_update_rejects_blank_title() {
        let (service, _temp_dir) = setup_service().await;

        let task = service
            .create_task(&sample_create("Valid"))
            .await
            .expect("Create failed");

        let data = UpdateTask {
            title: Some("  ".to_string()),
            ..Default::default()
        };
        let err = service.update_task(task.id, &data).await.unwrap_err();
        assert!(matches!(err, TaskServiceError::InvalidTitle(_)));
    }

    #[tokio::test]
    async fn test_delete_then_get_yields_not_found() {
        let (service, _temp_dir) = setup_service().await;

        let task = service
            .create_task(&sample_create("Short-lived"))
            .await
            .expect("Create failed");

        service.delete_task(task.id).await.expect("Delete failed");

        let err = service.get_task(task.id).await.unwrap_err();
        assert!(matches!(err, TaskServiceError::TaskNotFound));
    }

    #[test]
    fn test_normalize_pagination_defaults() {
        assert_eq!(normalize_pagination(None, None), (10, 0));
        assert_eq!(normalize_pagination(Some(0), None), (10, 0));
        assert_eq!(normalize_pagination(Some(-3), None), (10, 0));
        assert_eq!(normalize_pagination(None, Some(0)), (10, 0));
        assert_eq!(normalize_pagination(None, Some(101)), (10, 0));
    }

    #[test]
    fn test_normalize_pagination_in_range() {
        assert_eq!(normalize_pagination(Some(1), Some(100)), (100, 0));
        assert_eq!(normalize_pagination(Some(3), Some(25)), (25, 50));
        assert_eq!(normalize_pagination(Some(2), None), (10, 10));
    }
}
