use db::DBService;
use services::services::task::TaskService;

pub mod error;
pub mod response;
pub mod routes;

/// Shared handler state, constructed once in `main` and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub db: DBService,
    pub task_service: TaskService,
}

impl AppState {
    pub fn new(db: DBService) -> Self {
        let task_service = TaskService::new(db.clone());
        Self { db, task_service }
    }
}
