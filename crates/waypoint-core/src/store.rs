//! Plan persistence behind the [`PlanStore`] trait.
//!
//! The command engine only ever talks to a `dyn PlanStore`, so the storage
//! backend is chosen by whoever builds the [`crate::Planner`]. The crate
//! ships [`SqlitePlanStore`], which runs each call on tokio's blocking pool
//! against a fresh rusqlite connection.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;
use tokio::task;

use crate::{
    db::Database,
    error::{PlannerError, Result, ResultExt},
    models::{Plan, Task},
};

/// Fetches and persists plans.
///
/// Not-found conditions are reported as [`PlannerError::PlanNotFound`] or
/// [`PlannerError::TaskNotFound`].
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// All plans owned by `user_id`, in store order.
    async fn get_all_by_user(&self, user_id: &str) -> Result<Vec<Plan>>;

    /// The plan with the given id.
    async fn get_by_id(&self, plan_id: &str) -> Result<Plan>;

    /// The plan whose tree contains the task with the given id.
    async fn get_by_task_id(&self, task_id: &str) -> Result<Plan>;

    /// Persists a new plan, assigning missing identifiers.
    async fn create(&self, plan: Plan) -> Result<Plan>;

    /// Replaces an existing plan's goal and task tree.
    async fn update(&self, plan: Plan) -> Result<Plan>;

    /// Appends subtasks, in order, to a task of the plan.
    async fn append_subtasks(&self, plan_id: &str, task_id: &str, subtasks: Vec<Task>) -> Result<Plan>;
}

/// SQLite-backed [`PlanStore`].
#[derive(Debug, Clone)]
pub struct SqlitePlanStore {
    db_path: PathBuf,
}

impl SqlitePlanStore {
    /// Opens (creating if needed) the database at `path` and initializes
    /// its schema.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| PlannerError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let store = Self { db_path };
        store.run(|_| Ok(())).await?;
        Ok(store)
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Runs `op` against a fresh connection on the blocking pool.
    async fn run<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .with_context("Task join error")?
    }
}

#[async_trait]
impl PlanStore for SqlitePlanStore {
    async fn get_all_by_user(&self, user_id: &str) -> Result<Vec<Plan>> {
        debug!("get_all_by_user: {user_id}");
        let user_id = user_id.to_string();
        self.run(move |db| db.list_plans_by_user(&user_id)).await
    }

    async fn get_by_id(&self, plan_id: &str) -> Result<Plan> {
        debug!("get_by_id: {plan_id}");
        let plan_id = plan_id.to_string();
        self.run(move |db| {
            db.get_plan(&plan_id)?
                .ok_or(PlannerError::PlanNotFound { id: plan_id })
        })
        .await
    }

    async fn get_by_task_id(&self, task_id: &str) -> Result<Plan> {
        debug!("get_by_task_id: {task_id}");
        let task_id = task_id.to_string();
        self.run(move |db| {
            let plan_id = db
                .find_plan_id_by_task(&task_id)?
                .ok_or_else(|| PlannerError::TaskNotFound { id: task_id.clone() })?;
            db.get_plan(&plan_id)?
                .ok_or(PlannerError::PlanNotFound { id: plan_id })
        })
        .await
    }

    async fn create(&self, plan: Plan) -> Result<Plan> {
        debug!("create: goal '{}' for user {}", plan.goal, plan.user_id);
        self.run(move |db| db.create_plan(plan)).await
    }

    async fn update(&self, plan: Plan) -> Result<Plan> {
        debug!("update: {}", plan.id);
        self.run(move |db| db.update_plan(plan)).await
    }

    async fn append_subtasks(&self, plan_id: &str, task_id: &str, subtasks: Vec<Task>) -> Result<Plan> {
        debug!("append_subtasks: {} subtasks under {task_id}", subtasks.len());
        let plan_id = plan_id.to_string();
        let task_id = task_id.to_string();
        self.run(move |db| db.append_subtasks(&plan_id, &task_id, subtasks))
            .await
    }
}
