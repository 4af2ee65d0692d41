//! Plan and task operations.

use jiff::Timestamp;
use log::info;

use super::Planner;
use crate::{
    draft,
    error::{PlannerError, Result},
    models::{Plan, PlanDraft, Task, TaskStatus},
    params::{AddSubtasks, ConfirmPlan, DraftPlan, Id, ListPlans, TaskInput, UpdateTaskStatus},
    tools, tree,
};

impl Planner {
    /// Drafts tasks for a goal without saving them. Deadlines avoid the
    /// dates on which the user already has at-risk tasks.
    pub async fn draft_plan(&self, params: &DraftPlan) -> Result<PlanDraft> {
        tools::require("user_id", &params.user_id)?;
        let deadline = params.deadline_date()?;

        let tasks = draft::draft_for_user(
            self.store.as_ref(),
            self.generator.as_ref(),
            &params.user_id,
            &params.goal,
            deadline,
            Timestamp::now(),
        )
        .await?;

        Ok(PlanDraft {
            goal: params.goal.trim().to_string(),
            tasks,
        })
    }

    /// Saves a plan with the given tasks. Missing task IDs are assigned at
    /// every depth; tasks without a status are `Pending`.
    pub async fn confirm_plan(&self, params: &ConfirmPlan) -> Result<Plan> {
        tools::require("user_id", &params.user_id)?;
        tools::require("goal", &params.goal)?;

        let tasks = into_tasks(&params.tasks)?;
        let now = Timestamp::now();
        let plan = self
            .store
            .create(Plan {
                id: String::new(),
                user_id: params.user_id.clone(),
                goal: params.goal.trim().to_string(),
                tasks,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!("Created plan {} for {}", plan.id, plan.user_id);
        Ok(plan)
    }

    /// Lists the user's plans, oldest first.
    pub async fn list_plans(&self, params: &ListPlans) -> Result<Vec<Plan>> {
        tools::require("user_id", &params.user_id)?;
        self.store.get_all_by_user(&params.user_id).await
    }

    /// Retrieves a plan with its task tree.
    pub async fn get_plan(&self, params: &Id) -> Result<Plan> {
        self.store.get_by_id(&params.id).await
    }

    /// Retrieves a task, at any depth, with its subtasks.
    pub async fn get_task(&self, params: &Id) -> Result<Task> {
        let plan = self.store.get_by_task_id(&params.id).await?;
        tree::find(&plan.tasks, &params.id)
            .cloned()
            .ok_or_else(|| PlannerError::TaskNotFound { id: params.id.clone() })
    }

    /// Sets the status of a task, at any depth, and returns the task.
    pub async fn update_task_status(&self, params: &UpdateTaskStatus) -> Result<Task> {
        tools::require("status", &params.status)?;

        let mut plan = self.store.get_by_task_id(&params.task_id).await?;
        let task = tree::find_mut(&mut plan.tasks, &params.task_id).ok_or_else(|| PlannerError::TaskNotFound {
            id: params.task_id.clone(),
        })?;
        task.status = TaskStatus::from(params.status.as_str());
        let updated = task.clone();

        self.store.update(plan).await?;
        info!("Task {} is now {}", updated.id, updated.status.as_str());
        Ok(updated)
    }

    /// Appends subtasks, in order, under a task of the plan.
    pub async fn add_subtasks(&self, params: &AddSubtasks) -> Result<Plan> {
        if params.subtasks.is_empty() {
            return Err(PlannerError::invalid_input("subtasks").with_reason("at least one subtask is required"));
        }

        let subtasks = into_tasks(&params.subtasks)?;
        self.store
            .append_subtasks(&params.plan_id, &params.task_id, subtasks)
            .await
    }

    /// Asks the text generator to break a task into subtasks. The
    /// suggestions are returned, not saved.
    pub async fn refine_task(&self, params: &Id) -> Result<Vec<Task>> {
        let task = self.get_task(params).await?;
        draft::refine_task(self.generator.as_ref(), &task, draft::today(Timestamp::now())).await
    }
}

fn into_tasks(inputs: &[TaskInput]) -> Result<Vec<Task>> {
    inputs
        .iter()
        .cloned()
        .map(|input| {
            let mut task = input.into_task()?;
            task.assign_ids();
            Ok(task)
        })
        .collect()
}
