//! Plan CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension, Row};
use uuid::Uuid;

use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::Plan,
};

const INSERT_PLAN_SQL: &str =
    "INSERT INTO plans (id, user_id, goal, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_PLAN_SQL: &str =
    "SELECT id, user_id, goal, created_at, updated_at FROM plans WHERE id = ?1";
const SELECT_PLANS_BY_USER_SQL: &str = "SELECT id, user_id, goal, created_at, updated_at FROM plans WHERE user_id = ?1 ORDER BY created_at, rowid";
const SELECT_PLAN_ID_BY_TASK_SQL: &str = "SELECT plan_id FROM tasks WHERE id = ?1";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)";
const UPDATE_PLAN_SQL: &str = "UPDATE plans SET goal = ?1, updated_at = ?2 WHERE id = ?3";
const DELETE_PLAN_TASKS_SQL: &str = "DELETE FROM tasks WHERE plan_id = ?1";

impl super::Database {
    /// Helper function to construct a Plan (without tasks) from a database row
    fn build_plan_from_row(row: &Row) -> rusqlite::Result<Plan> {
        Ok(Plan {
            id: row.get(0)?,
            user_id: row.get(1)?,
            goal: row.get(2)?,
            tasks: Vec::new(),
            created_at: row.get::<_, String>(3)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e))
            })?,
            updated_at: row.get::<_, String>(4)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e))
            })?,
        })
    }

    /// Persists a new plan together with its whole task tree. Missing plan
    /// and task identifiers are assigned here.
    pub fn create_plan(&mut self, mut plan: Plan) -> Result<Plan> {
        if plan.id.is_empty() {
            plan.id = Uuid::now_v7().to_string();
        }
        for task in &mut plan.tasks {
            task.assign_ids();
        }

        let now = Timestamp::now();
        plan.created_at = now;
        plan.updated_at = now;
        let now_str = now.to_string();

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            INSERT_PLAN_SQL,
            params![plan.id, plan.user_id, plan.goal, &now_str, &now_str],
        )
        .db_context("Failed to insert plan")?;

        Self::insert_tasks(&tx, &plan.id, None, 0, &plan.tasks)?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(plan)
    }

    /// Retrieves a plan by its ID, with its task tree eagerly loaded.
    pub fn get_plan(&self, id: &str) -> Result<Option<Plan>> {
        let plan = self
            .connection
            .query_row(SELECT_PLAN_SQL, params![id], Self::build_plan_from_row)
            .optional()
            .db_context("Failed to query plan")?;

        match plan {
            Some(mut plan) => {
                plan.tasks = self.load_tasks(&plan.id)?;
                Ok(Some(plan))
            }
            None => Ok(None),
        }
    }

    /// Lists every plan owned by a user, oldest first.
    pub fn list_plans_by_user(&self, user_id: &str) -> Result<Vec<Plan>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PLANS_BY_USER_SQL)
            .db_context("Failed to prepare query")?;

        let mut plans = stmt
            .query_map(params![user_id], Self::build_plan_from_row)
            .db_context("Failed to query plans")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read plan rows")?;

        for plan in &mut plans {
            plan.tasks = self.load_tasks(&plan.id)?;
        }

        Ok(plans)
    }

    /// Returns the ID of the plan containing the given task.
    pub fn find_plan_id_by_task(&self, task_id: &str) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_PLAN_ID_BY_TASK_SQL, params![task_id], |row| row.get(0))
            .optional()
            .db_context("Failed to look up task")
    }

    /// Replaces the goal and the whole task tree of an existing plan.
    pub fn update_plan(&mut self, mut plan: Plan) -> Result<Plan> {
        for task in &mut plan.tasks {
            task.assign_ids();
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_PLAN_EXISTS_SQL, params![plan.id], |row| row.get(0))
            .db_context("Failed to check plan existence")?;
        if !exists {
            return Err(PlannerError::PlanNotFound { id: plan.id });
        }

        let now = Timestamp::now();
        tx.execute(UPDATE_PLAN_SQL, params![plan.goal, now.to_string(), plan.id])
            .db_context("Failed to update plan")?;
        tx.execute(DELETE_PLAN_TASKS_SQL, params![plan.id])
            .db_context("Failed to clear plan tasks")?;
        Self::insert_tasks(&tx, &plan.id, None, 0, &plan.tasks)?;

        tx.commit().db_context("Failed to commit transaction")?;

        plan.updated_at = now;
        Ok(plan)
    }
}
