//! Task tree persistence: flattening trees into rows and rebuilding them.

use std::collections::HashMap;

use jiff::Timestamp;
use rusqlite::{params, types::Type, Connection, OptionalExtension, Row};

use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{Plan, Task, TaskStatus},
};

const INSERT_TASK_SQL: &str = "INSERT INTO tasks (id, plan_id, parent_id, position, title, description, status, deadline) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const SELECT_TASKS_BY_PLAN_SQL: &str = "SELECT id, parent_id, title, description, status, deadline FROM tasks WHERE plan_id = ?1 ORDER BY position";
const SELECT_TASK_PLAN_SQL: &str = "SELECT plan_id FROM tasks WHERE id = ?1";
const GET_NEXT_CHILD_POSITION_SQL: &str =
    "SELECT COALESCE(MAX(position), -1) + 1 FROM tasks WHERE parent_id = ?1";
const UPDATE_PLAN_TIMESTAMP_SQL: &str = "UPDATE plans SET updated_at = ?1 WHERE id = ?2";

impl super::Database {
    /// Helper function to construct a Task and its parent ID from a row
    fn build_task_from_row(row: &Row) -> rusqlite::Result<(Option<String>, Task)> {
        let deadline = row
            .get::<_, Option<String>>(5)?
            .map(|s| s.parse::<Timestamp>())
            .transpose()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

        let task = Task {
            id: row.get(0)?,
            title: row.get(2)?,
            description: row.get(3)?,
            status: TaskStatus::from(row.get::<_, String>(4)?),
            deadline,
            subtasks: Vec::new(),
        };
        Ok((row.get(1)?, task))
    }

    /// Loads the task tree of a plan.
    pub(crate) fn load_tasks(&self, plan_id: &str) -> Result<Vec<Task>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_TASKS_BY_PLAN_SQL)
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map(params![plan_id], Self::build_task_from_row)
            .db_context("Failed to query tasks")?;

        let mut children: HashMap<Option<String>, Vec<Task>> = HashMap::new();
        for row in rows {
            let (parent_id, task) = row.db_context("Failed to read task row")?;
            children.entry(parent_id).or_default().push(task);
        }

        Ok(Self::assemble(&mut children, None))
    }

    /// Attaches children to their parents, starting from `parent`. Each
    /// sibling list is taken out of the map once, so this terminates even
    /// for malformed parent pointers.
    fn assemble(children: &mut HashMap<Option<String>, Vec<Task>>, parent: Option<String>) -> Vec<Task> {
        let mut tasks = children.remove(&parent).unwrap_or_default();
        for task in &mut tasks {
            task.subtasks = Self::assemble(children, Some(task.id.clone()));
        }
        tasks
    }

    /// Inserts `tasks` (and their subtrees) as children of `parent_id`,
    /// numbering positions from `first_position`.
    pub(crate) fn insert_tasks(
        conn: &Connection,
        plan_id: &str,
        parent_id: Option<&str>,
        first_position: i64,
        tasks: &[Task],
    ) -> Result<()> {
        for (offset, task) in tasks.iter().enumerate() {
            conn.execute(
                INSERT_TASK_SQL,
                params![
                    task.id,
                    plan_id,
                    parent_id,
                    first_position + offset as i64,
                    task.title,
                    task.description,
                    task.status.as_str(),
                    task.deadline.map(|d| d.to_string()),
                ],
            )
            .db_context("Failed to insert task")?;

            Self::insert_tasks(conn, plan_id, Some(&task.id), 0, &task.subtasks)?;
        }
        Ok(())
    }

    /// Appends subtasks to an existing task of a plan, after any subtasks
    /// it already has, and returns the updated plan.
    pub fn append_subtasks(&mut self, plan_id: &str, task_id: &str, mut subtasks: Vec<Task>) -> Result<Plan> {
        for subtask in &mut subtasks {
            subtask.assign_ids();
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let owner: Option<String> = tx
            .query_row(SELECT_TASK_PLAN_SQL, params![task_id], |row| row.get(0))
            .optional()
            .db_context("Failed to look up parent task")?;

        match owner {
            Some(owner) if owner == plan_id => {}
            _ => {
                return Err(PlannerError::TaskNotFound {
                    id: task_id.to_string(),
                })
            }
        }

        let next_position: i64 = tx
            .query_row(GET_NEXT_CHILD_POSITION_SQL, params![task_id], |row| row.get(0))
            .db_context("Failed to get next subtask position")?;

        Self::insert_tasks(&tx, plan_id, Some(task_id), next_position, &subtasks)?;

        tx.execute(UPDATE_PLAN_TIMESTAMP_SQL, params![Timestamp::now().to_string(), plan_id])
            .db_context("Failed to update plan timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_plan(plan_id)?.ok_or_else(|| PlannerError::PlanNotFound {
            id: plan_id.to_string(),
        })
    }
}
