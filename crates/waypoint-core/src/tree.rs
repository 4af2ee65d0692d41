//! Traversal of task trees.
//!
//! Every recursive computation over a plan (risk scanning, progress
//! counting, lookups by id, status updates) goes through the functions in
//! this module so the recursion semantics live in one place: tasks are
//! visited depth-first, parents before their subtasks, siblings in order.

use crate::models::Task;

/// Calls `f` for every task at every depth, together with its depth
/// (0 for top-level tasks).
pub fn visit<'a, F>(tasks: &'a [Task], f: &mut F)
where
    F: FnMut(&'a Task, usize),
{
    visit_at(tasks, 0, f);
}

fn visit_at<'a, F>(tasks: &'a [Task], depth: usize, f: &mut F)
where
    F: FnMut(&'a Task, usize),
{
    for task in tasks {
        f(task, depth);
        visit_at(&task.subtasks, depth + 1, f);
    }
}

/// Calls `f` with mutable access to every task at every depth.
pub fn visit_mut<F>(tasks: &mut [Task], f: &mut F)
where
    F: FnMut(&mut Task),
{
    for task in tasks.iter_mut() {
        f(task);
        visit_mut(&mut task.subtasks, f);
    }
}

/// Finds the task with the given id anywhere in the tree.
pub fn find<'a>(tasks: &'a [Task], id: &str) -> Option<&'a Task> {
    for task in tasks {
        if task.id == id {
            return Some(task);
        }
        if let Some(found) = find(&task.subtasks, id) {
            return Some(found);
        }
    }
    None
}

/// Finds the task with the given id anywhere in the tree, mutably.
pub fn find_mut<'a>(tasks: &'a mut [Task], id: &str) -> Option<&'a mut Task> {
    for task in tasks.iter_mut() {
        if task.id == id {
            return Some(task);
        }
        if let Some(found) = find_mut(&mut task.subtasks, id) {
            return Some(found);
        }
    }
    None
}

/// Number of tasks in the tree, all depths included.
pub fn count(tasks: &[Task]) -> usize {
    let mut total = 0;
    visit(tasks, &mut |_, _| total += 1);
    total
}
