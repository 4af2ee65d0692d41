//! Drafting task lists with the text generator.
//!
//! Generated lists are parsed defensively: the reply is tried as JSON
//! first, then the text between its first `[` and last `]`. A reply that
//! still does not parse yields an empty list rather than an error, while
//! failures of the generator itself propagate.

use std::collections::BTreeSet;

use jiff::{civil::Date, tz::TimeZone, Timestamp};
use log::{debug, warn};
use serde::Deserialize;

use crate::{
    error::{PlannerError, Result},
    llm::TextGenerator,
    models::{Task, TaskStatus},
    store::PlanStore,
    tools::risk,
};

/// Planning window used when no deadline is given.
pub const DEFAULT_WINDOW_DAYS: i64 = 14;

const MIN_TASKS: i64 = 3;
const MAX_TASKS: i64 = 20;

#[derive(Debug, Deserialize)]
struct DraftTask {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    deadline: Option<String>,
}

/// Today's date in UTC.
pub fn today(now: Timestamp) -> Date {
    now.to_zoned(TimeZone::UTC).date()
}

/// Midnight UTC at the start of `date`.
pub fn start_of_day(date: Date) -> Result<Timestamp> {
    date.to_zoned(TimeZone::UTC)
        .map(|zoned| zoned.timestamp())
        .map_err(|e| PlannerError::invalid_input("deadline").with_reason(e.to_string()))
}

/// Number of tasks to ask for: half the days in the window, within 3..=20.
pub fn task_count(today: Date, deadline: Date) -> i64 {
    let days = today.until(deadline).map(|span| span.get_days()).unwrap_or(0) as i64;
    (days / 2).clamp(MIN_TASKS, MAX_TASKS)
}

/// Drafts tasks for `goal` due by `deadline` (default: two weeks from
/// `today`). Nothing is persisted.
pub async fn draft_tasks(
    generator: &dyn TextGenerator,
    goal: &str,
    deadline: Option<Date>,
    today: Date,
) -> Result<Vec<Task>> {
    if goal.trim().is_empty() {
        return Err(PlannerError::invalid_input("goal").with_reason("must not be empty"));
    }

    let deadline = match deadline {
        Some(deadline) => deadline,
        None => today
            .checked_add(jiff::Span::new().days(DEFAULT_WINDOW_DAYS))
            .map_err(|e| PlannerError::invalid_input("deadline").with_reason(e.to_string()))?,
    };
    if deadline < today {
        return Err(PlannerError::invalid_input("deadline").with_reason(format!("{deadline} is in the past")));
    }

    let count = task_count(today, deadline);
    let prompt = format!(
        r#"You are an expert AI task planner.
Today is {today}. Generate {count} actionable, detailed tasks for this goal, to be finished by {deadline}:
"{goal}"
Each task must have:
- title
- description
- deadline (YYYY-MM-DD, evenly distributed between {today} and {deadline})
Return ONLY valid JSON:
[
  {{"title": "...", "description": "...", "deadline": "..."}}
]"#
    );

    let reply = generator.generate(&prompt).await?;
    let tasks = parse_task_list(&reply, today);
    debug!("draft_tasks: asked for {count}, parsed {}", tasks.len());
    Ok(tasks)
}

/// Drafts tasks like [`draft_tasks`], then moves their deadlines off the
/// dates on which the user already has at-risk work. Deadlines dated in a
/// past year are first moved into the current year.
pub async fn draft_for_user(
    store: &dyn PlanStore,
    generator: &dyn TextGenerator,
    user_id: &str,
    goal: &str,
    deadline: Option<Date>,
    now: Timestamp,
) -> Result<Vec<Task>> {
    let current = today(now);
    let mut tasks = draft_tasks(generator, goal, deadline, current).await?;

    let plans = store.get_all_by_user(user_id).await?;
    let busy: BTreeSet<Date> = risk::report(user_id, &plans, now, risk::DEFAULT_THRESHOLD_DAYS)
        .risks
        .iter()
        .filter_map(|item| item.deadline.parse::<Date>().ok())
        .collect();
    debug!("draft_for_user: {} busy dates", busy.len());

    for task in &mut tasks {
        let Some(deadline) = task.deadline else {
            continue;
        };
        let date = avoid_dates(into_year(today(deadline), current.year()), &busy);
        task.deadline = Some(start_of_day(date)?);
    }

    Ok(tasks)
}

/// Breaks a task into draft subtasks. Nothing is persisted.
pub async fn refine_task(generator: &dyn TextGenerator, task: &Task, today: Date) -> Result<Vec<Task>> {
    if task.title.trim().is_empty() {
        return Err(PlannerError::invalid_input("title").with_reason("must not be empty"));
    }

    let prompt = format!(
        r#"You are an AI task assistant.
Today is {today}. Break the following task into detailed actionable subtasks:
Task: "{title}"
Description: "{description}"
Return ONLY valid JSON:
[
  {{"title": "...", "description": "...", "deadline": "YYYY-MM-DD"}}
]"#,
        title = task.title,
        description = task.description,
    );

    let reply = generator.generate(&prompt).await?;
    Ok(parse_task_list(&reply, today))
}

/// Parses a generated task list. Entries without a title are dropped;
/// missing or unparsable deadlines become `today + (index + 1)` days.
pub fn parse_task_list(reply: &str, today: Date) -> Vec<Task> {
    let drafts = match serde_json::from_str::<Vec<DraftTask>>(reply.trim()) {
        Ok(drafts) => drafts,
        Err(_) => match bracketed(reply).map(serde_json::from_str::<Vec<DraftTask>>) {
            Some(Ok(drafts)) => drafts,
            _ => {
                warn!("Could not parse generated task list ({} chars)", reply.len());
                return Vec::new();
            }
        },
    };

    drafts
        .into_iter()
        .enumerate()
        .filter(|(_, draft)| !draft.title.trim().is_empty())
        .map(|(index, draft)| {
            let deadline = draft
                .deadline
                .as_deref()
                .and_then(parse_deadline)
                .or_else(|| fallback_deadline(today, index));
            Task {
                id: String::new(),
                title: draft.title.trim().to_string(),
                description: draft.description.trim().to_string(),
                status: TaskStatus::Pending,
                deadline,
                subtasks: Vec::new(),
            }
        })
        .collect()
}

fn bracketed(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (start < end).then(|| &text[start..=end])
}

fn parse_deadline(text: &str) -> Option<Timestamp> {
    let text = text.trim();
    if let Ok(timestamp) = text.parse::<Timestamp>() {
        return Some(timestamp);
    }
    text.parse::<Date>().ok().and_then(|date| start_of_day(date).ok())
}

fn fallback_deadline(today: Date, index: usize) -> Option<Timestamp> {
    let offset = i64::try_from(index).ok()?.checked_add(1)?;
    let date = today.checked_add(jiff::Span::new().try_days(offset).ok()?).ok()?;
    start_of_day(date).ok()
}

/// Moves a date from a past year into `year`, keeping month and day and
/// clamping the day to the length of the month.
fn into_year(date: Date, year: i16) -> Date {
    if date.year() >= year {
        return date;
    }
    let Ok(first) = Date::new(year, date.month(), 1) else {
        return date;
    };
    let day = date.day().min(first.days_in_month());
    Date::new(year, date.month(), day).unwrap_or(date)
}

/// The first date on or after `date` that is not in `busy`.
fn avoid_dates(mut date: Date, busy: &BTreeSet<Date>) -> Date {
    while busy.contains(&date) {
        match date.tomorrow() {
            Ok(next) => date = next,
            Err(_) => break,
        }
    }
    date
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use tempfile::TempDir;

    use super::*;
    use crate::{llm::mock::ScriptedGenerator, models::Plan, store::SqlitePlanStore};

    fn day(text: &str) -> Timestamp {
        start_of_day(text.parse().unwrap()).unwrap()
    }

    #[test]
    fn test_parse_plain_json() {
        let reply = r#"[{"title": "Pick platform", "description": "Compare hosts", "deadline": "2026-10-22"}]"#;

        let tasks = parse_task_list(reply, date(2026, 10, 19));

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Pick platform");
        assert_eq!(tasks[0].description, "Compare hosts");
        assert_eq!(tasks[0].status, TaskStatus::Pending);
        assert_eq!(tasks[0].deadline, Some(day("2026-10-22")));
    }

    #[test]
    fn test_parse_fenced_json_with_bad_deadlines() {
        let reply = "Here you go:\n```json\n[\n {\"title\": \"a\", \"deadline\": \"next week\"},\n {\"title\": \"b\"},\n {\"title\": \"\"}\n]\n```";

        let tasks = parse_task_list(reply, date(2026, 10, 19));

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].deadline, Some(day("2026-10-20")));
        assert_eq!(tasks[1].deadline, Some(day("2026-10-21")));
    }

    #[test]
    fn test_parse_garbage_is_empty() {
        assert!(parse_task_list("I cannot help with that.", date(2026, 10, 19)).is_empty());
        assert!(parse_task_list("] backwards [", date(2026, 10, 19)).is_empty());
    }

    #[test]
    fn test_task_count_is_clamped() {
        let today = date(2026, 10, 19);
        assert_eq!(task_count(today, date(2026, 10, 20)), 3);
        assert_eq!(task_count(today, date(2026, 11, 2)), 7);
        assert_eq!(task_count(today, date(2027, 10, 19)), 20);
    }

    #[test]
    fn test_into_year_clamps_day() {
        assert_eq!(into_year(date(2023, 3, 9), 2026), date(2026, 3, 9));
        assert_eq!(into_year(date(2024, 2, 29), 2026), date(2026, 2, 28));
        assert_eq!(into_year(date(2027, 1, 1), 2026), date(2027, 1, 1));
    }

    #[test]
    fn test_avoid_dates_nudges_forward() {
        let busy: BTreeSet<Date> = [date(2026, 10, 20), date(2026, 10, 21)].into_iter().collect();

        assert_eq!(avoid_dates(date(2026, 10, 20), &busy), date(2026, 10, 22));
        assert_eq!(avoid_dates(date(2026, 10, 23), &busy), date(2026, 10, 23));
    }

    #[tokio::test]
    async fn test_draft_prompt_mentions_window() {
        let generator = ScriptedGenerator::new(["[]"]);

        let tasks = draft_tasks(&generator, "Launch blog", None, date(2026, 10, 19)).await.unwrap();

        assert!(tasks.is_empty());
        let prompt = &generator.prompts()[0];
        assert!(prompt.contains("Generate 7 actionable"));
        assert!(prompt.contains("2026-11-02"));
        assert!(prompt.contains("\"Launch blog\""));
    }

    #[tokio::test]
    async fn test_draft_generator_failure_propagates() {
        let generator = ScriptedGenerator::failing();

        let err = draft_tasks(&generator, "Launch blog", None, date(2026, 10, 19)).await.unwrap_err();

        assert!(matches!(err, PlannerError::Collaborator { .. }));
    }

    #[tokio::test]
    async fn test_draft_rejects_past_deadline() {
        let generator = ScriptedGenerator::new(["[]"]);

        let err = draft_tasks(&generator, "Goal", Some(date(2026, 1, 1)), date(2026, 10, 19))
            .await
            .unwrap_err();

        assert!(matches!(err, PlannerError::InvalidInput { .. }));
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_draft_for_user_avoids_busy_dates() {
        let temp_dir = TempDir::new().unwrap();
        let store = SqlitePlanStore::open(temp_dir.path().join("test.db")).await.unwrap();
        let now: Timestamp = "2026-10-19T08:00:00Z".parse().unwrap();
        store
            .create(Plan {
                id: String::new(),
                user_id: "u1".to_string(),
                goal: "Existing".to_string(),
                tasks: vec![Task::new("Busy").with_deadline(day("2026-10-21"))],
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();

        let generator = ScriptedGenerator::new([r#"[
            {"title": "a", "deadline": "2026-10-21"},
            {"title": "b", "deadline": "2025-10-25"},
            {"title": "c", "deadline": "2026-10-30"}
        ]"#]);

        let tasks = draft_for_user(&store, &generator, "u1", "New goal", None, now).await.unwrap();

        let deadlines: Vec<_> = tasks.iter().map(|t| t.deadline).collect();
        assert_eq!(
            deadlines,
            vec![Some(day("2026-10-22")), Some(day("2026-10-25")), Some(day("2026-10-30"))]
        );
    }

    #[tokio::test]
    async fn test_refine_task() {
        let generator =
            ScriptedGenerator::new([r#"[{"title": "Outline"}, {"title": "Draft", "deadline": "2026-10-25"}]"#]);
        let task = Task::new("Write first post").with_description("About Rust");

        let subtasks = refine_task(&generator, &task, date(2026, 10, 19)).await.unwrap();

        assert_eq!(subtasks.len(), 2);
        assert_eq!(subtasks[0].deadline, Some(day("2026-10-20")));
        assert_eq!(subtasks[1].deadline, Some(day("2026-10-25")));
        assert!(generator.prompts()[0].contains("Write first post"));
    }
}
