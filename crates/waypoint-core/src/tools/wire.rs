//! Decoding loosely-typed tool invocations.

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

use super::Tool;
use crate::{
    error::{PlannerError, Result},
    models::ProgressSummary,
    params::lenient_count,
};

#[derive(Deserialize)]
struct UserParams {
    user_id: String,
}

#[derive(Deserialize)]
struct MessageParams {
    user_id: String,
    message: String,
}

#[derive(Deserialize)]
struct RiskParams {
    user_id: String,
    #[serde(default, deserialize_with = "lenient_threshold")]
    threshold_days: Option<i64>,
}

#[derive(Deserialize)]
struct ProgressParams {
    user_id: String,
    #[serde(default)]
    plan_id: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct FeedbackParams {
    progress_data: ProgressData,
}

#[derive(Deserialize)]
struct ProgressData {
    #[serde(default)]
    user_id: String,
    #[serde(default)]
    goal: String,
    #[serde(deserialize_with = "lenient_count")]
    completion_percentage: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    total_tasks: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    completed_tasks: u32,
}

pub(super) fn decode(name: &str, params: &Value) -> Result<Tool> {
    let tool = match name {
        "reschedule_plan" => {
            let p: MessageParams = parse(name, params)?;
            Tool::ReschedulePlan {
                user_id: p.user_id,
                message: p.message,
            }
        }
        "analyze_risks" => {
            let p: RiskParams = parse(name, params)?;
            Tool::AnalyzeRisks {
                user_id: p.user_id,
                threshold_days: p.threshold_days,
            }
        }
        "generate_alternative_plans" => {
            let p: UserParams = parse(name, params)?;
            Tool::GenerateAlternativePlans { user_id: p.user_id }
        }
        "get_user_progress" => {
            let p: ProgressParams = parse(name, params)?;
            Tool::GetUserProgress {
                user_id: p.user_id,
                plan_id: p.plan_id,
                message: p.message,
            }
        }
        "provide_feedback" => {
            let p: FeedbackParams = parse(name, params)?;
            let data = p.progress_data;
            Tool::ProvideFeedback {
                progress: ProgressSummary {
                    user_id: data.user_id,
                    goal: data.goal,
                    completion_percentage: data.completion_percentage,
                    total_tasks: data.total_tasks,
                    completed_tasks: data.completed_tasks,
                },
            }
        }
        "handle_general_query" => {
            let p: MessageParams = parse(name, params)?;
            Tool::HandleGeneralQuery {
                user_id: p.user_id,
                message: p.message,
            }
        }
        other => return Err(PlannerError::dispatch(other, "unknown tool")),
    };
    Ok(tool)
}

fn parse<T: DeserializeOwned>(tool: &str, params: &Value) -> Result<T> {
    T::deserialize(params).map_err(|e| PlannerError::dispatch(tool, e))
}

/// Integer, float (truncated) or numeric string. Strings that are not
/// numbers, and any other JSON type, fall back to the default threshold.
fn lenient_threshold<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}
