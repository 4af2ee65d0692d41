//! Motivational feedback for a progress summary.

use crate::models::{Feedback, FeedbackSummary, ProgressSummary};

/// Maps the completion percentage to one of seven bands (0, 1-24, 25-49,
/// 50-74, 75-89, 90-99, 100) and fills in that band's tone, message and
/// suggestion. Percentages above 100 land in the last band.
pub fn feedback(progress: &ProgressSummary) -> Feedback {
    let pct = progress.completion_percentage;
    let goal = progress.goal.as_str();
    let total = progress.total_tasks;
    let completed = progress.completed_tasks;
    let remaining = total.saturating_sub(completed);

    let (tone, message, suggestion) = match pct {
        0 => (
            "Let's get started! 🚀",
            format!("You haven't started working on '{goal}' yet. The best time to begin is now!"),
            "Start with the first task to build momentum. Small progress is still progress!",
        ),
        1..=24 => (
            "Good start! 💪",
            format!("You've completed {completed} out of {total} tasks for '{goal}'. You're {pct}% of the way there!"),
            "You're building momentum! Try to complete at least 2-3 tasks this week to stay on track.",
        ),
        25..=49 => (
            "You're making progress! 📈",
            format!("Great work! You're {pct}% done with '{goal}'. {completed} tasks completed, {remaining} to go!"),
            "You're doing well, but let's pick up the pace a bit. Try to complete more tasks this week to reach 50%!",
        ),
        50..=74 => (
            "Halfway there! 🎯",
            format!("Excellent progress! You've crossed the halfway mark on '{goal}' with {pct}% completion!"),
            "Keep this momentum going! You're on the right track. Focus on consistency to finish strong.",
        ),
        75..=89 => (
            "Almost there! 🔥",
            format!("Outstanding! You're {pct}% done with '{goal}'. Only {remaining} tasks remaining!"),
            "You're so close to the finish line! Push through these last few tasks and you'll achieve your goal!",
        ),
        90..=99 => (
            "Final sprint! 🏃",
            format!("Incredible work! You're at {pct}% completion for '{goal}'. Just {remaining} task(s) left!"),
            "You're almost done! Complete these last tasks and celebrate your achievement!",
        ),
        _ => (
            "Goal achieved! 🎉",
            format!("Congratulations! You've completed all {total} tasks for '{goal}'!"),
            "Amazing work! Time to set a new goal and keep the momentum going!",
        ),
    };

    Feedback {
        tone: tone.to_string(),
        message,
        suggestion: suggestion.to_string(),
        progress_summary: FeedbackSummary {
            goal: goal.to_string(),
            completion_percentage: pct,
            completed_tasks: completed,
            remaining_tasks: remaining,
            total_tasks: total,
        },
    }
}
