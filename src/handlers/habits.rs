use crate::models::HabitLog;

const STEP_GOAL: f64 = 7000.0;
const SLEEP_GOAL_HOURS: f64 = 7.0;
const MAX_MEALS: f64 = 4.0;

pub fn analyze_habits(log: &HabitLog) -> String {
    let mut insights = Vec::new();

    if log.steps < STEP_GOAL {
        insights.push("Try to increase daily steps to at least 7000 for better glucose control.");
    } else {
        insights.push("Great job on staying active!");
    }

    if log.sleep_hours < SLEEP_GOAL_HOURS {
        insights.push("Increase sleep to 7-8 hours for optimal health.");
    } else {
        insights.push("Sleep duration is good.");
    }

    if log.meals > MAX_MEALS {
        insights.push("Consider reducing snacking to avoid glucose spikes.");
    }

    format!("Weekly Habit Insights:\n{}", insights.join("\n"))
}
