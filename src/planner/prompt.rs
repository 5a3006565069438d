use std::fmt::Write;

use tracing::debug;

use crate::models::{OptimizationFocus, Preferences};
use crate::planner::constants::MIN_PANTRY_INGREDIENTS_PER_DAY;

/// Numbered instructions appended to every prompt.
pub fn planning_rules() -> [String; 5] {
    [
        format!(
            "Use at least {} available ingredients per day.",
            MIN_PANTRY_INGREDIENTS_PER_DAY
        ),
        "Ensure meals are common in Indian households (Dal, Chawal, Sabzi, Poha, etc.).".to_string(),
        "Respect student life: some meals must be portable or low-effort.".to_string(),
        "If budget is infeasible, provide exactly two fallback descriptions.".to_string(),
        "Output must be strictly valid JSON according to the schema.".to_string(),
    ]
}

/// Render preferences and focus into the natural-language prompt.
pub fn build_prompt(prefs: &Preferences, focus: OptimizationFocus) -> String {
    let mut prompt = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(
        prompt,
        "Generate a {}-day realistic, low-cost Indian {} meal plan.",
        prefs.days(),
        prefs.diet_type().to_lowercase()
    );
    let _ = writeln!(prompt, "City Type: {}", prefs.city_tier());
    let _ = writeln!(prompt, "Budget: ₹{} per day", prefs.budget_per_day());
    let _ = writeln!(prompt, "Max cooking time: {} mins per meal", prefs.time_per_meal());
    let _ = writeln!(prompt, "Kitchen Setup: {}", prefs.kitchen_setup());
    let _ = writeln!(
        prompt,
        "Available ingredients: {}",
        prefs.ingredients().join(", ")
    );
    let _ = writeln!(prompt, "Optimization focus: {}", focus);
    prompt.push('\n');
    prompt.push_str("RULES:\n");
    for (i, rule) in planning_rules().iter().enumerate() {
        let _ = writeln!(prompt, "{}. {}", i + 1, rule);
    }

    debug!(len = prompt.len(), %focus, "Built plan prompt");
    prompt
}
