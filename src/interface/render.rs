use std::fmt::Write;

use crate::models::{MealPlanResponse, OptimizationFocus, Preferences};
use crate::orchestrator::{GenerationState, PlanResult};
use crate::planner::constants::GENERIC_PROOF;

/// Summary of the current preferences.
pub fn render_preferences(prefs: &Preferences) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Preferences ===");
    let _ = writeln!(out, "City tier:      {}", prefs.city_tier());
    let _ = writeln!(out, "Diet:           {}", prefs.diet_type());
    let _ = writeln!(out, "Daily budget:   ₹{}", prefs.budget_per_day());
    let _ = writeln!(out, "Max prep time:  {} mins", prefs.time_per_meal());
    let _ = writeln!(out, "Kitchen setup:  {}", prefs.kitchen_setup());
    let _ = writeln!(out, "Days:           {}", prefs.days());
    if prefs.ingredients().is_empty() {
        let _ = writeln!(out, "Pantry lock:    (none)");
    } else {
        let _ = writeln!(out, "Pantry lock:    {}", prefs.ingredients().join(", "));
    }
    out
}

/// Render whatever the orchestrator currently holds.
///
/// `status` is the rotating message, only meaningful while in flight.
pub fn render_state(
    state: &GenerationState,
    status: Option<&str>,
    focus: OptimizationFocus,
) -> String {
    match state {
        GenerationState::Idle => render_idle(),
        GenerationState::InFlight { .. } => render_in_flight(status.unwrap_or("Planning...")),
        GenerationState::Settled(PlanResult::Failure(message)) => render_failure(message),
        GenerationState::Settled(PlanResult::Success(plan)) => render_plan(plan, focus),
    }
}

pub fn render_idle() -> String {
    "Ready to plan?\nAdjust your budget and pantry items, then hit generate for a custom student-friendly plan.\n"
        .to_string()
}

pub fn render_in_flight(status: &str) -> String {
    format!(
        "{}\nOur AI is crunching the numbers for your perfect plan...\n",
        status
    )
}

pub fn render_failure(message: &str) -> String {
    format!("[!] {}\n", message)
}

/// Full plan: proof, days, groceries, budget verdict and fallbacks.
pub fn render_plan(plan: &MealPlanResponse, focus: OptimizationFocus) -> String {
    let mut out = String::new();

    let proof = if plan.personalisation_proof.trim().is_empty() {
        GENERIC_PROOF
    } else {
        plan.personalisation_proof.as_str()
    };
    let _ = writeln!(out, "=== Personalisation Proof ===");
    let _ = writeln!(out, "\"Based on your inputs... {}\"", proof);
    if !plan.using_your_ingredients.is_empty() {
        let _ = writeln!(
            out,
            "Using your ingredients: {}",
            plan.using_your_ingredients.join(", ")
        );
    }
    let _ = writeln!(out, "Optimized for: {}", focus.title());
    out.push('\n');

    for day in &plan.daily_plans {
        let _ = writeln!(out, "=== Day {} Meal Plan ===", day.day);
        for (slot, meal) in day.meals() {
            let name = if meal.name.is_empty() { "(unnamed)" } else { meal.name.as_str() };
            let mut tags = vec![format!("{}m", meal.cooking_time)];
            if meal.is_portable {
                tags.push("Portable".to_string());
            }
            if let Some(effort) = meal.effort_level {
                tags.push(format!("{} effort", effort));
            }
            let _ = writeln!(out, "  {:<9} {} [{}]", slot, name, tags.join(", "));
            if !meal.description.is_empty() {
                let _ = writeln!(out, "            {}", meal.description);
            }
        }

        if !day.cooking_sequence.is_empty() {
            let _ = writeln!(out, "  Cooking Sequence:");
            for (i, step) in day.cooking_sequence.iter().enumerate() {
                let _ = writeln!(out, "    {}. {}", i + 1, step);
            }
        }

        if !day.substitutions.is_empty() {
            let _ = writeln!(out, "  Substitutions:");
            for sub in &day.substitutions {
                let _ = writeln!(out, "    {}: {}", sub.meal, sub.options.join(" / "));
            }
        }
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "=== Grocery List (Estimated Total ₹{}) ===",
        plan.budget_feasibility.total_estimated_cost
    );
    for (category, items) in plan.grocery_by_category() {
        let _ = writeln!(out, "  {}", category.to_uppercase());
        for item in items {
            let _ = writeln!(
                out,
                "    - {:<24} {:>10}  ₹{}",
                item.item, item.quantity, item.estimated_cost
            );
        }
    }
    out.push('\n');

    let verdict = if plan.budget_feasibility.is_feasible {
        "Within budget"
    } else {
        "Over budget"
    };
    let _ = writeln!(out, "=== Budget Feasibility Check: {} ===", verdict);
    let _ = writeln!(out, "{}", plan.budget_feasibility.explanation);

    if let Some(fallback) = plan.active_fallback() {
        out.push('\n');
        let _ = writeln!(out, "=== Budget Fallback Required ===");
        if !fallback.failure_reason.is_empty() {
            let _ = writeln!(out, "Reason: {}", fallback.failure_reason);
        }
        let _ = writeln!(out, "Plan A: Cheapest Possible");
        let _ = writeln!(out, "  {}", fallback.cheapest);
        let _ = writeln!(out, "Plan B: Reduced Variety");
        let _ = writeln!(out, "  {}", fallback.reduced_variety);
    }

    out
}

/// Print the current state to stdout.
pub fn display_state(state: &GenerationState, status: Option<&str>, focus: OptimizationFocus) {
    println!();
    print!("{}", render_state(state, status, focus));
    println!();
}
