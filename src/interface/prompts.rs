use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{PlateError, Result};
use crate::models::{CityTier, KitchenSetup, OptimizationFocus, Preferences};

/// Minimum similarity for a typed name to suggest a pantry entry.
const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// What the user picked from the form menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Generate,
    Edit,
    Quit,
}

/// What the user picked after a plan was shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultAction {
    Regenerate(OptimizationFocus),
    SavePlan,
    ExportGroceries,
    EditPreferences,
    Quit,
}

fn prompt_number(prompt: &str, current: u32) -> Result<u32> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(current.to_string())
        .interact_text()?;

    let value: u32 = input
        .trim()
        .parse()
        .map_err(|_| PlateError::InvalidInput("Invalid number".to_string()))?;

    if value == 0 {
        return Err(PlateError::InvalidInput(
            "Value must be greater than zero".to_string(),
        ));
    }

    Ok(value)
}

/// Prompt for the daily budget in rupees.
pub fn prompt_budget(current: u32) -> Result<u32> {
    prompt_number("Daily budget (₹)", current)
}

/// Prompt for the maximum prep time per meal.
pub fn prompt_time_per_meal(current: u32) -> Result<u32> {
    prompt_number("Max prep time (mins)", current)
}

/// Prompt for the number of days to plan.
pub fn prompt_days(current: u32) -> Result<u32> {
    prompt_number("How many days should the plan cover?", current)
}

pub fn prompt_city_tier(current: CityTier) -> Result<CityTier> {
    let labels: Vec<&str> = CityTier::ALL.iter().map(|t| t.label()).collect();
    let default = CityTier::ALL.iter().position(|t| *t == current).unwrap_or(0);

    let selection = Select::new()
        .with_prompt("City tier")
        .items(&labels)
        .default(default)
        .interact()?;

    Ok(CityTier::ALL[selection])
}

pub fn prompt_kitchen_setup(current: KitchenSetup) -> Result<KitchenSetup> {
    let labels: Vec<&str> = KitchenSetup::ALL.iter().map(|k| k.label()).collect();
    let default = KitchenSetup::ALL
        .iter()
        .position(|k| *k == current)
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Kitchen setup")
        .items(&labels)
        .default(default)
        .interact()?;

    Ok(KitchenSetup::ALL[selection])
}

pub fn prompt_diet_type(current: &str) -> Result<String> {
    Ok(Input::new()
        .with_prompt("Diet type")
        .default(current.to_string())
        .interact_text()?)
}

/// Add ingredients until the user enters a blank line.
pub fn prompt_add_ingredients(prefs: &mut Preferences) -> Result<()> {
    loop {
        let input: String = Input::new()
            .with_prompt("Add an ingredient (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        if input.trim().is_empty() {
            break;
        }

        if prefs.add_ingredient(&input) {
            println!("Added: {}", input.trim().to_lowercase());
        } else {
            println!("'{}' is already in your pantry.", input.trim());
        }
    }
    Ok(())
}

/// Pantry entries similar to `input`, best match first.
pub fn closest_ingredients<'a>(pantry: &'a [String], input: &str) -> Vec<&'a str> {
    let needle = input.trim().to_lowercase();
    let mut candidates: Vec<(&str, f64)> = pantry
        .iter()
        .map(|i| (i.as_str(), jaro_winkler(i, &needle)))
        .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates.into_iter().map(|(name, _)| name).collect()
}

/// Remove one ingredient, matching the typed name loosely.
pub fn prompt_remove_ingredient(prefs: &mut Preferences) -> Result<()> {
    if prefs.ingredients().is_empty() {
        println!("Your pantry is empty.");
        return Ok(());
    }

    let input: String = Input::new()
        .with_prompt("Ingredient to remove")
        .allow_empty(true)
        .interact_text()?;

    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return Ok(());
    }

    if prefs.remove_ingredient(&input) {
        println!("Removed: {}", input);
        return Ok(());
    }

    let candidates: Vec<String> = closest_ingredients(prefs.ingredients(), &input)
        .into_iter()
        .take(5)
        .map(str::to_string)
        .collect();

    let chosen = match candidates.len() {
        0 => {
            println!("No pantry ingredient matches '{}'", input);
            None
        }
        1 => {
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", candidates[0]))
                .default(true)
                .interact()?;
            confirm.then(|| candidates[0].clone())
        }
        _ => {
            let mut options = candidates.clone();
            options.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt("Which did you mean?")
                .items(&options)
                .default(0)
                .interact()?;

            candidates.get(selection).cloned()
        }
    };

    if let Some(name) = chosen {
        prefs.remove_ingredient(&name);
        println!("Removed: {}", name);
    }

    Ok(())
}

/// Main form menu.
pub fn prompt_form_action() -> Result<FormAction> {
    let options = ["Generate meal plan", "Edit preferences", "Quit"];
    let selection = Select::new()
        .with_prompt("What next?")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(match selection {
        0 => FormAction::Generate,
        1 => FormAction::Edit,
        _ => FormAction::Quit,
    })
}

/// Edit one preference field at a time until the user is done.
pub fn edit_preferences(prefs: &mut Preferences) -> Result<()> {
    loop {
        let options = [
            format!("City tier ({})", prefs.city_tier()),
            format!("Diet type ({})", prefs.diet_type()),
            format!("Daily budget (₹{})", prefs.budget_per_day()),
            format!("Max prep time ({} mins)", prefs.time_per_meal()),
            format!("Kitchen setup ({})", prefs.kitchen_setup()),
            format!("Days ({})", prefs.days()),
            format!("Add ingredients ({} in pantry)", prefs.ingredients().len()),
            "Remove an ingredient".to_string(),
            "Done".to_string(),
        ];

        let selection = Select::new()
            .with_prompt("Edit which preference?")
            .items(&options)
            .default(options.len() - 1)
            .interact()?;

        match selection {
            0 => prefs.set_city_tier(prompt_city_tier(prefs.city_tier())?),
            1 => {
                let diet = prompt_diet_type(prefs.diet_type())?;
                prefs.set_diet_type(&diet);
            }
            2 => {
                let current = prefs.budget_per_day();
                prefs.set_budget_per_day(retry_invalid(|| prompt_budget(current))?);
            }
            3 => {
                let current = prefs.time_per_meal();
                prefs.set_time_per_meal(retry_invalid(|| prompt_time_per_meal(current))?);
            }
            4 => prefs.set_kitchen_setup(prompt_kitchen_setup(prefs.kitchen_setup())?),
            5 => {
                let current = prefs.days();
                prefs.set_days(retry_invalid(|| prompt_days(current))?);
            }
            6 => prompt_add_ingredients(prefs)?,
            7 => prompt_remove_ingredient(prefs)?,
            _ => break,
        }
    }
    Ok(())
}

/// Re-ask while the answer is rejected as invalid input.
fn retry_invalid<T>(mut ask: impl FnMut() -> Result<T>) -> Result<T> {
    loop {
        match ask() {
            Err(PlateError::InvalidInput(msg)) => println!("{}", msg),
            other => return other,
        }
    }
}

/// Menu shown under a successful plan, with one entry per focus.
pub fn prompt_result_action(current: OptimizationFocus) -> Result<ResultAction> {
    let mut options: Vec<String> = OptimizationFocus::ALL
        .iter()
        .map(|f| {
            if *f == current {
                format!("Regenerate: {} (current)", f.title())
            } else {
                format!("Regenerate: {}", f.title())
            }
        })
        .collect();
    options.push("Save plan as JSON".to_string());
    options.push("Export grocery list as CSV".to_string());
    options.push("Edit preferences".to_string());
    options.push("Quit".to_string());

    let selection = Select::new()
        .with_prompt("What next?")
        .items(&options)
        .default(options.len() - 1)
        .interact()?;

    let focus_count = OptimizationFocus::ALL.len();
    Ok(match selection {
        i if i < focus_count => ResultAction::Regenerate(OptimizationFocus::ALL[i]),
        i if i == focus_count => ResultAction::SavePlan,
        i if i == focus_count + 1 => ResultAction::ExportGroceries,
        i if i == focus_count + 2 => ResultAction::EditPreferences,
        _ => ResultAction::Quit,
    })
}

/// Prompt for an output path.
pub fn prompt_path(prompt: &str, default: &str) -> Result<String> {
    Ok(Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_ingredients_ranks_best_first() {
        let pantry: Vec<String> = ["rice", "dal", "tomatoes", "potatoes"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let matches = closest_ingredients(&pantry, "Tomatos");
        assert_eq!(matches.first(), Some(&"tomatoes"));
    }

    #[test]
    fn test_closest_ingredients_no_match() {
        let pantry = vec!["rice".to_string()];
        assert!(closest_ingredients(&pantry, "saffron").is_empty());
    }
}
