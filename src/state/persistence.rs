use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::{MealPlanResponse, Preferences};

/// Load a preferences seed from a JSON file.
///
/// Missing fields take their defaults and the pantry is re-normalized, so a
/// hand-edited file cannot break the ingredient invariants.
pub fn load_preferences<P: AsRef<Path>>(path: P) -> Result<Preferences> {
    let content = fs::read_to_string(path)?;
    let prefs: Preferences = serde_json::from_str(&content)?;
    Ok(prefs.normalized())
}

/// Save a settled meal plan as pretty JSON.
pub fn save_plan<P: AsRef<Path>>(path: P, plan: &MealPlanResponse) -> Result<()> {
    let json = serde_json::to_string_pretty(plan)?;
    fs::write(path, json)?;
    Ok(())
}

/// Write the grocery list to a CSV file, grouped by category.
pub fn export_grocery_csv<P: AsRef<Path>>(path: P, plan: &MealPlanResponse) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["category", "item", "quantity", "estimated_cost"])?;

    for (category, items) in plan.grocery_by_category() {
        for item in items {
            wtr.write_record([
                category.to_string(),
                item.item.clone(),
                item.quantity.clone(),
                format!("{:.2}", item.estimated_cost),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
