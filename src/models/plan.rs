use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// How much work a meal takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffortLevel {
    Low,
    Medium,
    High,
}

impl EffortLevel {
    pub const ALL: [EffortLevel; 3] = [EffortLevel::Low, EffortLevel::Medium, EffortLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            EffortLevel::Low => "Low",
            EffortLevel::Medium => "Medium",
            EffortLevel::High => "High",
        }
    }

    fn parse_loose(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for EffortLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown effort labels become `None` instead of failing the whole plan.
fn de_effort<'de, D>(deserializer: D) -> Result<Option<EffortLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(EffortLevel::parse_loose))
}

/// Accept any JSON number (the model often sends `15.0`) and round it.
fn de_minutes<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<f64> = Option::deserialize(deserializer)?;
    Ok(raw.map(|v| v.max(0.0).round() as u32).unwrap_or(0))
}

fn de_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<f64> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or(0.0))
}

/// One meal within a day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Meal {
    pub name: String,
    pub description: String,
    #[serde(deserialize_with = "de_minutes")]
    pub cooking_time: u32,
    pub ingredients_used: Vec<String>,
    pub is_portable: bool,
    #[serde(deserialize_with = "de_effort", skip_serializing_if = "Option::is_none")]
    pub effort_level: Option<EffortLevel>,
}

/// Alternatives for one meal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Substitution {
    pub meal: String,
    pub options: Vec<String>,
}

/// Breakfast, lunch and dinner for one day plus the order to cook them in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyPlan {
    #[serde(deserialize_with = "de_minutes")]
    pub day: u32,
    pub breakfast: Meal,
    pub lunch: Meal,
    pub dinner: Meal,
    pub cooking_sequence: Vec<String>,
    pub substitutions: Vec<Substitution>,
}

impl DailyPlan {
    /// Meals paired with their slot label, in eating order.
    pub fn meals(&self) -> [(&'static str, &Meal); 3] {
        [
            ("Breakfast", &self.breakfast),
            ("Lunch", &self.lunch),
            ("Dinner", &self.dinner),
        ]
    }

    pub fn total_cooking_time(&self) -> u32 {
        self.meals().iter().map(|(_, m)| m.cooking_time).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroceryItem {
    pub item: String,
    pub quantity: String,
    #[serde(deserialize_with = "de_amount")]
    pub estimated_cost: f64,
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BudgetFeasibility {
    pub is_feasible: bool,
    #[serde(deserialize_with = "de_amount")]
    pub total_estimated_cost: f64,
    pub explanation: String,
}

/// Simplified alternatives offered when the main plan is over budget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FallbackPlans {
    pub cheapest: String,
    pub reduced_variety: String,
    pub failure_reason: String,
}

/// A validated meal plan as returned by the completion service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanResponse {
    pub success: bool,
    pub personalisation_proof: String,
    pub using_your_ingredients: Vec<String>,
    pub daily_plans: Vec<DailyPlan>,
    pub grocery_list: Vec<GroceryItem>,
    pub budget_feasibility: BudgetFeasibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_plans: Option<FallbackPlans>,
}

impl MealPlanResponse {
    /// Fallback section, only when the plan is infeasible and one was sent.
    pub fn active_fallback(&self) -> Option<&FallbackPlans> {
        if self.budget_feasibility.is_feasible {
            None
        } else {
            self.fallback_plans.as_ref()
        }
    }

    /// Grocery items grouped by category, categories in first-seen order.
    pub fn grocery_by_category(&self) -> Vec<(&str, Vec<&GroceryItem>)> {
        let mut groups: Vec<(&str, Vec<&GroceryItem>)> = Vec::new();
        for item in &self.grocery_list {
            match groups.iter_mut().find(|(cat, _)| *cat == item.category) {
                Some((_, items)) => items.push(item),
                None => groups.push((item.category.as_str(), vec![item])),
            }
        }
        groups
    }

    /// Sum of the grocery line estimates.
    pub fn grocery_total(&self) -> f64 {
        self.grocery_list.iter().map(|g| g.estimated_cost).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::assert_float_absolute_eq;

    fn grocery(item: &str, cost: f64, category: &str) -> GroceryItem {
        GroceryItem {
            item: item.to_string(),
            quantity: "1 kg".to_string(),
            estimated_cost: cost,
            category: category.to_string(),
        }
    }

    #[test]
    fn test_meal_lenient_fields() {
        let json = r#"{"name": "Poha", "cookingTime": 14.6, "effortLevel": "low"}"#;
        let meal: Meal = serde_json::from_str(json).unwrap();
        assert_eq!(meal.name, "Poha");
        assert_eq!(meal.cooking_time, 15);
        assert_eq!(meal.effort_level, Some(EffortLevel::Low));
        assert!(meal.description.is_empty());
        assert!(!meal.is_portable);
    }

    #[test]
    fn test_unknown_effort_is_none() {
        let meal: Meal = serde_json::from_str(r#"{"effortLevel": "Heroic"}"#).unwrap();
        assert_eq!(meal.effort_level, None);
    }

    #[test]
    fn test_non_numeric_cooking_time_is_error() {
        let result: Result<Meal, _> = serde_json::from_str(r#"{"cookingTime": "ten"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_grocery_grouping_preserves_first_seen_order() {
        let plan = MealPlanResponse {
            grocery_list: vec![
                grocery("Rice", 60.0, "Grains"),
                grocery("Onion", 20.0, "Vegetables"),
                grocery("Atta", 45.0, "Grains"),
            ],
            ..Default::default()
        };

        let groups = plan.grocery_by_category();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "Grains");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "Vegetables");
        assert_float_absolute_eq!(plan.grocery_total(), 125.0, 0.001);
    }

    #[test]
    fn test_active_fallback_only_when_infeasible() {
        let mut plan = MealPlanResponse {
            fallback_plans: Some(FallbackPlans {
                cheapest: "Khichdi every day".to_string(),
                reduced_variety: "Two rotating dals".to_string(),
                failure_reason: String::new(),
            }),
            ..Default::default()
        };
        plan.budget_feasibility.is_feasible = true;
        assert!(plan.active_fallback().is_none());

        plan.budget_feasibility.is_feasible = false;
        assert!(plan.active_fallback().is_some());
    }

    #[test]
    fn test_daily_plan_total_cooking_time() {
        let mut day = DailyPlan::default();
        day.breakfast.cooking_time = 10;
        day.lunch.cooking_time = 20;
        day.dinner.cooking_time = 25;
        assert_eq!(day.total_cooking_time(), 55);
    }
}
