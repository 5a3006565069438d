use serde_json::Value;
use tracing::debug;

use crate::error::{PlateError, Result};
use crate::models::MealPlanResponse;

/// JSON shape a required top-level key must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Bool,
    Str,
    StrArray,
    ObjectArray,
    Object,
}

impl Shape {
    fn matches(self, value: &Value) -> bool {
        match self {
            Shape::Bool => value.is_boolean(),
            Shape::Str => value.is_string(),
            Shape::StrArray => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            Shape::ObjectArray => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_object)),
            Shape::Object => value.is_object(),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Shape::Bool => "a boolean",
            Shape::Str => "a string",
            Shape::StrArray => "an array of strings",
            Shape::ObjectArray => "an array of objects",
            Shape::Object => "an object",
        }
    }
}

const ENVELOPE: [(&str, Shape); 6] = [
    ("success", Shape::Bool),
    ("personalisationProof", Shape::Str),
    ("usingYourIngredients", Shape::StrArray),
    ("dailyPlans", Shape::ObjectArray),
    ("groceryList", Shape::ObjectArray),
    ("budgetFeasibility", Shape::Object),
];

/// Check the required envelope of an already-parsed payload.
pub fn validate_envelope(payload: &Value) -> Result<()> {
    let object = payload
        .as_object()
        .ok_or_else(|| PlateError::Contract("payload is not a JSON object".to_string()))?;

    for (key, shape) in ENVELOPE {
        let value = object
            .get(key)
            .ok_or_else(|| PlateError::Contract(format!("missing required field `{}`", key)))?;
        if !shape.matches(value) {
            return Err(PlateError::Contract(format!(
                "field `{}` must be {}",
                key,
                shape.describe()
            )));
        }
    }

    match object.get("fallbackPlans") {
        None | Some(Value::Null) | Some(Value::Object(_)) => Ok(()),
        Some(_) => Err(PlateError::Contract(
            "field `fallbackPlans` must be an object".to_string(),
        )),
    }
}

/// Parse raw completion text into a validated meal plan.
///
/// The text is parsed as-is; any JSON or contract violation fails the whole
/// response.
pub fn parse_meal_plan(raw: &str) -> Result<MealPlanResponse> {
    let mut payload: Value = serde_json::from_str(raw)?;
    validate_envelope(&payload)?;

    // A null fallback is the same as an absent one.
    if let Some(object) = payload.as_object_mut() {
        if object.get("fallbackPlans").is_some_and(Value::is_null) {
            object.remove("fallbackPlans");
        }
    }

    let plan: MealPlanResponse = serde_json::from_value(payload)
        .map_err(|e| PlateError::Contract(format!("nested field mismatch: {}", e)))?;

    debug!(
        days = plan.daily_plans.len(),
        groceries = plan.grocery_list.len(),
        feasible = plan.budget_feasibility.is_feasible,
        "Parsed meal plan"
    );
    Ok(plan)
}
