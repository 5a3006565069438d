use serde_json::json;

/// Top-level keys every response must carry.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "success",
    "personalisationProof",
    "dailyPlans",
    "groceryList",
    "budgetFeasibility",
    "usingYourIngredients",
];

fn meal_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "description": { "type": "string" },
            "cookingTime": { "type": "number" },
            "ingredientsUsed": {
                "type": "array",
                "items": { "type": "string" }
            },
            "isPortable": { "type": "boolean" },
            "effortLevel": {
                "type": "string",
                "enum": ["Low", "Medium", "High"]
            }
        }
    })
}

/// Returns the JSON schema for meal plan responses
pub fn get_meal_plan_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "success": { "type": "boolean" },
            "personalisationProof": { "type": "string" },
            "usingYourIngredients": {
                "type": "array",
                "items": { "type": "string" }
            },
            "dailyPlans": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "day": { "type": "number" },
                        "breakfast": meal_schema(),
                        "lunch": meal_schema(),
                        "dinner": meal_schema(),
                        "cookingSequence": {
                            "type": "array",
                            "items": { "type": "string" }
                        },
                        "substitutions": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "meal": { "type": "string" },
                                    "options": {
                                        "type": "array",
                                        "items": { "type": "string" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "groceryList": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "item": { "type": "string" },
                        "quantity": { "type": "string" },
                        "estimatedCost": { "type": "number" },
                        "category": { "type": "string" }
                    }
                }
            },
            "budgetFeasibility": {
                "type": "object",
                "properties": {
                    "isFeasible": { "type": "boolean" },
                    "totalEstimatedCost": { "type": "number" },
                    "explanation": { "type": "string" }
                }
            },
            "fallbackPlans": {
                "type": "object",
                "properties": {
                    "cheapest": { "type": "string" },
                    "reducedVariety": { "type": "string" },
                    "failureReason": { "type": "string" }
                }
            }
        },
        "required": REQUIRED_FIELDS
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_requires_envelope() {
        let schema = get_meal_plan_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(required, REQUIRED_FIELDS);
        assert!(!required.contains(&"fallbackPlans"));
    }

    #[test]
    fn test_schema_meals_share_shape() {
        let schema = get_meal_plan_schema();
        let day = &schema["properties"]["dailyPlans"]["items"]["properties"];
        assert_eq!(day["breakfast"], day["dinner"]);
        assert_eq!(
            day["lunch"]["properties"]["effortLevel"]["enum"],
            json!(["Low", "Medium", "High"])
        );
    }
}
