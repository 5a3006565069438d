#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use pinkplate_rs::llm::{CompletionClient, LlmError};
use serde_json::{json, Value};

/// What the fake service does for one call.
pub enum Reply {
    Text(String),
    Timeout,
    Status(u16),
}

/// Completion service double: replays scripted replies in order and
/// records every prompt it was sent.
#[derive(Default)]
pub struct FakeClient {
    replies: Mutex<VecDeque<(Duration, Reply)>>,
    prompts: Mutex<Vec<String>>,
    schemas: Mutex<Vec<Value>>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, reply: Reply) -> Self {
        self.reply_after(Duration::ZERO, reply)
    }

    pub fn reply_after(self, delay: Duration, reply: Reply) -> Self {
        self.replies.lock().unwrap().push_back((delay, reply));
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn schemas(&self) -> Vec<Value> {
        self.schemas.lock().unwrap().clone()
    }
}

impl CompletionClient for FakeClient {
    async fn generate_with_text(
        &self,
        prompt: String,
        response_schema: Value,
    ) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt);
        self.schemas.lock().unwrap().push(response_schema);
        let (delay, reply) = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted reply left");

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match reply {
            Reply::Text(text) => Ok(text),
            Reply::Timeout => Err(LlmError::Timeout(Duration::from_secs(30))),
            Reply::Status(status) => Err(LlmError::ApiError {
                status,
                message: "service unavailable".to_string(),
            }),
        }
    }
}

fn meal(name: &str, minutes: u32, portable: bool) -> Value {
    json!({
        "name": name,
        "description": format!("Simple {}", name.to_lowercase()),
        "cookingTime": minutes,
        "ingredientsUsed": ["rice", "dal"],
        "isPortable": portable,
        "effortLevel": "Low"
    })
}

/// A well-formed response body with `days` daily plans.
pub fn plan_body(days: u32, feasible: bool, total: f64) -> Value {
    let daily_plans: Vec<Value> = (1..=days)
        .map(|day| {
            json!({
                "day": day,
                "breakfast": meal("Poha", 15, true),
                "lunch": meal("Dal Chawal", 25, true),
                "dinner": meal("Aloo Sabzi", 20, false),
                "cookingSequence": ["Soak dal", "Pressure cook rice and dal", "Temper with turmeric"],
                "substitutions": [{"meal": "Poha", "options": ["Upma", "Bread toast"]}]
            })
        })
        .collect();

    json!({
        "success": true,
        "personalisationProof": "Rice and dal anchor every lunch.",
        "usingYourIngredients": ["rice", "dal"],
        "dailyPlans": daily_plans,
        "groceryList": [
            {"item": "Poha", "quantity": "500 g", "estimatedCost": 30, "category": "Grains"},
            {"item": "Onion", "quantity": "1 kg", "estimatedCost": 40, "category": "Vegetables"}
        ],
        "budgetFeasibility": {
            "isFeasible": feasible,
            "totalEstimatedCost": total,
            "explanation": "Estimated against Tier-2 prices."
        }
    })
}

/// Same as [`plan_body`] but over budget with both fallbacks filled in.
pub fn infeasible_body(days: u32, total: f64) -> Value {
    let mut body = plan_body(days, false, total);
    body["fallbackPlans"] = json!({
        "cheapest": "Khichdi twice a day with seasonal sabzi",
        "reducedVariety": "Rotate dal chawal and poha",
        "failureReason": "Vegetable prices exceed the daily budget"
    });
    body
}
