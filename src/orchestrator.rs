//! Generation lifecycle: one request in, one settled result out.
//!
//! The orchestrator owns the current [`GenerationState`]. Every call to
//! [`PlanOrchestrator::generate`] bumps a request epoch and moves to
//! `InFlight` before its future is polled; only the resolution carrying the
//! latest epoch may settle the state, so an older request that finishes late
//! can never overwrite a newer one.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::error::{PlateError, Result};
use crate::llm::CompletionClient;
use crate::models::{MealPlanResponse, OptimizationFocus, Preferences};
use crate::planner::{
    build_prompt, get_meal_plan_schema, parse_meal_plan, status_index, GENERIC_FAILURE_MESSAGE,
    STATUS_MESSAGES,
};

/// Outcome of one generation request.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanResult {
    Success(Arc<MealPlanResponse>),
    /// Carries the user-facing message only.
    Failure(String),
}

impl PlanResult {
    pub fn is_success(&self) -> bool {
        matches!(self, PlanResult::Success(_))
    }

    pub fn plan(&self) -> Option<&MealPlanResponse> {
        match self {
            PlanResult::Success(plan) => Some(plan),
            PlanResult::Failure(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenerationState {
    Idle,
    InFlight { epoch: u64, started: Instant },
    Settled(PlanResult),
}

#[derive(Debug)]
struct Shared {
    state: GenerationState,
    /// Epoch of the most recently issued request.
    epoch: u64,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Apply a resolution if it still belongs to the latest request.
fn settle(shared: &Mutex<Shared>, epoch: u64, result: PlanResult) -> Option<PlanResult> {
    let mut guard = lock(shared);
    if guard.epoch != epoch {
        debug!(epoch, latest = guard.epoch, "Discarding superseded plan resolution");
        return None;
    }
    info!(epoch, success = result.is_success(), "Plan request settled");
    guard.state = GenerationState::Settled(result.clone());
    Some(result)
}

async fn request_plan<C: CompletionClient>(
    client: &C,
    prompt: String,
    schema: serde_json::Value,
) -> Result<MealPlanResponse> {
    let raw = client.generate_with_text(prompt, schema).await?;
    parse_meal_plan(&raw)
}

pub struct PlanOrchestrator<C> {
    client: Arc<C>,
    shared: Arc<Mutex<Shared>>,
}

impl<C> Clone for PlanOrchestrator<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<C: CompletionClient + 'static> PlanOrchestrator<C> {
    pub fn new(client: C) -> Self {
        Self::with_shared_client(Arc::new(client))
    }

    pub fn with_shared_client(client: Arc<C>) -> Self {
        Self {
            client,
            shared: Arc::new(Mutex::new(Shared {
                state: GenerationState::Idle,
                epoch: 0,
            })),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> GenerationState {
        lock(&self.shared).state.clone()
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(lock(&self.shared).state, GenerationState::InFlight { .. })
    }

    /// Settled result, if the last request has finished.
    pub fn result(&self) -> Option<PlanResult> {
        match &lock(&self.shared).state {
            GenerationState::Settled(result) => Some(result.clone()),
            _ => None,
        }
    }

    /// Position in [`STATUS_MESSAGES`] while in flight.
    pub fn status_index(&self) -> Option<usize> {
        match lock(&self.shared).state {
            GenerationState::InFlight { started, .. } => Some(status_index(started.elapsed())),
            _ => None,
        }
    }

    /// Rotating advisory message, present only while in flight.
    pub fn status_message(&self) -> Option<&'static str> {
        self.status_index().map(|i| STATUS_MESSAGES[i])
    }

    /// Start a plan request.
    ///
    /// The state is `InFlight` as soon as this returns, before the returned
    /// future is polled. The future yields `None` when a newer request was
    /// issued while this one was pending.
    pub fn generate(
        &self,
        prefs: &Preferences,
        focus: OptimizationFocus,
    ) -> impl Future<Output = Option<PlanResult>> + Send + use<C> {
        let prompt = build_prompt(prefs, focus);
        let schema = get_meal_plan_schema();

        let epoch = {
            let mut guard = lock(&self.shared);
            guard.epoch += 1;
            guard.state = GenerationState::InFlight {
                epoch: guard.epoch,
                started: Instant::now(),
            };
            guard.epoch
        };
        info!(epoch, %focus, days = prefs.days(), "Plan request issued");

        let client = Arc::clone(&self.client);
        let shared = Arc::clone(&self.shared);

        async move {
            let result = match request_plan(client.as_ref(), prompt, schema).await {
                Ok(plan) => PlanResult::Success(Arc::new(plan)),
                Err(e) => {
                    log_failure(epoch, &e);
                    PlanResult::Failure(GENERIC_FAILURE_MESSAGE.to_string())
                }
            };
            settle(&shared, epoch, result)
        }
    }
}

fn log_failure(epoch: u64, err: &PlateError) {
    match err {
        PlateError::Llm(llm) if llm.is_transport() => {
            error!(epoch, "Plan request transport failure: {}", llm)
        }
        _ => error!(epoch, "Plan request failed: {}", err),
    }
}
