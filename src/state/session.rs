use std::future::Future;

use crate::llm::CompletionClient;
use crate::models::{OptimizationFocus, Preferences};
use crate::orchestrator::{GenerationState, PlanOrchestrator, PlanResult};

/// Holds everything one planning session needs: the preferences being
/// edited, the focus of the last successful plan, and the orchestrator.
pub struct PlanSession<C> {
    preferences: Preferences,
    focus: OptimizationFocus,
    orchestrator: PlanOrchestrator<C>,
}

impl<C: CompletionClient + 'static> PlanSession<C> {
    pub fn new(preferences: Preferences, orchestrator: PlanOrchestrator<C>) -> Self {
        Self {
            preferences,
            focus: OptimizationFocus::default(),
            orchestrator,
        }
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Mutable access for the form; edits are ignored while a request runs.
    pub fn preferences_mut(&mut self) -> Option<&mut Preferences> {
        if self.orchestrator.is_in_flight() {
            None
        } else {
            Some(&mut self.preferences)
        }
    }

    /// Focus of the most recent successful plan (balanced until then).
    pub fn focus(&self) -> OptimizationFocus {
        self.focus
    }

    pub fn orchestrator(&self) -> &PlanOrchestrator<C> {
        &self.orchestrator
    }

    pub fn state(&self) -> GenerationState {
        self.orchestrator.state()
    }

    /// Whether the generate trigger is enabled.
    pub fn can_generate(&self) -> bool {
        !self.orchestrator.is_in_flight()
    }

    /// Start a request for the current preferences.
    ///
    /// Pass the outcome to [`PlanSession::apply_outcome`] once it resolves.
    pub fn start_generation(
        &self,
        focus: OptimizationFocus,
    ) -> impl Future<Output = Option<PlanResult>> + Send + use<C> {
        self.orchestrator.generate(&self.preferences, focus)
    }

    /// Record the focus that produced a successful plan.
    pub fn apply_outcome(&mut self, focus: OptimizationFocus, outcome: Option<&PlanResult>) {
        if outcome.is_some_and(PlanResult::is_success) {
            self.focus = focus;
        }
    }

    /// Start a request and wait for it.
    pub async fn generate(&mut self, focus: OptimizationFocus) -> Option<PlanResult> {
        let outcome = self.start_generation(focus).await;
        self.apply_outcome(focus, outcome.as_ref());
        outcome
    }
}
