pub mod cli;
pub mod error;
pub mod interface;
pub mod llm;
pub mod models;
pub mod orchestrator;
pub mod planner;
pub mod state;

pub use error::{PlateError, Result};
pub use models::{MealPlanResponse, OptimizationFocus, Preferences};
pub use orchestrator::{GenerationState, PlanOrchestrator, PlanResult};
