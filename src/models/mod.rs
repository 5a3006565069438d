pub mod optimization;
pub mod plan;
pub mod preferences;

pub use optimization::OptimizationFocus;
pub use plan::{
    BudgetFeasibility, DailyPlan, EffortLevel, FallbackPlans, GroceryItem, Meal,
    MealPlanResponse, Substitution,
};
pub use preferences::{normalize_ingredient, CityTier, KitchenSetup, Preferences, DEFAULT_PANTRY};
