pub mod constants;
pub mod contract;
pub mod prompt;
pub mod schema;

pub use constants::*;
pub use contract::{parse_meal_plan, validate_envelope};
pub use prompt::{build_prompt, planning_rules};
pub use schema::{get_meal_plan_schema, REQUIRED_FIELDS};
