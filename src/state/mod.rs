mod persistence;
mod session;

pub use persistence::{export_grocery_csv, load_preferences, save_plan};
pub use session::PlanSession;
