pub mod progress;
pub mod prompts;
pub mod render;

pub use progress::await_with_status;
pub use prompts::{
    closest_ingredients, edit_preferences, prompt_form_action, prompt_path, prompt_result_action,
    prompt_yes_no, FormAction, ResultAction,
};
pub use render::{display_state, render_plan, render_preferences, render_state};
