use std::time::Duration;

/// Minimum distinct pantry ingredients each day should draw on.
pub const MIN_PANTRY_INGREDIENTS_PER_DAY: usize = 3;

/// Shown to the user for every failed generation, whatever the cause.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Failed to generate meal plan. Please check your connection or try again.";

/// Shown in place of an empty personalisation proof.
pub const GENERIC_PROOF: &str = "Generic student optimization applied.";

// ─────────────────────────────────────────────────────────────────────────────
// Status rotation while a request is in flight
// ─────────────────────────────────────────────────────────────────────────────

/// How long each status message stays up.
pub const STATUS_ROTATION_INTERVAL: Duration = Duration::from_millis(2500);

/// Advisory messages, cycled in order.
pub const STATUS_MESSAGES: [&str; 7] = [
    "Consulting Tier-2 city price indices...",
    "Optimizing for your ₹150 budget...",
    "Filtering student-friendly recipes...",
    "Checking pantry ingredient compatibility...",
    "Calculating total grocery costs...",
    "Balancing prep time with student schedules...",
    "Finalizing your personalized plan...",
];

/// Index of the status message after `elapsed` time in flight.
pub fn status_index(elapsed: Duration) -> usize {
    let ticks = elapsed.as_millis() / STATUS_ROTATION_INTERVAL.as_millis();
    (ticks % STATUS_MESSAGES.len() as u128) as usize
}
