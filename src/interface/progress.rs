use std::future::Future;
use std::io::Write;

use tokio::time::{interval, MissedTickBehavior};

use crate::llm::CompletionClient;
use crate::orchestrator::{PlanOrchestrator, PlanResult};
use crate::planner::constants::STATUS_ROTATION_INTERVAL;

/// Await a generation while redrawing the rotating status line.
///
/// The ticker lives only inside this call, so it stops the moment the
/// request resolves.
pub async fn await_with_status<C, F>(
    orchestrator: &PlanOrchestrator<C>,
    generation: F,
) -> Option<PlanResult>
where
    C: CompletionClient + 'static,
    F: Future<Output = Option<PlanResult>>,
{
    let mut ticker = interval(STATUS_ROTATION_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(generation);

    let outcome = loop {
        tokio::select! {
            outcome = &mut generation => break outcome,
            _ = ticker.tick() => {
                if let Some(message) = orchestrator.status_message() {
                    print!("\r\x1b[2K{}", message);
                    let _ = std::io::stdout().flush();
                }
            }
        }
    };

    println!("\r\x1b[2K");
    outcome
}
