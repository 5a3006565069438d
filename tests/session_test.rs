mod common;

use std::time::Duration;

use common::{plan_body, FakeClient, Reply};
use pinkplate_rs::orchestrator::{PlanOrchestrator, PlanResult};
use pinkplate_rs::state::PlanSession;
use pinkplate_rs::{OptimizationFocus, Preferences};

fn session(client: FakeClient) -> PlanSession<FakeClient> {
    PlanSession::new(Preferences::default(), PlanOrchestrator::new(client))
}

#[tokio::test]
async fn test_focus_follows_successful_plan() {
    let client = FakeClient::new().reply(Reply::Text(plan_body(2, true, 140.0).to_string()));
    let mut session = session(client);
    assert_eq!(session.focus(), OptimizationFocus::Balanced);

    let outcome = session.generate(OptimizationFocus::Cheapest).await;

    assert!(outcome.is_some_and(|r| r.is_success()));
    assert_eq!(session.focus(), OptimizationFocus::Cheapest);
}

#[tokio::test]
async fn test_failed_regeneration_keeps_previous_focus() {
    let client = FakeClient::new()
        .reply(Reply::Text(plan_body(2, true, 140.0).to_string()))
        .reply(Reply::Status(500));
    let mut session = session(client);

    session.generate(OptimizationFocus::Protein).await;
    let outcome = session.generate(OptimizationFocus::Fastest).await;

    assert!(matches!(outcome, Some(PlanResult::Failure(_))));
    assert_eq!(session.focus(), OptimizationFocus::Protein);
}

#[tokio::test]
async fn test_regeneration_sends_focus_in_prompt() {
    let client = FakeClient::new()
        .reply(Reply::Text(plan_body(2, true, 140.0).to_string()))
        .reply(Reply::Text(plan_body(2, true, 120.0).to_string()));
    let mut session = session(client);

    session.generate(OptimizationFocus::Balanced).await;
    session.generate(OptimizationFocus::Fastest).await;

    let prompts = session.orchestrator().client().prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].contains("Optimization focus: balanced"));
    assert!(prompts[1].contains("Optimization focus: fastest"));
}

#[tokio::test(start_paused = true)]
async fn test_form_locked_while_in_flight() {
    let client = FakeClient::new().reply_after(
        Duration::from_secs(5),
        Reply::Text(plan_body(2, true, 140.0).to_string()),
    );
    let mut session = session(client);
    assert!(session.can_generate());

    let generation = session.start_generation(OptimizationFocus::Balanced);
    assert!(!session.can_generate());
    assert!(session.preferences_mut().is_none());

    let outcome = generation.await;
    session.apply_outcome(OptimizationFocus::Balanced, outcome.as_ref());

    assert!(session.can_generate());
    assert!(session.preferences_mut().is_some());
}

#[tokio::test]
async fn test_trigger_enabled_again_after_failure() {
    let client = FakeClient::new().reply(Reply::Timeout);
    let mut session = session(client);

    let outcome = session.generate(OptimizationFocus::Balanced).await;

    assert!(matches!(outcome, Some(PlanResult::Failure(_))));
    assert!(session.can_generate());
}

#[tokio::test]
async fn test_pantry_edits_reach_the_prompt() {
    let client = FakeClient::new().reply(Reply::Text(plan_body(1, true, 70.0).to_string()));
    let mut session = session(client);

    let prefs = session.preferences_mut().unwrap();
    assert!(prefs.add_ingredient("Paneer"));
    assert!(!prefs.add_ingredient("paneer"));
    assert!(prefs.remove_ingredient("onions"));
    assert!(!prefs.remove_ingredient("saffron"));

    session.generate(OptimizationFocus::Balanced).await;

    let prompts = session.orchestrator().client().prompts();
    assert!(prompts[0].contains("paneer"));
    assert_eq!(prompts[0].matches("paneer").count(), 1);
    assert!(!prompts[0].contains("onions"));
}
