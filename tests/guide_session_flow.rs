//! Integration tests for the guided session flow.
//!
//! Drives `GuideSession` end to end against a scripted gateway:
//! 1. Opening questions for every panel
//! 2. Summary checkpoints, completion and progress
//! 3. Error replies and transport failures
//! 4. Synthesis from the completed panels

use std::sync::Arc;

use proptest::prelude::*;

use proposal_builder::adapters::StubGateway;
use proposal_builder::application::client::{
    GuideSession, IntegrationError, PanelError, PanelOutput, PanelUpdate, SessionError,
    SynthesisOutcome,
};
use proposal_builder::domain::foundation::Purpose;
use proposal_builder::domain::guide::{
    AggregateState, ConversationState, GuideProgress, ServiceReply,
};
use proposal_builder::ports::GatewayError;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn opening(purpose: Purpose) -> ServiceReply {
    ServiceReply::question(
        format!("Opening question for {}", purpose.label()),
        vec![
            format!("{} option one", purpose),
            format!("{} option two", purpose),
        ],
    )
}

/// Opening question for empty input, a checkpoint echoing the input otherwise.
fn scripted_gateway() -> StubGateway {
    StubGateway::new().with_responder(|purpose, input| {
        if input.is_empty() {
            Ok(opening(purpose))
        } else {
            Ok(ServiceReply::summary_and_options(
                format!("Summary of '{}'", input),
                "Anything else?",
                vec!["Refine".to_string()],
            ))
        }
    })
}

async fn initialized_session(gateway: &StubGateway) -> GuideSession<StubGateway> {
    let mut session = GuideSession::new(Arc::new(gateway.clone()));
    session.initialize_all().await;
    session
}

// =============================================================================
// Initialization
// =============================================================================

#[tokio::test]
async fn every_panel_renders_its_opening_question() {
    let gateway = scripted_gateway();
    let session = initialized_session(&gateway).await;

    for purpose in Purpose::panels() {
        let panel = session.panel(*purpose).unwrap();
        let ServiceReply::Question { question, options } = opening(*purpose) else {
            unreachable!()
        };
        assert_eq!(panel.view().guiding_question, Some(question));
        assert_eq!(panel.view().options, options);
        assert!(!panel.is_complete());
        assert_eq!(panel.latest_summary(), None);
    }

    let mut purposes: Vec<Purpose> = gateway.calls().into_iter().map(|(p, _)| p).collect();
    purposes.sort();
    assert_eq!(purposes, Purpose::panels().to_vec());
    assert!(gateway.calls().iter().all(|(_, input)| input.is_empty()));
}

#[tokio::test]
async fn one_failed_panel_does_not_block_the_others() {
    let gateway = StubGateway::new().with_responder(|purpose, _| {
        if purpose == Purpose::Development {
            Err(GatewayError::network("connection reset"))
        } else {
            Ok(opening(purpose))
        }
    });
    let session = initialized_session(&gateway).await;

    let failed = session.panel(Purpose::Development).unwrap();
    assert_eq!(
        failed.view().output,
        PanelOutput::Notice("Could not load initial question.".to_string())
    );
    assert!(session
        .panel(Purpose::Evaluation)
        .unwrap()
        .view()
        .guiding_question
        .is_some());
}

// =============================================================================
// Submission
// =============================================================================

#[tokio::test]
async fn checkpoint_sets_summary_and_clears_input() {
    let gateway = scripted_gateway();
    let mut session = initialized_session(&gateway).await;

    let update = session
        .submit(Purpose::Outcomes, "Students analyze case studies")
        .await
        .unwrap();

    let panel = session.panel(Purpose::Outcomes).unwrap();
    assert_eq!(update, PanelUpdate::Summary);
    assert!(panel.is_complete());
    assert_eq!(
        panel.latest_summary(),
        Some("Summary of 'Students analyze case studies'")
    );
    assert_eq!(panel.view().input, "");
    assert_eq!(panel.view().options, vec!["Refine"]);
}

#[tokio::test]
async fn transport_failure_preserves_state_and_reenables_submit() {
    let gateway = scripted_gateway();
    let mut session = initialized_session(&gateway).await;
    session.submit(Purpose::Pedagogy, "PBL").await.unwrap();
    let before = session.panel(Purpose::Pedagogy).unwrap().state().clone();

    gateway.push(Err(GatewayError::Timeout { timeout_secs: 60 }));
    let update = session.submit(Purpose::Pedagogy, "Add VR").await.unwrap();

    let panel = session.panel(Purpose::Pedagogy).unwrap();
    assert_eq!(update, PanelUpdate::TransportFailure);
    assert_eq!(panel.state(), &before);
    assert!(panel.view().submit_enabled);
    assert_eq!(
        panel.view().output.text(),
        "An error occurred during submission."
    );
}

#[tokio::test]
async fn error_reply_after_summary_keeps_completion() {
    let gateway = scripted_gateway();
    let mut session = initialized_session(&gateway).await;
    session.submit(Purpose::Objective, "Motivation").await.unwrap();

    gateway.push(Ok(ServiceReply::error("rate limited")));
    session.submit(Purpose::Objective, "More").await.unwrap();

    let panel = session.panel(Purpose::Objective).unwrap();
    assert!(panel.is_complete());
    assert_eq!(panel.latest_summary(), Some("Summary of 'Motivation'"));
    assert_eq!(
        panel.view().output,
        PanelOutput::ReplyError("rate limited".to_string())
    );
}

#[tokio::test]
async fn selecting_an_option_equals_typing_it() {
    let typed = scripted_gateway();
    let mut typed_session = initialized_session(&typed).await;
    typed_session
        .submit(Purpose::Evaluation, "evaluation option two")
        .await
        .unwrap();

    let selected = scripted_gateway();
    let mut selected_session = initialized_session(&selected).await;
    selected_session
        .select_option(Purpose::Evaluation, 1)
        .await
        .unwrap();

    assert_eq!(
        typed.calls_for(Purpose::Evaluation),
        selected.calls_for(Purpose::Evaluation)
    );
    assert_eq!(
        typed_session.panel(Purpose::Evaluation).unwrap().state(),
        selected_session.panel(Purpose::Evaluation).unwrap().state()
    );
}

#[tokio::test]
async fn blank_input_never_reaches_the_gateway() {
    let gateway = scripted_gateway();
    let mut session = initialized_session(&gateway).await;
    let calls = gateway.call_count();

    assert_eq!(
        session.submit(Purpose::Implementation, " \n ").await,
        Err(SessionError::Panel(PanelError::EmptyInput))
    );
    assert_eq!(gateway.call_count(), calls);
}

// =============================================================================
// Progress and synthesis
// =============================================================================

#[tokio::test]
async fn progress_reaches_100_when_all_panels_complete() {
    let gateway = scripted_gateway();
    let mut session = initialized_session(&gateway).await;
    assert_eq!(session.progress().percent_complete().value(), 0);

    let expected = [17, 33, 50, 67, 83, 100];
    for (purpose, percent) in Purpose::panels().iter().zip(expected) {
        session.submit(*purpose, "answer").await.unwrap();
        assert_eq!(session.progress().percent_complete().value(), percent);
    }
    assert!(session.progress().is_complete());
}

#[tokio::test]
async fn synthesize_without_completed_panels_sends_nothing() {
    let gateway = scripted_gateway();
    let mut session = initialized_session(&gateway).await;
    let calls = gateway.call_count();
    let states: Vec<ConversationState> =
        session.panels().iter().map(|p| p.state().clone()).collect();

    let result = session.synthesize().await;

    assert_eq!(result, Err(IntegrationError::NoCompletedSteps));
    assert_eq!(gateway.call_count(), calls);
    assert_eq!(
        session.integration().view().output.text(),
        "Please complete some steps first."
    );
    let after: Vec<ConversationState> =
        session.panels().iter().map(|p| p.state().clone()).collect();
    assert_eq!(states, after);
}

#[tokio::test]
async fn synthesize_sends_completed_summaries_in_purpose_order() {
    let gateway = scripted_gateway();
    let mut session = initialized_session(&gateway).await;
    session.submit(Purpose::Outcomes, "outcomes answer").await.unwrap();
    session.submit(Purpose::Objective, "objective answer").await.unwrap();

    gateway.push(Ok(ServiceReply::summary_only("# Proposal")));
    let outcome = session.synthesize().await.unwrap();

    assert_eq!(outcome, SynthesisOutcome::Document);
    assert_eq!(
        gateway.calls_for(Purpose::Integrator),
        vec![
            "--- Project Objective ---\nSummary of 'objective answer'\n\n\
             --- Intended Learning Outcomes ---\nSummary of 'outcomes answer'"
        ]
    );
    assert_eq!(session.integration().view().output.text(), "# Proposal");
    assert!(session.integration().view().trigger_enabled);
}

// =============================================================================
// Properties
// =============================================================================

fn reply_strategy() -> impl Strategy<Value = ServiceReply> {
    prop_oneof![
        "[a-z ]{0,12}".prop_map(|q| ServiceReply::question(q, vec![])),
        "[a-z ]{1,12}".prop_map(|s| ServiceReply::summary_and_options(s, "next?", vec![])),
        "[a-z ]{1,12}".prop_map(|s| ServiceReply::summary_only(s)),
        "[a-z ]{1,12}".prop_map(|s| ServiceReply::error(s)),
    ]
}

proptest! {
    #[test]
    fn progress_never_decreases(
        events in prop::collection::vec((0usize..6, reply_strategy()), 0..40)
    ) {
        let mut states: Vec<ConversationState> = Purpose::panels()
            .iter()
            .map(|p| ConversationState::new(*p))
            .collect();
        let mut last = GuideProgress::from_states(&states).percent_complete();

        for (index, reply) in events {
            states[index].apply(&reply);
            let now = GuideProgress::from_states(&states).percent_complete();
            prop_assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn aggregate_lists_completed_panels_in_purpose_order(
        done in prop::collection::btree_set(0usize..6, 0..=6)
    ) {
        let mut states: Vec<ConversationState> = Purpose::panels()
            .iter()
            .rev()
            .map(|p| ConversationState::new(*p))
            .collect();
        for state in states.iter_mut() {
            let index = Purpose::panels().iter().position(|p| *p == state.purpose()).unwrap();
            if done.contains(&index) {
                state.apply(&ServiceReply::summary_only(format!("s{}", index)));
            }
        }

        let aggregate = AggregateState::snapshot(&states);
        let purposes: Vec<Purpose> = aggregate.completed().map(|(p, _)| p).collect();
        let expected: Vec<Purpose> = done.iter().map(|i| Purpose::panels()[*i]).collect();
        prop_assert_eq!(purposes, expected);
        prop_assert_eq!(aggregate.combined_input().is_some(), !done.is_empty());
    }
}
