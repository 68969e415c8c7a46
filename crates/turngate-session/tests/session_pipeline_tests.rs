//! Session pipeline tests
//!
//! Drive a spawned `SessionProcessor` over its channels the way the
//! surrounding framework would, and assert on the emitted actions. Timer
//! behavior runs under paused tokio time.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use turngate_core::{
    AgentSpeakingState, Decision, EngineAction, EngineConfig, InterruptionDecisionEngine,
    TranscriptFinality,
};
use turngate_session::{SessionEvent, SessionProcessor};
use turngate_telemetry::DecisionMetrics;

struct Harness {
    event_tx: mpsc::Sender<SessionEvent>,
    action_rx: mpsc::Receiver<EngineAction>,
    metrics: DecisionMetrics,
}

fn spawn_session(config: EngineConfig) -> Harness {
    let (event_tx, event_rx) = mpsc::channel(16);
    let (action_tx, action_rx) = mpsc::channel(16);
    let engine = InterruptionDecisionEngine::new(config).unwrap();
    let processor = SessionProcessor::new(engine, event_rx, action_tx);
    let metrics = processor.metrics();
    tokio::spawn(processor.run());
    Harness {
        event_tx,
        action_rx,
        metrics,
    }
}

impl Harness {
    async fn send(&self, event: SessionEvent) {
        self.event_tx.send(event).await.unwrap();
    }

    async fn speaking(&self) {
        self.send(SessionEvent::SpeakingStateChanged(
            AgentSpeakingState::Speaking,
        ))
        .await;
    }

    async fn transcript(&self, text: &str, is_final: bool) {
        self.send(SessionEvent::Transcript {
            text: text.to_string(),
            is_final,
        })
        .await;
    }

    async fn next_action(&mut self) -> EngineAction {
        timeout(Duration::from_secs(5), self.action_rx.recv())
            .await
            .expect("timed out waiting for action")
            .expect("action channel closed")
    }
}

fn expect_decision(action: &EngineAction) -> (Decision, String) {
    match action {
        EngineAction::Decision {
            decision,
            utterance,
        } => (*decision, utterance.text.clone()),
        other => panic!("expected decision, got {other:?}"),
    }
}

#[tokio::test]
async fn backchannel_suppressed_while_command_interrupts() {
    let mut harness = spawn_session(EngineConfig::default());
    harness.speaking().await;

    harness.transcript("Yeah, okay!", true).await;
    let (decision, text) = expect_decision(&harness.next_action().await);
    assert_eq!(decision, Decision::Ignore);
    assert_eq!(text, "Yeah, okay!");

    harness.transcript("stop", true).await;
    let (decision, _) = expect_decision(&harness.next_action().await);
    assert_eq!(decision, Decision::Interrupt);
}

#[tokio::test]
async fn silent_agent_forwards_everything() {
    let mut harness = spawn_session(EngineConfig::default());
    harness
        .send(SessionEvent::SpeakingStateChanged(AgentSpeakingState::Silent))
        .await;

    harness.transcript("yeah", true).await;
    let (decision, _) = expect_decision(&harness.next_action().await);
    assert_eq!(decision, Decision::Respond);
}

#[tokio::test]
async fn interim_ignore_is_revoked_on_substantive_final() {
    let mut harness = spawn_session(EngineConfig::default());
    harness.speaking().await;

    harness.transcript("yeah", false).await;
    let (decision, _) = expect_decision(&harness.next_action().await);
    assert_eq!(decision, Decision::Ignore);

    harness
        .transcript("yeah I guess so, actually wait", true)
        .await;
    match harness.next_action().await {
        EngineAction::RevokeIgnore { .. } => {}
        other => panic!("expected revoke first, got {other:?}"),
    }
    let (decision, _) = expect_decision(&harness.next_action().await);
    assert_eq!(decision, Decision::Interrupt);
}

#[tokio::test(start_paused = true)]
async fn vad_timeout_while_speaking_emits_ignore() {
    let mut harness = spawn_session(EngineConfig::default());
    harness.speaking().await;
    harness.send(SessionEvent::VadActivity).await;

    // No transcript ever arrives; paused time advances past the window
    let action = harness.next_action().await;
    match action {
        EngineAction::Decision {
            decision,
            utterance,
        } => {
            assert_eq!(decision, Decision::Ignore);
            assert!(utterance.text.is_empty());
            assert_eq!(utterance.finality, TranscriptFinality::Interim);
        }
        other => panic!("expected ignore, got {other:?}"),
    }
    assert_eq!(harness.metrics.snapshot().vad_false_starts, 1);
}

#[tokio::test(start_paused = true)]
async fn transcript_before_timeout_preempts_false_start() {
    let mut harness = spawn_session(EngineConfig::default());
    harness.speaking().await;
    harness.send(SessionEvent::VadActivity).await;
    harness.transcript("hold on", false).await;

    let (decision, _) = expect_decision(&harness.next_action().await);
    assert_eq!(decision, Decision::Interrupt);

    // Let the original deadline pass; no phantom ignore follows
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(harness.action_rx.try_recv().is_err());
    assert_eq!(harness.metrics.snapshot().vad_false_starts, 0);
}

#[tokio::test]
async fn empty_transcripts_are_counted_but_never_decided() {
    let mut harness = spawn_session(EngineConfig::default());
    harness.speaking().await;

    harness.transcript("", true).await;
    harness.transcript("  ", false).await;
    // A real transcript afterwards proves the loop is still alive
    harness.transcript("yeah", true).await;

    let (decision, text) = expect_decision(&harness.next_action().await);
    assert_eq!(decision, Decision::Ignore);
    assert_eq!(text, "yeah");

    let snapshot = harness.metrics.snapshot();
    assert_eq!(snapshot.transcripts_empty, 2);
    assert_eq!(snapshot.decisions_ignore, 1);
}

#[tokio::test]
async fn metrics_track_the_event_stream() {
    let mut harness = spawn_session(EngineConfig::default());
    harness.speaking().await;

    harness.transcript("yeah", false).await;
    harness.next_action().await; // provisional ignore
    harness.transcript("yeah", true).await;
    harness.next_action().await; // settled ignore
    harness.transcript("stop", true).await;
    harness.next_action().await; // interrupt

    let snapshot = harness.metrics.snapshot();
    assert_eq!(snapshot.transcripts_interim, 1);
    assert_eq!(snapshot.transcripts_final, 2);
    assert_eq!(snapshot.decisions_ignore, 2);
    assert_eq!(snapshot.decisions_interrupt, 1);
    assert!(harness.metrics.last_decision_time.read().is_some());
}

#[tokio::test]
async fn closing_the_event_channel_shuts_the_session_down() {
    let (event_tx, event_rx) = mpsc::channel::<SessionEvent>(4);
    let (action_tx, mut action_rx) = mpsc::channel(4);
    let engine = InterruptionDecisionEngine::new(EngineConfig::default()).unwrap();
    let handle = tokio::spawn(SessionProcessor::new(engine, event_rx, action_tx).run());

    drop(event_tx);
    timeout(Duration::from_secs(5), handle)
        .await
        .expect("session did not shut down")
        .unwrap();
    // The outbound side is dropped with the processor
    assert!(action_rx.recv().await.is_none());
}

#[tokio::test]
async fn independent_sessions_do_not_share_state() {
    let mut speaking = spawn_session(EngineConfig::default());
    let mut silent = spawn_session(EngineConfig::default());
    speaking.speaking().await;

    speaking.transcript("yeah", true).await;
    silent.transcript("yeah", true).await;

    let (decision, _) = expect_decision(&speaking.next_action().await);
    assert_eq!(decision, Decision::Ignore);
    let (decision, _) = expect_decision(&silent.next_action().await);
    assert_eq!(decision, Decision::Respond);
}
