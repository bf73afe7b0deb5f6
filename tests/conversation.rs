//! End-to-end turn flow against a scripted backend: commit and scrub
//! scenarios, the autosave wire format, and named snapshot round-trips.

use async_trait::async_trait;
use rubberducky::error::{DuckyError, GenerationError};
use rubberducky::persona::PersonaContext;
use rubberducky::providers::{CompletionRequest, Generator};
use rubberducky::state::{ConversationState, SnapshotStore};
use rubberducky::turn::{Decision, TurnController};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Plays back a fixed script of replies; `None` entries fail the call.
struct ScriptedBackend {
    script: Mutex<VecDeque<Option<String>>>,
}

impl ScriptedBackend {
    fn new(script: &[Option<&str>]) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(
                script
                    .iter()
                    .map(|entry| entry.map(ToString::to_string))
                    .collect(),
            ),
        })
    }
}

#[async_trait]
impl Generator for ScriptedBackend {
    async fn complete(&self, _request: CompletionRequest<'_>) -> Result<String, GenerationError> {
        match self.script.lock().unwrap().pop_front() {
            Some(Some(reply)) => Ok(reply),
            _ => Err(GenerationError::Status {
                status: 500,
                message: "scripted failure".into(),
            }),
        }
    }
}

fn controller(backend: Arc<ScriptedBackend>, dir: &TempDir) -> TurnController {
    let persona = PersonaContext::new("You are {agent}, a rubber ducky.", "Tony", "Harmony");
    let store = SnapshotStore::new(dir.path(), "harmony-3.json");
    TurnController::new(backend, persona, store, ConversationState::new(), 50)
}

#[tokio::test]
async fn committed_turn_lands_in_the_autosave_with_wire_field_names() {
    let dir = TempDir::new().unwrap();
    let mut controller = controller(ScriptedBackend::new(&[Some("hi there")]), &dir);

    controller.begin_turn("hello").await.unwrap();
    controller.resolve(Decision::Keep).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("autosave.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["inputs"], serde_json::json!(["hello"]));
    assert_eq!(json["outputs"], serde_json::json!(["hi there"]));
    assert_eq!(json["egoOuts"], serde_json::json!(["hi there"]));
}

#[tokio::test]
async fn scrubbed_turn_is_autosaved_as_raw_history_only() {
    let dir = TempDir::new().unwrap();
    let mut controller = controller(ScriptedBackend::new(&[Some("noise")]), &dir);

    controller.begin_turn("test").await.unwrap();
    controller.resolve(Decision::Scrub).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("autosave.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["inputs"], serde_json::json!([]));
    assert_eq!(json["outputs"], serde_json::json!([]));
    assert_eq!(json["egoOuts"], serde_json::json!(["noise"]));
}

#[tokio::test]
async fn named_snapshot_round_trips_into_a_fresh_session() {
    let dir = TempDir::new().unwrap();
    let mut first = controller(
        ScriptedBackend::new(&[Some("hi there"), Some("quack")]),
        &dir,
    );

    first.begin_turn("hello").await.unwrap();
    first.resolve(Decision::Keep).unwrap();
    first.begin_turn("say something").await.unwrap();
    first.resolve(Decision::Scrub).unwrap();

    let snapshot = first.store().snapshot_path().to_path_buf();
    first.store().save(&snapshot, first.state()).unwrap();

    let mut second = controller(ScriptedBackend::new(&[]), &dir);
    let loaded = second.store().load(&snapshot).unwrap();
    second.replace_state(loaded).unwrap();

    assert_eq!(second.state(), first.state());
    assert_eq!(second.state().turns(), 1);
    assert_eq!(second.state().raw_outputs().len(), 2);
}

#[tokio::test]
async fn backend_failure_mid_conversation_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut controller = controller(ScriptedBackend::new(&[Some("hi there"), None]), &dir);

    controller.begin_turn("hello").await.unwrap();
    controller.resolve(Decision::Keep).unwrap();
    let before = controller.state().clone();

    let err = controller.begin_turn("are you there?").await.unwrap_err();
    assert!(matches!(err, DuckyError::Generation(_)));
    assert_eq!(controller.state(), &before);

    // The next turn proceeds normally once the backend recovers.
    assert!(!controller.awaiting_decision());
}

#[tokio::test]
async fn long_session_preserves_all_invariants_and_order() {
    let dir = TempDir::new().unwrap();
    let script: Vec<Option<&str>> = vec![
        Some("reply one"),
        Some("reply two"),
        Some("reply three"),
        Some("reply four"),
    ];
    let mut controller = controller(ScriptedBackend::new(&script), &dir);

    let decisions = [
        Decision::Scrub,
        Decision::Keep,
        Decision::Scrub,
        Decision::Keep,
    ];
    for (i, decision) in decisions.into_iter().enumerate() {
        controller.begin_turn(&format!("turn {i}")).await.unwrap();
        controller.resolve(decision).unwrap();
        controller.state().check_invariants().unwrap();
    }

    assert_eq!(controller.state().accepted_outputs(), ["reply two", "reply four"]);
    assert_eq!(
        controller.state().raw_outputs(),
        ["reply one", "reply two", "reply three", "reply four"]
    );

    // The autosave reflects the final resolved turn.
    let saved = controller
        .store()
        .load(controller.store().autosave_path())
        .unwrap();
    assert_eq!(&saved, controller.state());
}
