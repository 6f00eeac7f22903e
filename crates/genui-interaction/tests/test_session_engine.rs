use genui_core::interaction::{InteractionEvent, InteractionKind, UiAction};
use genui_core::session::{SessionMessage, SessionState, WireRole};
use async_trait::async_trait;
use futures::StreamExt;
use genui_interaction::{
    ChunkStream, GenerationRequest, ModelClient, ModelError, ScriptedModel, SessionEngine,
    SessionError,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

const SCREEN_ONE: &str = r#"{"screenId":"s1","blocks":[{"type":"button","label":"Go"}]}"#;
const SCREEN_TWO: &str =
    "Sure!\n```json\n{\"screenId\":\"s2\",\"blocks\":[{\"type\":\"text\",\"text\":\"Done\"}]}\n```";

fn drain(rx: &mut tokio::sync::mpsc::UnboundedReceiver<SessionState>) -> Vec<SessionState> {
    let mut states = Vec::new();
    while let Ok(state) = rx.try_recv() {
        states.push(state);
    }
    states
}

#[tokio::test]
async fn test_start_appends_user_and_assistant_turns() {
    let model = Arc::new(ScriptedModel::new().reply(SCREEN_ONE));
    let mut engine = SessionEngine::new(model.clone(), "protocol");

    let screen = engine
        .start("Show me a button", Some(json!({"locale": "en"})))
        .await
        .expect("turn should complete");

    assert_eq!(screen.screen_id, "s1");
    assert_eq!(engine.history().len(), 3);
    assert!(matches!(engine.history()[1], SessionMessage::User(_)));
    assert!(matches!(engine.history()[2], SessionMessage::Assistant(_)));
    assert_eq!(engine.current_screen().map(|s| s.screen_id.as_str()), Some("s1"));
    assert!(matches!(engine.state(), SessionState::Complete { .. }));

    let requests = model.requests().await;
    assert_eq!(requests.len(), 1);
    let wire = &requests[0].messages;
    assert_eq!(wire[0].role, WireRole::System);
    assert_eq!(wire[0].content, "protocol");
    assert_eq!(
        wire[1].content,
        "Show me a button\n\n[APP_CONTEXT]\n{\"locale\":\"en\"}"
    );
}

#[tokio::test]
async fn test_streaming_states_after_every_chunk() {
    let model = Arc::new(ScriptedModel::new().reply(SCREEN_ONE).with_chunk_chars(10));
    let mut engine = SessionEngine::new(model, "protocol");
    let mut rx = engine.subscribe();

    engine.send_message("go", None).await.unwrap();

    let states = drain(&mut rx);
    let chunk_count = SCREEN_ONE.chars().count().div_ceil(10);
    assert_eq!(states.len(), 1 + chunk_count + 1);
    assert_eq!(states[0], SessionState::Loading);

    let mut joined = String::new();
    for state in &states[1..=chunk_count] {
        match state {
            SessionState::Streaming { chunk, received } => {
                assert!(chunk.len() <= 10);
                joined.push_str(chunk);
                assert_eq!(*received, joined.len());
            }
            other => panic!("expected streaming, got {other:?}"),
        }
    }
    assert_eq!(joined, SCREEN_ONE);
    assert_eq!(engine.partial(), "");

    assert!(matches!(states.last(), Some(SessionState::Complete { screen }) if screen.screen_id == "s1"));
}

#[tokio::test]
async fn test_transport_error_leaves_history_unchanged() {
    let model = Arc::new(
        ScriptedModel::new()
            .reply(SCREEN_ONE)
            .fail(ModelError::request(Some(503), "unavailable")),
    );
    let mut engine = SessionEngine::new(model, "protocol");
    engine.start("first", None).await.unwrap();
    let before = engine.history().to_vec();

    let err = engine.send_message("second", None).await.unwrap_err();

    assert!(matches!(err, SessionError::Model(_)));
    assert_eq!(engine.history(), before.as_slice());
    assert_eq!(engine.current_screen().map(|s| s.screen_id.as_str()), Some("s1"));
    assert!(matches!(engine.state(), SessionState::Error { message } if message.contains("unavailable")));
}

#[tokio::test]
async fn test_mid_stream_failure_rolls_back() {
    let model = Arc::new(
        ScriptedModel::new().fail_mid_stream("{\"screenId\":\"s", ModelError::stream("reset")),
    );
    let mut engine = SessionEngine::new(model, "protocol");

    let err = engine.start("hello", None).await.unwrap_err();

    assert_eq!(err, SessionError::Model(ModelError::stream("reset")));
    assert_eq!(engine.history().len(), 1);
    assert!(engine.current_screen().is_none());
}

/// Sends one chunk, then never finishes.
struct StalledModel;

#[async_trait]
impl ModelClient for StalledModel {
    fn name(&self) -> &str {
        "stalled"
    }

    async fn stream(&self, _request: GenerationRequest) -> Result<ChunkStream, ModelError> {
        let head = futures::stream::iter(vec![Ok("{\"screenId\":".to_string())]);
        Ok(Box::pin(head.chain(futures::stream::pending())))
    }
}

#[tokio::test]
async fn test_abandoned_turn_rolls_back() {
    let mut engine = SessionEngine::new(Arc::new(StalledModel), "protocol");
    let mut rx = engine.subscribe();

    let outcome =
        tokio::time::timeout(Duration::from_millis(50), engine.start("hello", None)).await;

    assert!(outcome.is_err(), "stalled turn should time out");
    assert_eq!(engine.history().len(), 1);
    assert_eq!(engine.partial(), "");
    assert!(engine.current_screen().is_none());
    assert_eq!(
        engine.state(),
        &SessionState::Error {
            message: "turn cancelled".to_string()
        }
    );

    let states = drain(&mut rx);
    assert!(matches!(states[1], SessionState::Streaming { .. }));
    assert!(matches!(states.last(), Some(SessionState::Error { .. })));
}

#[tokio::test]
async fn test_empty_turn_is_rejected_before_sending() {
    let model = Arc::new(ScriptedModel::new().reply(SCREEN_ONE));
    let mut engine = SessionEngine::new(model.clone(), "protocol");
    let mut rx = engine.subscribe();

    let err = engine.start("", None).await.unwrap_err();
    assert_eq!(err, SessionError::EmptyTurn);
    assert!(!err.is_retryable());

    let err = engine.send_message("   ", Some(serde_json::Value::Null)).await.unwrap_err();
    assert_eq!(err, SessionError::EmptyTurn);

    assert!(model.requests().await.is_empty());
    assert_eq!(engine.history().len(), 1);
    assert_eq!(engine.state(), &SessionState::Idle);
    assert!(drain(&mut rx).is_empty());

    // Context alone is a turn.
    let screen = engine.start("", Some(json!({"tab": "home"}))).await.unwrap();
    assert_eq!(screen.screen_id, "s1");
}

#[tokio::test]
async fn test_non_json_reply_is_an_error_and_retry_succeeds() {
    let model = Arc::new(
        ScriptedModel::new()
            .reply("I'm not able to draw screens today.")
            .reply(SCREEN_TWO),
    );
    let mut engine = SessionEngine::new(model.clone(), "protocol");

    let err = engine.start("hello", None).await.unwrap_err();
    assert!(matches!(err, SessionError::Protocol(_)));
    assert_eq!(engine.history().len(), 1);

    let screen = engine.start("hello", None).await.unwrap();
    assert_eq!(screen.screen_id, "s2");
    assert_eq!(engine.history().len(), 3);

    // The retry carried the same context as the failed attempt, not two user turns.
    let requests = model.requests().await;
    assert_eq!(requests[0].messages, requests[1].messages);
}

#[tokio::test]
async fn test_interaction_turn_wire_format() {
    let model = Arc::new(ScriptedModel::new().reply(SCREEN_ONE).reply(SCREEN_TWO));
    let mut engine = SessionEngine::new(model.clone(), "protocol");
    engine.start("volume screen", None).await.unwrap();

    let event = UiAction::new(InteractionKind::SliderChange)
        .value(0.4)
        .field_id("volume")
        .into_event();
    engine.send_interaction(event, None).await.unwrap();

    let requests = model.requests().await;
    let second = &requests[1].messages;
    assert_eq!(second.len(), 4);
    assert_eq!(second[2].role, WireRole::Assistant);
    assert_eq!(second[2].content, SCREEN_ONE);

    let content = &second[3].content;
    let json_text = content
        .strip_prefix("[USER_INTERACTION]\n")
        .expect("interaction section first when there is no text");
    let sent: serde_json::Value = serde_json::from_str(json_text).unwrap();
    assert_eq!(sent["type"], "slider_change");
    assert_eq!(sent["data"], json!({"value": 0.4, "fieldId": "volume"}));
}

#[tokio::test]
async fn test_clear_history_keeps_system_only() {
    let model = Arc::new(ScriptedModel::demo());
    let mut engine = SessionEngine::new(model, "protocol");

    engine.start("one", None).await.unwrap();
    engine.send_message("two", None).await.unwrap();
    let Some(SessionMessage::Assistant(_)) = engine.history().last() else {
        panic!("expected assistant turn last");
    };
    let event = InteractionEvent::from_action(
        json!({"type": "topic", "id": "travel"})
            .as_object()
            .cloned()
            .unwrap(),
    );
    engine.send_interaction(event, None).await.unwrap();
    assert_eq!(engine.history().len(), 7);

    engine.clear_history();

    assert_eq!(engine.history().len(), 1);
    assert!(engine.history()[0].is_system());
    assert!(engine.current_screen().is_none());
    assert_eq!(engine.state(), &SessionState::Idle);
}

#[tokio::test]
async fn test_dropped_subscriber_is_pruned() {
    let model = Arc::new(ScriptedModel::demo());
    let mut engine = SessionEngine::new(model, "protocol");
    let rx = engine.subscribe();
    drop(rx);
    let mut live = engine.subscribe();

    engine.start("hi", None).await.unwrap();

    assert!(drain(&mut live).len() >= 3);
}

#[tokio::test]
async fn test_independent_sessions_share_nothing() {
    let model = Arc::new(ScriptedModel::demo());
    let mut a = SessionEngine::new(model.clone(), "protocol");
    let b = SessionEngine::new(model, "protocol");

    a.start("hi", None).await.unwrap();

    assert_ne!(a.id(), b.id());
    assert_eq!(b.history().len(), 1);
    assert!(b.current_screen().is_none());
}
