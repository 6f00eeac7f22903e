//! Session engine: one conversation with one model.
//!
//! Each `send*` call appends a user turn, streams a generation built from
//! the whole history, and on completion extracts and parses the screen.
//! A failed or abandoned turn is rolled back, so history and the current
//! screen are exactly as they were before the call.
//!
//! Calls take `&mut self`: a session has a single writer and no internal
//! locking. Independent sessions share nothing.

use crate::model::{GenerationRequest, ModelClient, ModelError};
use futures::StreamExt;
use genui_core::block::Screen;
use genui_core::interaction::InteractionEvent;
use genui_core::parser::{ParseReport, parse_generation};
use genui_core::session::{AssistantTurn, History, SessionMessage, SessionState, UserTurn};
use genui_core::GenUiError;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::Instrument;
use uuid::Uuid;

/// Why a turn failed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The model client failed before or during streaming
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The generation was not a usable screen
    #[error(transparent)]
    Protocol(#[from] GenUiError),

    /// Nothing to send: no text, interaction or context
    #[error("turn has no text, interaction or context")]
    EmptyTurn,
}

impl SessionError {
    pub fn is_retryable(&self) -> bool {
        match self {
            SessionError::Model(err) => err.is_retryable(),
            SessionError::Protocol(_) => true,
            SessionError::EmptyTurn => false,
        }
    }
}

pub struct SessionEngine {
    id: Uuid,
    model: Arc<dyn ModelClient>,
    history: History,
    current_screen: Option<Screen>,
    last_report: Option<ParseReport>,
    state: SessionState,
    partial: String,
    observers: Vec<mpsc::UnboundedSender<SessionState>>,
    max_tokens: Option<u32>,
}

impl SessionEngine {
    pub fn new(model: Arc<dyn ModelClient>, system_prompt: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            model,
            history: History::new(system_prompt),
            current_screen: None,
            last_report: None,
            state: SessionState::Idle,
            partial: String::new(),
            observers: Vec::new(),
            max_tokens: None,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Per-request cap passed to the model client.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn history(&self) -> &[SessionMessage] {
        self.history.messages()
    }

    pub fn current_screen(&self) -> Option<&Screen> {
        self.current_screen.as_ref()
    }

    /// Blocks dropped while parsing the current screen.
    pub fn last_report(&self) -> Option<&ParseReport> {
        self.last_report.as_ref()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Text received so far for the turn in flight; empty between turns.
    pub fn partial(&self) -> &str {
        &self.partial
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Receives every state transition from now on.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<SessionState> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.observers.push(tx);
        rx
    }

    /// First turn: the user's instruction and an optional app context.
    pub async fn start(
        &mut self,
        instruction: &str,
        context: Option<Value>,
    ) -> Result<Screen, SessionError> {
        self.run_turn(UserTurn::text(instruction).with_context(context))
            .await
    }

    pub async fn send_message(
        &mut self,
        text: &str,
        context: Option<Value>,
    ) -> Result<Screen, SessionError> {
        self.run_turn(UserTurn::text(text).with_context(context))
            .await
    }

    pub async fn send_interaction(
        &mut self,
        event: InteractionEvent,
        context: Option<Value>,
    ) -> Result<Screen, SessionError> {
        self.run_turn(UserTurn::interaction(event).with_context(context))
            .await
    }

    /// Truncates history to its System message and forgets the current
    /// screen. Does not cancel anything in flight.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.current_screen = None;
        self.last_report = None;
        tracing::debug!(session_id = %self.id, "history cleared");
        self.set_state(SessionState::Idle);
    }

    async fn run_turn(&mut self, turn: UserTurn) -> Result<Screen, SessionError> {
        if turn.is_empty() {
            return Err(SessionError::EmptyTurn);
        }

        let span = tracing::info_span!(
            "turn",
            session_id = %self.id,
            model = self.model.name(),
            history = self.history.len()
        );
        self.run_turn_inner(turn).instrument(span).await
    }

    async fn run_turn_inner(&mut self, turn: UserTurn) -> Result<Screen, SessionError> {
        let mut pending = PendingTurn::begin(self, turn);
        let result = pending.engine.generate().await;
        pending.settle(result)
    }

    async fn generate(&mut self) -> Result<(Screen, String, ParseReport), SessionError> {
        let request = GenerationRequest {
            messages: self.history.to_wire(),
            max_tokens: self.max_tokens,
        };

        let mut chunks = self.model.stream(request).await?;
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk?;
            self.partial.push_str(&chunk);
            let received = self.partial.len();
            self.set_state(SessionState::Streaming { chunk, received });
        }
        let raw_text = std::mem::take(&mut self.partial);
        tracing::debug!(chars = raw_text.len(), "generation finished");

        let (screen, report) = parse_generation(&raw_text)?;
        Ok((screen, raw_text, report))
    }

    fn set_state(&mut self, state: SessionState) {
        self.observers.retain(|tx| tx.send(state.clone()).is_ok());
        self.state = state;
    }
}

/// A user turn pushed onto history whose outcome is not recorded yet.
///
/// Dropping it unsettled (the turn future was abandoned mid-stream) rolls
/// history back to the checkpoint.
struct PendingTurn<'a> {
    engine: &'a mut SessionEngine,
    checkpoint: usize,
    settled: bool,
}

impl<'a> PendingTurn<'a> {
    fn begin(engine: &'a mut SessionEngine, turn: UserTurn) -> Self {
        let checkpoint = engine.history.len();
        engine.partial.clear();
        engine.history.push_user(turn);
        engine.set_state(SessionState::Loading);
        Self {
            engine,
            checkpoint,
            settled: false,
        }
    }

    fn settle(
        mut self,
        result: Result<(Screen, String, ParseReport), SessionError>,
    ) -> Result<Screen, SessionError> {
        self.settled = true;
        let engine = &mut *self.engine;

        match result {
            Ok((screen, raw_text, report)) => {
                tracing::info!(
                    screen_id = %screen.screen_id,
                    blocks = screen.block_count(),
                    dropped = report.dropped.len(),
                    "turn complete"
                );
                engine
                    .history
                    .push_assistant(AssistantTurn::new(screen.clone(), raw_text));
                engine.current_screen = Some(screen.clone());
                engine.last_report = Some(report);
                engine.set_state(SessionState::Complete {
                    screen: screen.clone(),
                });
                Ok(screen)
            }
            Err(err) => {
                tracing::warn!(error = %err, "turn failed, history rolled back");
                engine.history.truncate(self.checkpoint);
                engine.partial.clear();
                engine.set_state(SessionState::Error {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }
}

impl Drop for PendingTurn<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        tracing::warn!("turn abandoned, history rolled back");
        self.engine.history.truncate(self.checkpoint);
        self.engine.partial.clear();
        self.engine.set_state(SessionState::Error {
            message: "turn cancelled".to_string(),
        });
    }
}
