//! ScriptedModel - offline model client that replays canned replies.
//!
//! Used by tests and by the `scripted` provider. Each call to `stream`
//! consumes the next step of the script; replies are cut into fixed-size
//! chunks so callers see real streaming.

use crate::model::{ChunkStream, GenerationRequest, ModelClient, ModelError};
use async_trait::async_trait;
use futures::StreamExt;
use std::collections::VecDeque;
use tokio::sync::Mutex;

const DEFAULT_CHUNK_CHARS: usize = 16;

/// Built-in screen served by [`ScriptedModel::demo`].
pub const DEMO_SCREEN: &str = r#"Here is a screen for you:
```json
{
  "screenId": "welcome",
  "role": "home",
  "tone": "friendly",
  "blocks": [
    {"type": "hero", "headline": "Welcome", "subhead": "A screen described by data", "emphasis": "hero"},
    {"type": "text", "text": "Pick a topic or type a request."},
    {"type": "row", "arrangement": "space_between", "children": [
      {"type": "chip", "label": "Travel", "action": {"type": "topic", "id": "travel"}},
      {"type": "chip", "label": "Recipes", "action": {"type": "topic", "id": "recipes"}}
    ]},
    {"type": "slider", "label": "Detail", "id": "detail", "value": 0.5},
    {"type": "button", "label": "Continue", "role": "primary_action", "action": {"type": "continue"}}
  ]
}
```"#;

/// One scripted reaction to a request.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStep {
    /// Stream this text, then finish.
    Reply(String),
    /// Fail before the first chunk.
    Fail(ModelError),
    /// Stream `prefix`, then fail.
    FailMidStream { prefix: String, error: ModelError },
}

pub struct ScriptedModel {
    steps: Mutex<VecDeque<ScriptStep>>,
    /// Served whenever the script is exhausted.
    fallback: Option<String>,
    requests: Mutex<Vec<GenerationRequest>>,
    chunk_chars: usize,
    label: String,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self {
            steps: Mutex::new(VecDeque::new()),
            fallback: None,
            requests: Mutex::new(Vec::new()),
            chunk_chars: DEFAULT_CHUNK_CHARS,
            label: "scripted".to_string(),
        }
    }

    /// Serves [`DEMO_SCREEN`] on every turn.
    pub fn demo() -> Self {
        Self::new().with_fallback(DEMO_SCREEN)
    }

    pub fn reply(mut self, text: impl Into<String>) -> Self {
        self.steps.get_mut().push_back(ScriptStep::Reply(text.into()));
        self
    }

    pub fn fail(mut self, error: ModelError) -> Self {
        self.steps.get_mut().push_back(ScriptStep::Fail(error));
        self
    }

    pub fn fail_mid_stream(mut self, prefix: impl Into<String>, error: ModelError) -> Self {
        self.steps.get_mut().push_back(ScriptStep::FailMidStream {
            prefix: prefix.into(),
            error,
        });
        self
    }

    pub fn with_fallback(mut self, text: impl Into<String>) -> Self {
        self.fallback = Some(text.into());
        self
    }

    /// Characters per chunk; at least one.
    pub fn with_chunk_chars(mut self, chunk_chars: usize) -> Self {
        self.chunk_chars = chunk_chars.max(1);
        self
    }

    /// Appends a step to a model that is already shared.
    pub async fn push(&self, step: ScriptStep) {
        self.steps.lock().await.push_back(step);
    }

    /// Every request received so far, oldest first.
    pub async fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn remaining(&self) -> usize {
        self.steps.lock().await.len()
    }

    fn chunks(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        chars
            .chunks(self.chunk_chars)
            .map(|chunk| chunk.iter().collect())
            .collect()
    }
}

impl Default for ScriptedModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelClient for ScriptedModel {
    fn name(&self) -> &str {
        &self.label
    }

    async fn stream(&self, request: GenerationRequest) -> Result<ChunkStream, ModelError> {
        self.requests.lock().await.push(request);

        let step = match self.steps.lock().await.pop_front() {
            Some(step) => step,
            None => match &self.fallback {
                Some(text) => ScriptStep::Reply(text.clone()),
                None => return Err(ModelError::config("scripted model has no more replies")),
            },
        };

        let (text, error) = match step {
            ScriptStep::Reply(text) => (text, None),
            ScriptStep::Fail(error) => return Err(error),
            ScriptStep::FailMidStream { prefix, error } => (prefix, Some(error)),
        };

        let chunks = self.chunks(&text).into_iter().map(Ok);
        let stream = futures::stream::iter(chunks).chain(futures::stream::iter(error.map(Err)));
        Ok(stream.boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerationRequest {
        GenerationRequest {
            messages: Vec::new(),
            max_tokens: None,
        }
    }

    #[tokio::test]
    async fn test_reply_is_chunked() {
        let model = ScriptedModel::new().reply("abcdefgh").with_chunk_chars(3);
        let chunks: Vec<_> = model.stream(request()).await.unwrap().collect().await;
        let chunks: Vec<String> = chunks.into_iter().map(Result::unwrap).collect();
        assert_eq!(chunks, ["abc", "def", "gh"]);
    }

    #[tokio::test]
    async fn test_failures_and_exhaustion() {
        let model = ScriptedModel::new()
            .fail(ModelError::request(Some(500), "boom"))
            .fail_mid_stream("{\"scr", ModelError::stream("cut"));

        assert!(model.stream(request()).await.is_err());

        let items: Vec<_> = model.stream(request()).await.unwrap().collect().await;
        assert_eq!(items.last(), Some(&Err(ModelError::stream("cut"))));

        let err = model.stream(request()).await.err();
        assert!(matches!(err, Some(ModelError::Config(_))));
        assert_eq!(model.requests().await.len(), 3);
    }

    #[tokio::test]
    async fn test_demo_repeats() {
        let model = ScriptedModel::demo();
        for _ in 0..2 {
            let text: String = model
                .stream(request())
                .await
                .unwrap()
                .map(|c| c.unwrap())
                .collect()
                .await;
            assert_eq!(text, DEMO_SCREEN);
        }
    }

    #[test]
    fn test_demo_screen_parses_cleanly() {
        let (screen, report) = genui_core::parse_generation(DEMO_SCREEN).unwrap();
        assert_eq!(screen.screen_id, "welcome");
        assert_eq!(screen.blocks.len(), 5);
        assert!(report.is_clean());
    }
}
