//! Single-turn producer chat with a locally kept transcript.

use super::context::ProjectContext;
use crate::config::Prompts;
use crate::error::{Result, VoxError};
use crate::llm::{ContentGenerator, GenerateContentRequest, GenerationConfig};
use crate::studio::OperationState;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

pub const EMPTY_REPLY: &str = "I'm sorry, I couldn't process that request.";
pub const SNAG_REPLY: &str = "Sorry, I hit a snag in the studio. Can you try that again?";

pub const DEFAULT_TEMPERATURE: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "you"),
            Role::Assistant => write!(f, "producer"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Stateless client for the chat model.
pub struct Assistant {
    generator: Arc<dyn ContentGenerator>,
    model: String,
    temperature: f32,
    prompts: Prompts,
}

impl Assistant {
    pub fn new(generator: Arc<dyn ContentGenerator>, model: &str) -> Self {
        Self {
            generator,
            model: model.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            prompts: Prompts::default(),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn greeting(&self) -> &str {
        &self.prompts.assistant.greeting
    }

    /// Only `message` is sent; earlier turns are not replayed.
    pub fn build_request(
        &self,
        message: &str,
        context: &ProjectContext,
    ) -> Result<GenerateContentRequest> {
        let mut vars = HashMap::new();
        vars.insert("context".to_string(), context.to_json()?);
        let system = self
            .prompts
            .render_with_custom(&self.prompts.assistant.system, &vars);

        Ok(GenerateContentRequest::from_text(message)
            .with_system_instruction(system)
            .with_generation_config(GenerationConfig {
                temperature: Some(self.temperature),
                ..Default::default()
            }))
    }

    /// Ask the model. An empty answer becomes [`EMPTY_REPLY`].
    #[instrument(skip(self, message, context), fields(chars = message.len()))]
    pub async fn reply(&self, message: &str, context: &ProjectContext) -> Result<String> {
        let request = self.build_request(message, context)?;
        let response = self.generator.generate_content(&self.model, &request).await?;
        Ok(response.text().unwrap_or_else(|| EMPTY_REPLY.to_string()))
    }
}

/// A conversation shown to the user. The transcript is display-only.
pub struct AssistantSession {
    assistant: Assistant,
    context: ProjectContext,
    transcript: Vec<ChatMessage>,
    state: OperationState,
}

impl AssistantSession {
    pub fn new(assistant: Assistant, context: ProjectContext) -> Self {
        let greeting = ChatMessage::new(Role::Assistant, assistant.greeting());
        Self {
            assistant,
            context,
            transcript: vec![greeting],
            state: OperationState::default(),
        }
    }

    pub fn set_context(&mut self, context: ProjectContext) {
        self.context = context;
    }

    pub fn context(&self) -> &ProjectContext {
        &self.context
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn suggestions(&self) -> &'static [&'static str] {
        self.context.suggestions()
    }

    pub fn state(&self) -> &OperationState {
        &self.state
    }

    /// Send a message and return the producer's answer.
    ///
    /// Blank input is ignored. Provider failures are answered with
    /// [`SNAG_REPLY`] so the conversation can continue.
    pub async fn send(&mut self, text: &str) -> Result<Option<&ChatMessage>> {
        let message = text.trim();
        if message.is_empty() {
            return Ok(None);
        }
        self.state.begin("assistant")?;
        self.transcript.push(ChatMessage::new(Role::User, message));

        let reply = match self.assistant.reply(message, &self.context).await {
            Ok(reply) => {
                debug!("Assistant replied with {} characters", reply.len());
                self.state.succeed();
                reply
            }
            Err(e) => {
                warn!("Assistant request failed: {}", e);
                self.state.fail(e.to_string());
                SNAG_REPLY.to_string()
            }
        };

        self.transcript.push(ChatMessage::new(Role::Assistant, reply));
        Ok(self.transcript.last())
    }

    /// Send the suggestion at `index`.
    pub async fn send_suggestion(&mut self, index: usize) -> Result<Option<&ChatMessage>> {
        let suggestion = self.suggestions().get(index).ok_or_else(|| {
            VoxError::InvalidInput(format!("No suggestion number {}", index + 1))
        })?;
        self.send(suggestion).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::fake::ScriptedGenerator;
    use crate::podcast::PodcastConfig;
    use serde_json::json;

    fn session(fake: &Arc<ScriptedGenerator>, context: ProjectContext) -> AssistantSession {
        AssistantSession::new(Assistant::new(fake.clone(), "chat-model"), context)
    }

    #[tokio::test]
    async fn test_request_shape() {
        let fake = Arc::new(ScriptedGenerator::new());
        fake.push_text("Try opening with a question.");
        let config = PodcastConfig::builder().source_text("My notes").build().unwrap();
        let mut session = session(&fake, ProjectContext::Config(config));

        session.send("first").await.unwrap();
        fake.push_text("Second answer");
        session.send("  How do I hook listeners?  ").await.unwrap();

        let (model, body) = fake.last_request();
        assert_eq!(model, "chat-model");
        assert_eq!(body["contents"].as_array().unwrap().len(), 1);
        assert_eq!(body["contents"][0]["parts"][0]["text"], "How do I hook listeners?");
        let temperature = body["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.8).abs() < 1e-6);

        let system = body["systemInstruction"]["parts"][0]["text"].as_str().unwrap();
        assert!(system.contains("VoxViral Executive Producer"));
        assert!(system.contains("\"sourceText\":\"My notes\""));
    }

    #[tokio::test]
    async fn test_transcript_and_fallbacks() {
        let fake = Arc::new(ScriptedGenerator::new());
        fake.push_json(json!({"candidates": [{"content": {"parts": []}}]}));
        fake.push_error("500");
        let mut session = session(&fake, ProjectContext::Empty);

        assert_eq!(session.transcript().len(), 1);
        assert!(session.transcript()[0].content.contains("Executive Producer"));

        let reply = session.send("hello").await.unwrap().unwrap();
        assert_eq!(reply.content, EMPTY_REPLY);

        let reply = session.send("again").await.unwrap().unwrap();
        assert_eq!(reply.content, SNAG_REPLY);
        assert!(!session.state().is_loading());

        assert_eq!(session.transcript().len(), 5);
        assert_eq!(session.transcript()[3].role, Role::User);
    }

    #[tokio::test]
    async fn test_blank_message_ignored() {
        let fake = Arc::new(ScriptedGenerator::new());
        let mut session = session(&fake, ProjectContext::Empty);

        assert!(session.send("   ").await.unwrap().is_none());
        assert!(fake.requests().is_empty());
        assert_eq!(session.transcript().len(), 1);
    }

    #[tokio::test]
    async fn test_send_suggestion() {
        let fake = Arc::new(ScriptedGenerator::new());
        fake.push_text("A title");
        let mut session = session(&fake, ProjectContext::Empty);

        session.send_suggestion(1).await.unwrap();
        let (_, body) = fake.last_request();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Suggest a creative title");

        assert!(session.send_suggestion(7).await.is_err());
    }

    #[test]
    fn test_custom_temperature() {
        let fake = Arc::new(ScriptedGenerator::new());
        let assistant = Assistant::new(fake, "m").with_temperature(0.3);
        let request = assistant.build_request("hi", &ProjectContext::Empty).unwrap();
        assert_eq!(request.generation_config.unwrap().temperature, Some(0.3));
    }
}
