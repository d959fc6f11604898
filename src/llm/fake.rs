//! Scripted generator for tests.

use super::{ContentGenerator, GenerateContentRequest, GenerateContentResponse};
use crate::error::{Result, VoxError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays queued responses and records every request it receives.
#[derive(Default)]
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<Result<GenerateContentResponse>>>,
    requests: Mutex<Vec<(String, serde_json::Value)>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_json(&self, body: serde_json::Value) {
        let response = serde_json::from_value(body).expect("valid response fixture");
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_text(&self, text: &str) {
        self.push_json(serde_json::json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
        }));
    }

    pub fn push_audio(&self, pcm: &[u8]) {
        use base64::Engine;
        let data = base64::engine::general_purpose::STANDARD.encode(pcm);
        self.push_json(serde_json::json!({
            "candidates": [{"content": {"parts": [
                {"inlineData": {"mimeType": "audio/L16;codec=pcm;rate=24000", "data": data}}
            ]}}]
        }));
    }

    pub fn push_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(VoxError::Provider(message.to_string())));
    }

    /// Requests received so far as (model, JSON body).
    pub fn requests(&self) -> Vec<(String, serde_json::Value)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> (String, serde_json::Value) {
        self.requests().pop().expect("no request recorded")
    }
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let body = serde_json::to_value(request)?;
        self.requests.lock().unwrap().push((model.to_string(), body));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(VoxError::Provider("no scripted response".to_string())))
    }
}
