//! Mock Language Model for testing.
//!
//! Queued replies and errors are consumed in order; every request is
//! captured (minus the credential) for later assertions.
//!
//! # Example
//!
//! ```ignore
//! let model = MockLanguageModel::new()
//!     .with_response("Hello!---FOLLOW_UP---A|B")
//!     .with_error(GatewayError::InvalidCredential);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{GatewayError, GenerationRequest, GenerationResponse, LanguageModel, ModelInfo};

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Error(GatewayError),
}

/// Captured request, without the credential.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRequest {
    pub system_instruction: Option<String>,
    pub contents: String,
    pub response_schema: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default)]
pub struct MockLanguageModel {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    calls: Arc<Mutex<Vec<CapturedRequest>>>,
    delay: Duration,
}

impl MockLanguageModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.push(MockResponse::Success(text.into()));
        self
    }

    pub fn with_error(self, error: GatewayError) -> Self {
        self.push(MockResponse::Error(error));
        self
    }

    /// Simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn push(&self, response: MockResponse) {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(response);
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn calls(&self) -> Vec<CapturedRequest> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn last_call(&self) -> Option<CapturedRequest> {
        self.calls.lock().ok().and_then(|c| c.last().cloned())
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, GatewayError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(CapturedRequest {
                system_instruction: request.system_instruction.clone(),
                contents: request.contents.clone(),
                response_schema: request.response_schema.clone(),
            });
        }

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = self.responses.lock().ok().and_then(|mut q| q.pop_front());
        match next {
            Some(MockResponse::Success(text)) => Ok(GenerationResponse::new(text, "mock-model")),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(GatewayError::transient("mock response queue is empty")),
        }
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo::new("mock", "mock-model")
    }
}
