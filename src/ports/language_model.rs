//! Language Model Port - Interface for the hosted generative-language service.
//!
//! Used for both mentor replies and diagnostic grading. Adapters classify
//! provider failures into [`GatewayError`] once, at the boundary, so callers
//! switch on a tag instead of inspecting error text.
//!
//! # Example
//!
//! ```ignore
//! let request = GenerationRequest::new(key, "Context: ...\n\nUser: What is RAG?")
//!     .with_system_instruction(persona);
//! let reply = model.generate(request).await?;
//! ```

use async_trait::async_trait;
use secrecy::Secret;
use serde::Serialize;


/// Port for text generation.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generates a single non-streaming reply.
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, GatewayError>;

    /// Provider name and model identifier.
    fn model_info(&self) -> ModelInfo;
}

/// Request for one generation.
#[derive(Debug)]
pub struct GenerationRequest {
    /// API credential for this call.
    pub credential: Secret<String>,
    /// Persona and formatting rules.
    pub system_instruction: Option<String>,
    /// Single user turn.
    pub contents: String,
    /// When set, the reply must be JSON matching this schema.
    pub response_schema: Option<serde_json::Value>,
}

impl GenerationRequest {
    pub fn new(credential: Secret<String>, contents: impl Into<String>) -> Self {
        Self {
            credential,
            system_instruction: None,
            contents: contents.into(),
            response_schema: None,
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_response_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResponse {
    /// Generated text; may be empty.
    pub text: String,
    pub model: String,
}

impl GenerationResponse {
    pub fn new(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub provider: String,
    pub model: String,
}

impl ModelInfo {
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
        }
    }
}

/// Failure classes callers render differently.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// No credential is configured at all.
    #[error("no API key configured")]
    MissingCredential,

    /// A credential was sent and rejected by the provider.
    #[error("API key rejected by the provider")]
    InvalidCredential,

    /// Anything else: network, rate limit, outage, malformed reply.
    #[error("{0}")]
    Transient(String),
}

impl GatewayError {
    pub fn transient(message: impl Into<String>) -> Self {
        Self::Transient(message.into())
    }

    /// True for the two credential-related classes.
    pub fn is_credential_problem(&self) -> bool {
        matches!(self, Self::MissingCredential | Self::InvalidCredential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn builder_sets_optional_fields() {
        let req = GenerationRequest::new(Secret::new("k".to_string()), "hi")
            .with_system_instruction("be brief")
            .with_response_schema(serde_json::json!({"type": "object"}));
        assert_eq!(req.credential.expose_secret(), "k");
        assert_eq!(req.system_instruction.as_deref(), Some("be brief"));
        assert!(req.response_schema.is_some());
    }

    #[test]
    fn debug_output_redacts_credential() {
        let req = GenerationRequest::new(Secret::new("super-secret".to_string()), "hi");
        assert!(!format!("{:?}", req).contains("super-secret"));
    }

    #[test]
    fn credential_errors_are_distinguished() {
        assert!(GatewayError::MissingCredential.is_credential_problem());
        assert!(GatewayError::InvalidCredential.is_credential_problem());
        assert!(!GatewayError::transient("503").is_credential_problem());
        assert_ne!(GatewayError::MissingCredential, GatewayError::InvalidCredential);
    }

    #[test]
    fn transient_displays_message() {
        assert_eq!(GatewayError::transient("rate limited").to_string(), "rate limited");
    }
}
