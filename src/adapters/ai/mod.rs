//! Language Model Adapters.
//!
//! Implementations of the LanguageModel port.
//!
//! ## Available Adapters
//!
//! - `GeminiProvider` - Google generative-language REST API
//! - `MockLanguageModel` - Configurable mock for testing

mod gemini_provider;
mod mock_provider;

pub use gemini_provider::{classify_failure, GeminiConfig, GeminiProvider};
pub use mock_provider::{CapturedRequest, MockLanguageModel, MockResponse};
