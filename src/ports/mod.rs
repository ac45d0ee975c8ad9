//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `LanguageModel` - Hosted generative-language service
//! - `KeyValueStore` - Durable local persistence
//! - `CredentialSource` - Active API credential lookup

mod credential_source;
mod key_value_store;
mod language_model;

pub use credential_source::{CredentialSource, StaticCredential};
pub use key_value_store::{validate_key, KeyValueStore, StorageError, API_KEY_KEY, PROFILE_KEY};
pub use language_model::{
    GatewayError, GenerationRequest, GenerationResponse, LanguageModel, ModelInfo,
};
