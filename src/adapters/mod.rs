//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `ai` - Language model providers (Gemini, scripted mock)
//! - `storage` - Key-value persistence (file, in-memory)
//! - `http` - JSON API served with axum

pub mod ai;
pub mod http;
pub mod storage;
