//! HTTP adapter - the JSON API over the application services.
//!
//! Handlers are thin: they parse the request, call one service and map
//! the outcome through `ApiError`.

pub mod dto;
mod error;
mod handlers;
mod routes;
mod state;

pub use error::{status_for, ApiError, ApiResult, ErrorResponse};
pub use routes::router;
pub use state::AppState;
