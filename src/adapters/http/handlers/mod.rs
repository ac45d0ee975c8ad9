//! Request handlers, grouped by area.

pub mod catalog;
pub mod learning;
pub mod mentor;
pub mod progress;
pub mod system;
