//! AI PM Forge - curriculum, skill tracker and mentor for aspiring AI product managers.
//!
//! Tracks competency scores, mastered skills and completed roadmap weeks for a
//! single local learner, lays out the skill catalog as a radial map, runs the
//! diagnostic and mastery quizzes, and proxies mentor conversations to a hosted
//! language model.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
