//! Domain layer containing curriculum logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (identifiers, timestamps, errors, state machine)
//! - `competency` - The five scored dimensions and aggregate reporting
//! - `learner` - Learner profile captured at onboarding
//! - `catalog` - Static curriculum content (weeks, skills, quizzes)
//! - `progress` - Learner progress aggregate
//! - `roadmap` - Week highlighting by skill gap
//! - `assessment` - Diagnostic and mastery quiz flows
//! - `constellation` - Radial skill map layout
//! - `mentor` - Mentor conversation entities and prompt text
//! - `navigation` - Named views and deep links

pub mod assessment;
pub mod catalog;
pub mod competency;
pub mod constellation;
pub mod foundation;
pub mod learner;
pub mod mentor;
pub mod navigation;
pub mod progress;
pub mod roadmap;
