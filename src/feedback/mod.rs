//! Feedback presentation
//!
//! Session summaries with unit conversion, and the coaching prompt passed
//! to an external language model.

pub mod summary;
pub mod prompt;

pub use summary::{FormIssue, FormIssues, IssueKind, SessionSummary, DEFAULT_INCHES_PER_UNIT};
pub use prompt::CoachPrompt;
