//! Enabled-rule state machine and the event-driven session built on it.

mod rules;
mod state;

pub use rules::RuleSet;
pub use state::{Event, Session, SessionState, SessionSummary, transition};
