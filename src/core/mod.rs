//! Core client logic.
//!
//! This module contains:
//! - Collector: input slots, mode policy and validation
//! - DataUri: image file encoding
//! - Session: submit/resolve/reset state machine
//! - Display: result classification and rendering

pub mod collector;
pub mod data_uri;
pub mod display;
pub mod session;

// Re-export commonly used types
pub use collector::{InputCollector, ModePolicy, PreparedInput};
pub use session::{Outcome, Session, Submission};
