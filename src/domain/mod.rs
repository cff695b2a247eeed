//! Domain types for ethical-lens.
//!
//! This module contains the core data structures:
//! - Request: collected input and the outgoing JSON envelope
//! - Result: verdict payloads returned by the analysis service
//! - State: the session's display state

pub mod request;
pub mod result;
pub mod state;

// Re-export commonly used types
pub use request::{
    AnalysisRequest, ImageFile, Input, InputKind, Metadata, TextHints, DEFAULT_LANGUAGE,
};
pub use result::{AnalysisResult, EvidenceItem, Explanations, Verdict, VerdictDomain};
pub use state::{StateLabel, ViewState};
