//! ethical-lens - headline fact-checking and deepfake detection client
//!
//! Collects either a news headline or an image, sends it to an external
//! analysis service, and renders the verdict it returns.
//!
//! # Architecture
//!
//! The system is a single submit/resolve/reset cycle:
//! - The input collector holds exactly one of headline or image
//! - A session validates it, sends one request, and records the outcome
//! - Results are classified and rendered by a pure display mapping
//!
//! # Modules
//!
//! - `adapters`: The analysis service seam (HTTP, fixtures)
//! - `core`: Collector, session state machine, encoding, display
//! - `domain`: Data structures (AnalysisRequest, AnalysisResult, ViewState)
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Check a headline
//! ethical-lens text "Politician announces four-day weekend" --country us
//!
//! # Check an image
//! ethical-lens image ./portrait.jpg
//!
//! # Try it without a running service
//! ethical-lens --fixture deepfake image ./portrait.jpg
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod error;

// Re-export main types at crate root for convenience
pub use adapters::{AnalysisService, Fixture, FixtureService, HttpAnalysisClient};
pub use crate::core::{InputCollector, ModePolicy, Session};
pub use domain::{AnalysisRequest, AnalysisResult, Input, InputKind, Verdict, ViewState};
pub use error::{LensError, ValidationError};
