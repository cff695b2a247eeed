//! Error taxonomy for a submission cycle.
//!
//! Every variant is surfaced to the user as a single line and none of them
//! is retried. Errors are `Clone` so the session can hold the last one in
//! its `Failure` state.

use thiserror::Error;

use crate::domain::InputKind;

/// Generic message when the service gives no usable `detail`
pub const ANALYSIS_FALLBACK_MESSAGE: &str = "Failed to analyze. Please try again.";

/// Pre-network validation failures raised by the input collector
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No input, or the selected mode's field is empty
    #[error("{}", missing_input_message(.expected))]
    MissingInput {
        /// The mode that was selected, if any
        expected: Option<InputKind>,
    },

    /// An input was offered for a mode other than the selected one
    #[error("Input does not match the selected mode ({selected}).")]
    ModeMismatch { selected: InputKind },
}

fn missing_input_message(expected: &Option<InputKind>) -> &'static str {
    match expected {
        Some(InputKind::Text) => "Please enter a headline.",
        Some(InputKind::Image) => "Please upload an image.",
        None => "Please select an option.",
    }
}

impl ValidationError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingInput { .. } => "missing-input",
            Self::ModeMismatch { .. } => "mode-mismatch",
        }
    }
}

/// Any failure of a submission cycle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LensError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The image could not be read or is not a recognizable image
    #[error("Could not read image file. {0}")]
    FileRead(String),

    /// Non-2xx response or transport failure
    #[error("{0}")]
    Analysis(String),

    /// A submission is already in flight
    #[error("An analysis is already in progress.")]
    Busy,
}

impl LensError {
    /// Analysis error carrying the service's `detail`, or the fallback
    pub fn analysis(detail: Option<String>) -> Self {
        Self::Analysis(
            detail
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| ANALYSIS_FALLBACK_MESSAGE.to_string()),
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
