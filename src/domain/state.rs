//! Display state of a session.

use super::result::AnalysisResult;
use crate::error::LensError;

/// Where the session is in its submit/resolve/reset cycle
///
/// A result and an error are never held at the same time.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// Form is shown and accepts input
    Idle,

    /// Explicit mode policy: the user has not picked text or image yet
    AwaitingModeSelection,

    /// A submission is in flight
    Loading,

    /// The service returned a result
    Success(AnalysisResult),

    /// Validation, file read or analysis failed
    Failure(LensError),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Terminal states are left only through reset
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Failure(_))
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&LensError> {
        match self {
            Self::Failure(error) => Some(error),
            _ => None,
        }
    }

    /// Short lowercase label for logs and the interactive prompt
    pub fn label(&self) -> StateLabel {
        match self {
            Self::Idle => StateLabel::Idle,
            Self::AwaitingModeSelection => StateLabel::AwaitingModeSelection,
            Self::Loading => StateLabel::Loading,
            Self::Success(_) => StateLabel::Success,
            Self::Failure(_) => StateLabel::Failure,
        }
    }
}

/// Payload-free view of [`ViewState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateLabel {
    Idle,
    AwaitingModeSelection,
    Loading,
    Success,
    Failure,
}

impl std::fmt::Display for StateLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::AwaitingModeSelection => "awaiting_mode_selection",
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Failure => "failure",
        };
        write!(f, "{}", s)
    }
}
