//! Input collection and pre-submission validation.
//!
//! The collector owns one [`Input`] slot, so a headline and an image can
//! never be held together: setting one replaces the other. It performs no
//! I/O; image files are only read when a submission runs.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use crate::domain::{ImageFile, Input, InputKind, TextHints, DEFAULT_LANGUAGE};
use crate::error::ValidationError;

/// How the submission mode is determined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModePolicy {
    /// Mode follows whichever input is populated
    #[default]
    Inferred,
    /// The user picks text or image before entering anything
    Explicit,
}

/// Validated input, ready to be turned into a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreparedInput {
    Text {
        headline: String,
        hints: TextHints,
        language: String,
    },
    Image {
        file: ImageFile,
        language: String,
    },
}

impl PreparedInput {
    pub fn kind(&self) -> InputKind {
        match self {
            Self::Text { .. } => InputKind::Text,
            Self::Image { .. } => InputKind::Image,
        }
    }
}

/// Form state for one analysis
#[derive(Debug, Clone)]
pub struct InputCollector {
    policy: ModePolicy,
    mode: Option<InputKind>,
    input: Input,
    hints: TextHints,
    /// Hints restored on clear
    default_hints: TextHints,
    language: String,
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new(ModePolicy::default())
    }
}

impl InputCollector {
    pub fn new(policy: ModePolicy) -> Self {
        Self {
            policy,
            mode: None,
            input: Input::Empty,
            hints: TextHints::default(),
            default_hints: TextHints::default(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Set the language hint sent with every request
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set hints pre-filled into every text request
    pub fn with_default_hints(mut self, hints: TextHints) -> Self {
        self.hints = hints.clone();
        self.default_hints = hints;
        self
    }

    pub fn policy(&self) -> ModePolicy {
        self.policy
    }

    /// The explicitly selected mode, if any
    pub fn mode(&self) -> Option<InputKind> {
        self.mode
    }

    pub fn input(&self) -> &Input {
        &self.input
    }

    pub fn hints(&self) -> &TextHints {
        &self.hints
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Whether the form still needs a text/image choice
    pub fn awaiting_mode(&self) -> bool {
        self.policy == ModePolicy::Explicit && self.mode.is_none()
    }

    /// Pick a mode. Switching modes drops input of the other kind.
    pub fn select_mode(&mut self, kind: InputKind) {
        if self.input.kind().is_some_and(|k| k != kind) {
            self.input = Input::Empty;
        }
        self.mode = Some(kind);
        debug!(mode = %kind, "Mode selected");
    }

    /// Enter a headline, replacing any selected image
    pub fn set_headline(&mut self, headline: impl Into<String>) -> Result<(), ValidationError> {
        self.check_mode(InputKind::Text)?;
        self.input = Input::Text(headline.into());
        Ok(())
    }

    /// Select an image, replacing any entered headline
    pub fn set_image(&mut self, path: impl Into<PathBuf>) -> Result<(), ValidationError> {
        self.check_mode(InputKind::Image)?;
        self.input = Input::Image(ImageFile::new(path));
        Ok(())
    }

    /// Drop the pending image reference, leaving a headline untouched
    pub fn clear_image(&mut self) {
        if matches!(self.input, Input::Image(_)) {
            self.input = Input::Empty;
        }
    }

    pub fn set_country(&mut self, country: impl Into<String>) {
        self.hints.country = non_empty(country.into());
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.hints.category = non_empty(category.into());
    }

    pub fn set_page_size(&mut self, page_size: impl Into<String>) {
        self.hints.page_size = non_empty(page_size.into());
    }

    /// Back to an empty form
    pub fn clear(&mut self) {
        self.mode = None;
        self.input = Input::Empty;
        self.hints = self.default_hints.clone();
    }

    /// Check that exactly one input is present for the active mode
    pub fn validate(&self) -> Result<PreparedInput, ValidationError> {
        let expected = match self.policy {
            ModePolicy::Inferred => None,
            ModePolicy::Explicit => match self.mode {
                Some(kind) => Some(kind),
                None => return Err(ValidationError::MissingInput { expected: None }),
            },
        };

        let missing = ValidationError::MissingInput { expected };
        if self.input.is_empty() {
            return Err(missing);
        }
        if expected.is_some() && self.input.kind() != expected {
            return Err(missing);
        }

        let prepared = match &self.input {
            Input::Text(headline) => PreparedInput::Text {
                headline: headline.clone(),
                hints: self.hints.clone(),
                language: self.language.clone(),
            },
            Input::Image(file) => PreparedInput::Image {
                file: file.clone(),
                language: self.language.clone(),
            },
            Input::Empty => return Err(missing),
        };
        Ok(prepared)
    }

    /// Explicit policy only accepts input for the selected mode
    fn check_mode(&self, kind: InputKind) -> Result<(), ValidationError> {
        if self.policy == ModePolicy::Inferred {
            return Ok(());
        }
        match self.mode {
            None => Err(ValidationError::MissingInput { expected: None }),
            Some(selected) if selected != kind => Err(ValidationError::ModeMismatch { selected }),
            Some(_) => Ok(()),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
