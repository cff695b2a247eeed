//! Session: the form's submit/resolve/reset state machine.
//!
//! ```text
//! Idle | AwaitingModeSelection --begin--> Loading --finish--> Success | Failure
//! Success | Failure --reset--> Idle (or AwaitingModeSelection)
//! ```
//!
//! At most one submission is in flight. `begin` hands out a [`Submission`]
//! tagged with an id; only the outcome carrying that id is accepted by
//! `finish`. There is no cancellation and no timeout at this layer.

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use super::collector::{InputCollector, PreparedInput};
use super::data_uri;
use crate::adapters::AnalysisService;
use crate::domain::{AnalysisRequest, AnalysisResult, InputKind, ViewState};
use crate::error::LensError;

/// A validated submission waiting to be sent
#[derive(Debug, Clone)]
pub struct Submission {
    id: Uuid,
    input: PreparedInput,
    started_at: DateTime<Utc>,
}

/// Resolution of a [`Submission`]
#[derive(Debug, Clone)]
pub struct Outcome {
    pub id: Uuid,
    pub result: Result<AnalysisResult, LensError>,
}

impl Submission {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> InputKind {
        self.input.kind()
    }

    /// Build the request (reading the image if needed) and send it once
    pub async fn run<S: AnalysisService + ?Sized>(self, service: &S) -> Outcome {
        info!(
            submission = %self.id,
            kind = %self.kind(),
            service = service.name(),
            "Submitting for analysis"
        );

        let result = match self.build_request().await {
            Ok(request) => service.analyze(&request).await,
            Err(e) => Err(e),
        };

        let elapsed_ms = (Utc::now() - self.started_at).num_milliseconds();
        match &result {
            Ok(r) => info!(submission = %self.id, verdict = %r.verdict, elapsed_ms, "Analysis complete"),
            Err(e) => warn!(submission = %self.id, error = %e, elapsed_ms, "Analysis failed"),
        }

        Outcome {
            id: self.id,
            result,
        }
    }

    async fn build_request(&self) -> Result<AnalysisRequest, LensError> {
        match &self.input {
            PreparedInput::Text {
                headline,
                hints,
                language,
            } => Ok(AnalysisRequest::text(headline.clone(), language.clone(), hints)),
            PreparedInput::Image { file, language } => {
                let uri = data_uri::read_as_data_uri(file.path()).await?;
                Ok(AnalysisRequest::image(uri, language.clone()))
            }
        }
    }
}

/// One user's form plus its current display state
pub struct Session<S> {
    service: S,
    collector: InputCollector,
    state: ViewState,
    pending: Option<Uuid>,
}

impl<S: AnalysisService> Session<S> {
    pub fn new(service: S, collector: InputCollector) -> Self {
        let state = resting_state(&collector);
        Self {
            service,
            collector,
            state,
            pending: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn collector(&self) -> &InputCollector {
        &self.collector
    }

    /// Edit the form. Does not change the display state.
    pub fn collector_mut(&mut self) -> &mut InputCollector {
        &mut self.collector
    }

    pub fn is_in_flight(&self) -> bool {
        self.pending.is_some()
    }

    /// Pick text or image; leaves `AwaitingModeSelection`
    pub fn select_mode(&mut self, kind: InputKind) {
        self.collector.select_mode(kind);
        if self.state == ViewState::AwaitingModeSelection {
            self.state = ViewState::Idle;
        }
    }

    /// Validate the form and enter `Loading`
    ///
    /// Rejects with [`LensError::Busy`] while another submission is pending,
    /// leaving the state untouched. A validation failure moves straight to
    /// `Failure` without anything being sent.
    pub fn begin(&mut self) -> Result<Submission, LensError> {
        if self.pending.is_some() {
            return Err(LensError::Busy);
        }

        let input = match self.collector.validate() {
            Ok(input) => input,
            Err(e) => {
                let error = LensError::from(e);
                warn!(code = "validation", error = %error, "Submission rejected");
                self.state = ViewState::Failure(error.clone());
                return Err(error);
            }
        };

        let submission = Submission {
            id: Uuid::new_v4(),
            input,
            started_at: Utc::now(),
        };
        self.pending = Some(submission.id);
        self.state = ViewState::Loading;
        Ok(submission)
    }

    /// Apply an outcome. Returns false for outcomes that are not pending.
    pub fn finish(&mut self, outcome: Outcome) -> bool {
        if self.pending != Some(outcome.id) {
            warn!(submission = %outcome.id, "Ignoring outcome for a submission that is not pending");
            return false;
        }
        self.pending = None;

        self.state = match outcome.result {
            Ok(result) => ViewState::Success(result),
            Err(error) => {
                if matches!(error, LensError::FileRead(_)) {
                    self.collector.clear_image();
                }
                ViewState::Failure(error)
            }
        };
        true
    }

    /// Run one full cycle: begin, send, finish
    pub async fn submit(&mut self) -> Result<AnalysisResult, LensError> {
        let submission = self.begin()?;
        let outcome = submission.run(&self.service).await;
        let result = outcome.result.clone();
        self.finish(outcome);
        result
    }

    /// Clear input, result and error. Refused while a submission is pending.
    ///
    /// Lands in `Idle` under the inferred policy and in
    /// `AwaitingModeSelection` under the explicit one.
    pub fn reset(&mut self) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.collector.clear();
        self.state = resting_state(&self.collector);
        true
    }
}

fn resting_state(collector: &InputCollector) -> ViewState {
    if collector.awaiting_mode() {
        ViewState::AwaitingModeSelection
    } else {
        ViewState::Idle
    }
}
