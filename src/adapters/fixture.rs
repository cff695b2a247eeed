//! Canned analysis service for offline runs and tests.
//!
//! Answers every request with a fixed payload and records what it was
//! sent, so callers can check how many round trips happened.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use super::AnalysisService;
use crate::domain::{AnalysisRequest, AnalysisResult};
use crate::error::LensError;

/// The four reference payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixture {
    Verified,
    Misinformation,
    Authentic,
    Deepfake,
}

impl Fixture {
    /// The payload as the service would send it
    pub fn payload(self) -> Value {
        match self {
            Self::Verified => json!({
                "verdict": "VERIFIED",
                "status": "Verified",
                "confidence_score": 0.98,
                "similarity_score": 0.92,
                "evidence": [{
                    "source": "BBC News",
                    "url": "https://example.com/bbc-article",
                    "snippet": "Politician announces four-day weekend after parliament passes bill...",
                    "published_at": "2025-09-01T08:00:00Z"
                }],
                "original_headline": "Politician Announces Four-Day Weekend for All Workers",
                "processed_at": "2025-09-07T05:00:00Z"
            }),
            Self::Misinformation => json!({
                "verdict": "MISINFORMATION",
                "status": "Likely False / Misinformation",
                "confidence_score": 0.87,
                "similarity_score": 0.15,
                "evidence": [{
                    "source": "No reliable match",
                    "url": null,
                    "snippet": "No corroborating reports from reliable outlets found for this exact claim."
                }],
                "original_headline": "Politician Announces Four-Day Weekend for All Workers",
                "processed_at": "2025-09-07T05:02:00Z"
            }),
            Self::Authentic => json!({
                "verdict": "AUTHENTIC",
                "status": "Likely Authentic",
                "confidence_score": 0.91,
                "model": "deepfake-detector-v1",
                "explanations": {
                    "artifacts_detected": [],
                    "notes": "No significant manipulation artifacts detected; lighting and facial landmarks consistent."
                },
                "processed_at": "2025-09-07T05:11:00Z"
            }),
            Self::Deepfake => json!({
                "verdict": "DEEPFAKE",
                "status": "Likely Deepfake",
                "confidence_score": 0.88,
                "model": "deepfake-detector-v1",
                "explanations": {
                    "artifacts_detected": [
                        "inconsistent_eye_reflections",
                        "face_warping",
                        "temporal_inconsistency"
                    ],
                    "heatmap": "data:image/png;base64,..."
                },
                "processed_at": "2025-09-07T05:10:00Z"
            }),
        }
    }

    pub fn result(self) -> AnalysisResult {
        AnalysisResult::from_value(self.payload())
    }
}

/// Service that always gives the same answer
pub struct FixtureService {
    response: Result<AnalysisResult, LensError>,
    calls: AtomicUsize,
    requests: Mutex<Vec<AnalysisRequest>>,
}

impl FixtureService {
    pub fn new(fixture: Fixture) -> Self {
        Self::with_result(fixture.result())
    }

    /// Answer with an arbitrary result
    pub fn with_result(result: AnalysisResult) -> Self {
        Self::from_response(Ok(result))
    }

    /// Fail every request with `error`
    pub fn failing(error: LensError) -> Self {
        Self::from_response(Err(error))
    }

    fn from_response(response: Result<AnalysisResult, LensError>) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of analyze calls received
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received, oldest first
    pub fn requests(&self) -> Vec<AnalysisRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl AnalysisService for FixtureService {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, LensError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        debug!(kind = %request.kind, ok = self.response.is_ok(), "Fixture answering");
        self.response.clone()
    }
}
