//! Adapter interfaces for the external analysis service.
//!
//! The service is an opaque collaborator: it receives one
//! [`AnalysisRequest`] and answers with an [`AnalysisResult`] or an error.

pub mod fixture;
pub mod http;

use async_trait::async_trait;

use crate::domain::{AnalysisRequest, AnalysisResult};
use crate::error::LensError;

pub use fixture::{Fixture, FixtureService};
pub use http::HttpAnalysisClient;

/// Something that can analyze a headline or an image
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Human-readable service name
    fn name(&self) -> &str;

    /// Perform exactly one analysis round trip. Never retries.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, LensError>;
}

#[async_trait]
impl<S: AnalysisService + ?Sized> AnalysisService for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, LensError> {
        (**self).analyze(request).await
    }
}

#[async_trait]
impl<S: AnalysisService + ?Sized> AnalysisService for std::sync::Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, LensError> {
        (**self).analyze(request).await
    }
}
