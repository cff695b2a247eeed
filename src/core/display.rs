//! Pure display mapping for analysis results.
//!
//! Nothing here holds state: the same result always renders the same way.

use std::fmt::Write;

use chrono::DateTime;

use crate::domain::{AnalysisResult, Verdict, VerdictDomain};

/// Which detail block a verdict gets
pub fn classify(verdict: Verdict) -> VerdictDomain {
    verdict.domain()
}

/// True exactly for VERIFIED and AUTHENTIC
pub fn is_safe(verdict: Verdict) -> bool {
    verdict.is_safe()
}

/// Format a [0,1] score as a percentage with two decimals, e.g. `98.00%`
pub fn percent(score: f64) -> String {
    format!("{:.2}%", score * 100.0)
}

/// Timestamps that parse as RFC 3339 are shown in UTC; anything else verbatim
pub fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts
            .with_timezone(&chrono::Utc)
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Render a result as a plain-text card
pub fn render(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let badge = if is_safe(result.verdict) { "SAFE" } else { "ALERT" };

    let _ = writeln!(out, "Analysis Result");
    let _ = writeln!(out, "[{}] {}", badge, status_label(result));

    match classify(result.verdict) {
        VerdictDomain::Text => render_text(&mut out, result),
        VerdictDomain::Image => render_image(&mut out, result),
        VerdictDomain::Unknown => render_confidence(&mut out, result),
    }

    if let Some(ref processed_at) = result.processed_at {
        let _ = writeln!(out, "Processed At: {}", format_timestamp(processed_at));
    }

    out
}

/// Status text, falling back to the verdict as sent
fn status_label(result: &AnalysisResult) -> String {
    match result.status.as_deref().filter(|s| !s.is_empty()) {
        Some(status) => status.to_string(),
        None => result
            .verdict_label()
            .map(str::to_string)
            .unwrap_or_else(|| result.verdict.to_string()),
    }
}

fn render_confidence(out: &mut String, result: &AnalysisResult) {
    if let Some(confidence) = result.confidence_score {
        let _ = writeln!(out, "Confidence Score: {}", percent(confidence));
    }
}

fn render_text(out: &mut String, result: &AnalysisResult) {
    if let Some(ref headline) = result.original_headline {
        let _ = writeln!(out, "Original Headline: {}", headline);
    }
    render_confidence(out, result);
    if let Some(similarity) = result.similarity_score {
        let _ = writeln!(out, "Similarity Score: {}", percent(similarity));
    }

    if !result.evidence.is_empty() {
        let _ = writeln!(out, "Evidence:");
        for item in &result.evidence {
            let source = item.source.as_deref().unwrap_or("Unknown source");
            let snippet = item.snippet.as_deref().unwrap_or_default();
            match item.url {
                Some(ref url) => {
                    let _ = writeln!(out, "  - {} ({}): \"{}\"", source, url, snippet);
                }
                None => {
                    let _ = writeln!(out, "  - {}: \"{}\"", source, snippet);
                }
            }
        }
    }
}

fn render_image(out: &mut String, result: &AnalysisResult) {
    render_confidence(out, result);
    if let Some(ref model) = result.model {
        let _ = writeln!(out, "Model: {}", model);
    }

    let artifacts = result.artifacts();
    if !artifacts.is_empty() {
        let _ = writeln!(out, "Artifacts Detected:");
        for artifact in artifacts {
            let _ = writeln!(out, "  - {}", artifact);
        }
    }

    if let Some(notes) = result.explanations.as_ref().and_then(|e| e.notes.as_ref()) {
        let _ = writeln!(out, "Notes: {}", notes);
    }
}
