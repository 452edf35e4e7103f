//! Risk assessment aggregator.

use crate::exclusion::is_excluded;
use crate::normalize::{fold_accents, normalize};
use crate::patterns::{risk_patterns, RiskPattern};
use crate::types::{RiskAssessment, RiskLevel};
use crate::emergency::emergency_response;

/// Increment added per corroborating match beyond the severity-setting one.
const CORROBORATION_INCREMENT: f64 = 0.05;

/// Tier-specific confidence ceiling: multiple independent signals raise
/// certainty, but a single keyword never alone claims near-certainty.
fn confidence_ceiling(level: RiskLevel) -> f64 {
    match level {
        RiskLevel::Critical => 0.95,
        RiskLevel::High => 0.85,
        RiskLevel::Medium => 0.75,
        RiskLevel::Low => 0.6,
        RiskLevel::None => 0.0,
    }
}

/// Classify one inbound message.
///
/// Pipeline: normalize → exclusion filter → pattern scan over both the
/// normalized and the accent-folded text (a pattern matching in either form
/// counts once) → aggregate. All tiers are evaluated and the maximum
/// achieved severity wins; the primary risk type is the first pattern (in
/// declaration order) that reached that severity.
pub fn assess_risk(message: &str) -> RiskAssessment {
    let normalized = normalize(message);
    if normalized.is_empty() {
        return RiskAssessment::none();
    }
    let folded = fold_accents(&normalized);

    if is_excluded(&normalized, &folded) {
        let mut assessment = RiskAssessment::none();
        assessment.indicators.push("exclusion_match".to_string());
        return assessment;
    }

    let matched: Vec<&RiskPattern> = risk_patterns()
        .iter()
        .filter(|p| p.regex.is_match(&normalized) || p.regex.is_match(&folded))
        .collect();

    if matched.is_empty() {
        return RiskAssessment::none();
    }

    let highest_severity = matched
        .iter()
        .map(|p| p.spec.severity)
        .max()
        .expect("non-empty match set");

    // First pattern reaching the highest severity, in declaration order.
    let primary = matched
        .iter()
        .find(|p| p.spec.severity == highest_severity)
        .expect("non-empty match set");

    let extra_matches = matched.len().saturating_sub(1);
    let confidence_score = (primary.spec.confidence
        + extra_matches as f64 * CORROBORATION_INCREMENT)
        .min(confidence_ceiling(highest_severity))
        .min(1.0);

    let indicators = dedup_indicators(&matched);
    let requires_emergency =
        highest_severity == RiskLevel::High || highest_severity == RiskLevel::Critical;
    let risk_type = primary.spec.risk_type;

    tracing::debug!(
        risk_level = highest_severity.as_str(),
        risk_type = risk_type.as_str(),
        matches = matched.len(),
        confidence = confidence_score,
        "risk assessment"
    );

    RiskAssessment {
        risk_level: highest_severity,
        risk_type: Some(risk_type),
        indicators,
        confidence_score,
        requires_emergency_response: requires_emergency,
        emergency_response: requires_emergency
            .then(|| emergency_response(risk_type).to_string()),
    }
}

/// `"{type} ({confidence}%)"` audit strings, order-preserving, deduplicated.
fn dedup_indicators(matched: &[&RiskPattern]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(matched.len());
    for p in matched {
        let label = format!(
            "{} ({}%)",
            p.spec.risk_type.as_str(),
            (p.spec.confidence * 100.0).round() as u32
        );
        if !out.contains(&label) {
            out.push(label);
        }
    }
    out
}
