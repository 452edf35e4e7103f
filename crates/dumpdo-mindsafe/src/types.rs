//! Risk classification types.

use serde::{Deserialize, Serialize};

/// Ordered severity of a detected signal: none < low < medium < high < critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::None => "none",
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

/// Category of crisis signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskType {
    SuicidalIdeation,
    SelfHarm,
    Violence,
    SubstanceCrisis,
    PanicAttack,
    SevereDistress,
}

impl RiskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskType::SuicidalIdeation => "suicidal_ideation",
            RiskType::SelfHarm => "self_harm",
            RiskType::Violence => "violence",
            RiskType::SubstanceCrisis => "substance_crisis",
            RiskType::PanicAttack => "panic_attack",
            RiskType::SevereDistress => "severe_distress",
        }
    }
}

/// Output of classifying one inbound message. Computed fresh per message,
/// never persisted as-is — consumers copy fields into message/log records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    /// Null iff `risk_level` is none.
    pub risk_type: Option<RiskType>,
    /// Human-readable matched-pattern descriptions, evaluation order.
    pub indicators: Vec<String>,
    /// In [0, 1]; zero iff `risk_level` is none.
    pub confidence_score: f64,
    pub requires_emergency_response: bool,
    /// Present iff `requires_emergency_response` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_response: Option<String>,
}

impl RiskAssessment {
    /// Assessment for a message with no detected indicators.
    pub fn none() -> Self {
        Self {
            risk_level: RiskLevel::None,
            risk_type: None,
            indicators: Vec::new(),
            confidence_score: 0.0,
            requires_emergency_response: false,
            emergency_response: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_total_order() {
        assert!(RiskLevel::None < RiskLevel::Low);
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }

    #[test]
    fn test_risk_type_serde_snake_case() {
        let json = serde_json::to_string(&RiskType::SuicidalIdeation).unwrap();
        assert_eq!(json, "\"suicidal_ideation\"");
    }

    #[test]
    fn test_none_assessment_invariants() {
        let a = RiskAssessment::none();
        assert_eq!(a.risk_level, RiskLevel::None);
        assert!(a.risk_type.is_none());
        assert_eq!(a.confidence_score, 0.0);
        assert!(!a.requires_emergency_response);
    }
}
