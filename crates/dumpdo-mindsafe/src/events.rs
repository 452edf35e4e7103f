//! Risk-event projection for logging.
//!
//! Assessments at medium or above are projected into a record with session
//! context (time-of-day bucket, day of week, duration, message count) so
//! crisis patterns can be reviewed without storing raw message text.

use crate::types::{RiskAssessment, RiskLevel, RiskType};
use chrono::{DateTime, Datelike, Local, Timelike};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskEventRecord {
    pub risk_level: RiskLevel,
    pub risk_type: Option<RiskType>,
    pub detected_indicators: Vec<String>,
    pub confidence_score: f64,
    pub detection_method: String,
    pub emergency_response_sent: bool,
    /// "cvv_referral" for suicidal ideation, "grounding_exercise" otherwise.
    pub response_type: Option<String>,
    pub session_duration_minutes: Option<i64>,
    pub message_count_at_event: Option<usize>,
    /// morning / afternoon / evening / night
    pub time_of_day: String,
    /// 0 = Sunday … 6 = Saturday
    pub day_of_week: u32,
}

fn time_of_day_bucket(hour: u32) -> &'static str {
    match hour {
        5..=11 => "morning",
        12..=17 => "afternoon",
        18..=21 => "evening",
        _ => "night",
    }
}

impl RiskEventRecord {
    /// Build a record for an assessment, or `None` below the medium threshold.
    pub fn from_assessment(
        assessment: &RiskAssessment,
        session_duration_minutes: Option<i64>,
        message_count: Option<usize>,
    ) -> Option<Self> {
        Self::at(assessment, session_duration_minutes, message_count, Local::now())
    }

    fn at(
        assessment: &RiskAssessment,
        session_duration_minutes: Option<i64>,
        message_count: Option<usize>,
        now: DateTime<Local>,
    ) -> Option<Self> {
        if assessment.risk_level < RiskLevel::Medium {
            return None;
        }

        let response_type = assessment.requires_emergency_response.then(|| {
            match assessment.risk_type {
                Some(RiskType::SuicidalIdeation) => "cvv_referral".to_string(),
                _ => "grounding_exercise".to_string(),
            }
        });

        Some(Self {
            risk_level: assessment.risk_level,
            risk_type: assessment.risk_type,
            detected_indicators: assessment.indicators.clone(),
            confidence_score: assessment.confidence_score,
            detection_method: "regex".to_string(),
            emergency_response_sent: assessment.requires_emergency_response,
            response_type,
            session_duration_minutes,
            message_count_at_event: message_count,
            time_of_day: time_of_day_bucket(now.hour()).to_string(),
            day_of_week: now.weekday().num_days_from_sunday(),
        })
    }

    /// Emit the record as a structured tracing event.
    pub fn log(&self) {
        tracing::warn!(
            risk_level = self.risk_level.as_str(),
            risk_type = self.risk_type.map(|t| t.as_str()).unwrap_or("none"),
            confidence = self.confidence_score,
            emergency = self.emergency_response_sent,
            time_of_day = %self.time_of_day,
            "risk event"
        );
    }
}
