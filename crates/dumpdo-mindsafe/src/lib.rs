//! dumpdo-mindsafe — MIND-SAFE crisis detection for Dump.do.
//!
//! Intercepts messages BEFORE the LLM to detect risk indicators with
//! lightweight regex classification over Brazilian-Portuguese text.
//!
//! Risk levels:
//!   none     — no risk indicators
//!   low      — mild stress/fatigue mentions
//!   medium   — significant distress signals
//!   high     — crisis indicators requiring attention
//!   critical — imminent risk, activates emergency mode
//!
//! High and critical assessments bypass the generative model entirely and
//! return a pre-authored safety script (see [`emergency`]).

pub mod assess;
pub mod emergency;
pub mod events;
pub mod exclusion;
pub mod normalize;
pub mod patterns;
pub mod types;

pub use assess::assess_risk;
pub use emergency::emergency_response;
pub use events::RiskEventRecord;
pub use types::{RiskAssessment, RiskLevel, RiskType};
