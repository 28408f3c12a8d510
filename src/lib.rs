//! Risk-aware conversational triage and escalation core for the Solace
//! mental-health support platform.
//!
//! A pure in-process library: the host shell submits chat messages and
//! clinician risk assessments through [`TriageEngine`] and renders what
//! comes back. Classification is deterministic and lexicon-based (no model,
//! no I/O), escalation is exactly-once per conversation episode, and every
//! severity aggregation takes the maximum so a single critical signal is
//! never diluted.

pub mod error;
pub mod models;
pub mod risk;
pub mod triage;

pub use error::TriageError;
pub use models::enums::{
    MessageCategory, ProfessionalType, RiskCategory, RiskFactorRating, Severity,
};
pub use models::{Alert, AlertKind, ConversationRiskState, Message, PatientRiskProfile, TrackerPhase};
pub use risk::aggregate;
pub use triage::{
    Classification, EscalationEvent, SubmitOutcome, TextClassifier, TriageEngine, TriageLexicon,
};
