use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::Severity;

/// What produced an alert. Risk alerts derive from a patient's aggregated
/// risk level; escalation alerts mirror an active conversation hand-off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlertKind {
    Risk,
    Escalation { conversation_id: String },
}

/// A dashboard-visible notification. Deactivated only by explicit clinician
/// acknowledgment — a drop in the underlying risk level never silently
/// removes a crisis alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub patient_id: String,
    pub kind: AlertKind,
    pub severity: Severity,
    /// Patient/clinician-facing copy, calm preparatory framing.
    pub message: String,
    pub active: bool,
    pub created_at: NaiveDateTime,
}
