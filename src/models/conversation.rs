use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::MessageCategory;

/// One chat message, immutable once created. `author_id` is either the
/// patient or the automated assistant; the core does not distinguish beyond
/// attribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub conversation_id: String,
    pub author_id: String,
    pub text: String,
    pub sent_at: NaiveDateTime,
}

/// Lifecycle phase of a conversation's risk tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerPhase {
    /// Classifications accumulate; escalation thresholds are checked.
    Monitoring,
    /// A threshold fired; an escalation is being requested right now.
    PendingEscalation,
    /// A human hand-off is active; no further escalations are requested.
    Escalated,
    /// Hand-off completed; the next message starts a fresh episode.
    Resolved,
}

impl TrackerPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monitoring => "monitoring",
            Self::PendingEscalation => "pending_escalation",
            Self::Escalated => "escalated",
            Self::Resolved => "resolved",
        }
    }
}

/// Read-only snapshot of one conversation's rolling risk state.
/// Dashboards get this copy, never a live reference into the tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationRiskState {
    pub conversation_id: String,
    /// Last classifications, oldest first, at most the window capacity.
    pub recent_categories: Vec<MessageCategory>,
    pub phase: TrackerPhase,
    pub escalated: bool,
    pub last_escalation_at: Option<NaiveDateTime>,
}
