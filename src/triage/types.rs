use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::enums::{MessageCategory, ProfessionalType, Severity};

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// The outcome of classifying one message. Produced once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub message_id: Uuid,
    pub category: MessageCategory,
    /// In `[0.0, 1.0]`. Fixed at 1.0 whenever an urgent trigger matched —
    /// certainty about risk language is never hedged.
    pub confidence: f32,
    /// Every lexicon phrase that matched, in normalized form. The set makes
    /// every classification explainable after the fact.
    pub matched_triggers: BTreeSet<String>,
    /// At most three non-authoritative follow-up prompts for the assistant.
    pub suggestions: Vec<String>,
}

// ---------------------------------------------------------------------------
// EscalationEvent
// ---------------------------------------------------------------------------

/// A hand-off from automated assistance to a human professional.
/// At most one is active per conversation; a second trigger while one is
/// pending is suppressed, not duplicated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscalationEvent {
    pub conversation_id: String,
    pub triggered_by_message_id: Uuid,
    pub urgency: Severity,
    pub target: ProfessionalType,
    pub created_at: NaiveDateTime,
}

// ---------------------------------------------------------------------------
// SubmitOutcome
// ---------------------------------------------------------------------------

/// What `submit_message` hands back to the chat shell: the classification
/// styles the bubble, the escalation (when present) opens the hand-off
/// dialog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitOutcome {
    pub message_id: Uuid,
    pub classification: Classification,
    pub escalation: Option<EscalationEvent>,
}
