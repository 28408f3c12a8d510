use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::error::TriageError;
use crate::models::enums::{ProfessionalType, Severity};

use super::types::EscalationEvent;

/// Emits hand-off events and guarantees at most one active event per
/// conversation. A second trigger while one is pending returns the existing
/// event unchanged — suppressed, never duplicated, and not an error.
pub struct EscalationCoordinator {
    active: RwLock<HashMap<String, EscalationEvent>>,
}

impl EscalationCoordinator {
    pub fn new() -> Self {
        Self {
            active: RwLock::new(HashMap::new()),
        }
    }

    /// Which professional a given urgency hands off to. Urgencies below
    /// `High` never reach the coordinator; they stay within automated
    /// assistance.
    pub fn target_for(urgency: Severity) -> ProfessionalType {
        match urgency {
            Severity::Critical => ProfessionalType::OnCallCrisis,
            _ => ProfessionalType::AssignedClinician,
        }
    }

    /// Emit the escalation event for a conversation entering
    /// `PendingEscalation`, or return the already-active event.
    pub fn escalate(
        &self,
        conversation_id: &str,
        triggered_by_message_id: Uuid,
        urgency: Severity,
    ) -> Result<EscalationEvent, TriageError> {
        let mut active = self.active.write().map_err(|_| TriageError::LockFailed)?;

        if let Some(existing) = active.get(conversation_id) {
            tracing::debug!(
                conversation_id,
                urgency = urgency.as_str(),
                "Escalation already active for conversation, suppressing duplicate"
            );
            return Ok(existing.clone());
        }

        let event = EscalationEvent {
            conversation_id: conversation_id.to_string(),
            triggered_by_message_id,
            urgency,
            target: Self::target_for(urgency),
            created_at: chrono::Local::now().naive_local(),
        };

        tracing::info!(
            conversation_id,
            urgency = urgency.as_str(),
            target = event.target.as_str(),
            "Escalating conversation to human professional"
        );

        active.insert(conversation_id.to_string(), event.clone());
        Ok(event)
    }

    /// The active event for one conversation, if any.
    pub fn active_event(
        &self,
        conversation_id: &str,
    ) -> Result<Option<EscalationEvent>, TriageError> {
        let active = self.active.read().map_err(|_| TriageError::LockFailed)?;
        Ok(active.get(conversation_id).cloned())
    }

    /// Snapshot of every active event, for the alert generator.
    pub fn active_events(&self) -> Result<Vec<EscalationEvent>, TriageError> {
        let active = self.active.read().map_err(|_| TriageError::LockFailed)?;
        Ok(active.values().cloned().collect())
    }

    /// Clear the active event once a professional has taken over.
    pub fn resolve(&self, conversation_id: &str) -> Result<EscalationEvent, TriageError> {
        let mut active = self.active.write().map_err(|_| TriageError::LockFailed)?;
        active
            .remove(conversation_id)
            .ok_or_else(|| TriageError::NotEscalated(conversation_id.to_string()))
    }
}

impl Default for EscalationCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
