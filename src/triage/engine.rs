use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::error::{require_id, TriageError};
use crate::models::alert::Alert;
use crate::models::conversation::{ConversationRiskState, Message};
use crate::models::enums::{RiskCategory, RiskFactorRating, Severity};
use crate::models::profile::PatientRiskProfile;
use crate::risk::aggregator;
use crate::risk::alerts::AlertGenerator;

use super::classifier::TextClassifier;
use super::escalation::EscalationCoordinator;
use super::lexicon::TriageLexicon;
use super::tracker::ConversationRiskTracker;
use super::types::{EscalationEvent, SubmitOutcome};

/// Everything the engine keeps for one conversation. Exclusively owned by
/// that conversation; mutated only under the engine's conversation lock.
struct ConversationEntry {
    tracker: ConversationRiskTracker,
    messages: Vec<Message>,
    /// The conversation's patient: the author of its first submitted
    /// message (the assistant never opens a conversation).
    patient_id: String,
}

/// The triage core's boundary facade.
///
/// One engine per host process: it owns the classifier, per-conversation
/// trackers, the escalation coordinator, patient risk profiles, and the
/// dashboard alert list. Each method is a single atomic unit of work;
/// different conversations and patients are independent.
pub struct TriageEngine {
    classifier: TextClassifier,
    conversations: RwLock<HashMap<String, ConversationEntry>>,
    coordinator: EscalationCoordinator,
    profiles: RwLock<HashMap<String, PatientRiskProfile>>,
    alerts: AlertGenerator,
}

impl TriageEngine {
    /// Engine with the built-in reference lexicon.
    pub fn new() -> Self {
        Self::with_lexicon(TriageLexicon::default())
    }

    /// Engine with a deployment-tuned lexicon.
    pub fn with_lexicon(lexicon: TriageLexicon) -> Self {
        Self {
            classifier: TextClassifier::new(lexicon),
            conversations: RwLock::new(HashMap::new()),
            coordinator: EscalationCoordinator::new(),
            profiles: RwLock::new(HashMap::new()),
            alerts: AlertGenerator::new(),
        }
    }

    /// Classify an incoming chat message, update the conversation's risk
    /// state, and escalate if a threshold fired.
    ///
    /// Unknown conversations are created lazily. The returned escalation is
    /// `None` both when nothing fired and while a hand-off is already
    /// active — exactly one event is emitted per episode.
    pub fn submit_message(
        &self,
        conversation_id: &str,
        author_id: &str,
        text: &str,
    ) -> Result<SubmitOutcome, TriageError> {
        require_id("conversation_id", conversation_id)?;
        require_id("author_id", author_id)?;

        let message_id = Uuid::new_v4();
        let classification = self.classifier.classify(message_id, text);

        let mut conversations = self
            .conversations
            .write()
            .map_err(|_| TriageError::LockFailed)?;
        let entry = conversations
            .entry(conversation_id.to_string())
            .or_insert_with(|| {
                tracing::debug!(conversation_id, "Starting triage for new conversation");
                ConversationEntry {
                    tracker: ConversationRiskTracker::new(conversation_id),
                    messages: Vec::new(),
                    patient_id: author_id.to_string(),
                }
            });

        entry.messages.push(Message {
            id: message_id,
            conversation_id: conversation_id.to_string(),
            author_id: author_id.to_string(),
            text: text.to_string(),
            sent_at: chrono::Local::now().naive_local(),
        });

        // Tracker transition, event emission, and alert creation happen
        // under the conversation lock as one step: no observer can see a
        // pending tracker without its matching event.
        let escalation = match entry.tracker.observe(classification.category) {
            Some(urgency) => {
                let event = self
                    .coordinator
                    .escalate(conversation_id, message_id, urgency)?;
                entry.tracker.mark_escalated(event.created_at);
                self.alerts
                    .ensure_escalation_alert(&entry.patient_id, &event)?;
                Some(event)
            }
            None => None,
        };

        Ok(SubmitOutcome {
            message_id,
            classification,
            escalation,
        })
    }

    /// Replace a patient's risk factor ratings and recompute the overall
    /// level. Creates the patient record on first call; the returned level
    /// drives the dashboard's risk badge.
    pub fn update_patient_risk_profile(
        &self,
        patient_id: &str,
        ratings: HashMap<RiskCategory, RiskFactorRating>,
    ) -> Result<Severity, TriageError> {
        require_id("patient_id", patient_id)?;

        let profile = PatientRiskProfile {
            patient_id: patient_id.to_string(),
            ratings,
        };
        let level = aggregator::aggregate(&profile);

        let mut profiles = self.profiles.write().map_err(|_| TriageError::LockFailed)?;
        profiles.insert(patient_id.to_string(), profile);
        drop(profiles);

        self.alerts.ensure_risk_alert(patient_id, level)?;

        tracing::info!(
            patient_id,
            level = level.as_str(),
            "Patient risk level recomputed"
        );
        Ok(level)
    }

    /// Current overall risk level for a patient, recomputed from ratings.
    pub fn patient_risk_level(&self, patient_id: &str) -> Result<Severity, TriageError> {
        let profiles = self.profiles.read().map_err(|_| TriageError::LockFailed)?;
        let profile = profiles
            .get(patient_id)
            .ok_or_else(|| TriageError::UnknownPatient(patient_id.to_string()))?;
        Ok(aggregator::aggregate(profile))
    }

    /// Active alerts for the management dashboard, descending severity,
    /// oldest first within a tier. Read-only.
    pub fn list_active_alerts(&self, limit: Option<usize>) -> Result<Vec<Alert>, TriageError> {
        self.alerts.active_sorted(limit)
    }

    /// Full dashboard recompute: re-derive alerts from every patient
    /// profile and every active escalation, then return the ordered active
    /// list. The per-call paths keep alerts current incrementally; this is
    /// the batch form for hosts that rebuild the dashboard wholesale.
    pub fn refresh_alerts(&self) -> Result<Vec<Alert>, TriageError> {
        let profiles: Vec<PatientRiskProfile> = {
            let profiles = self.profiles.read().map_err(|_| TriageError::LockFailed)?;
            profiles.values().cloned().collect()
        };

        let escalations: Vec<(String, EscalationEvent)> = {
            let conversations = self
                .conversations
                .read()
                .map_err(|_| TriageError::LockFailed)?;
            self.coordinator
                .active_events()?
                .into_iter()
                .filter_map(|event| {
                    conversations
                        .get(&event.conversation_id)
                        .map(|entry| (entry.patient_id.clone(), event))
                })
                .collect()
        };

        self.alerts.refresh(&profiles, &escalations)
    }

    /// Hand-off completed: a professional has taken over the conversation.
    /// The next message starts a fresh episode with cleared history.
    pub fn resolve_escalation(&self, conversation_id: &str) -> Result<(), TriageError> {
        require_id("conversation_id", conversation_id)?;

        let mut conversations = self
            .conversations
            .write()
            .map_err(|_| TriageError::LockFailed)?;
        let entry = conversations
            .get_mut(conversation_id)
            .ok_or_else(|| TriageError::UnknownConversation(conversation_id.to_string()))?;

        self.coordinator.resolve(conversation_id)?;
        entry.tracker.resolve();

        tracing::info!(conversation_id, "Escalation resolved, episode closed");
        Ok(())
    }

    /// Clinician acknowledgment of a dashboard alert. Deactivates that
    /// alert only; the patient's risk level is unaffected.
    pub fn acknowledge_alert(&self, alert_id: &Uuid) -> Result<(), TriageError> {
        self.alerts.acknowledge(alert_id)
    }

    /// Snapshot of one conversation's risk state, if it exists.
    pub fn conversation_state(
        &self,
        conversation_id: &str,
    ) -> Result<Option<ConversationRiskState>, TriageError> {
        let conversations = self
            .conversations
            .read()
            .map_err(|_| TriageError::LockFailed)?;
        Ok(conversations
            .get(conversation_id)
            .map(|entry| entry.tracker.snapshot()))
    }

    /// Snapshot of a conversation's messages in send order, if it exists.
    pub fn message_history(
        &self,
        conversation_id: &str,
    ) -> Result<Option<Vec<Message>>, TriageError> {
        let conversations = self
            .conversations
            .read()
            .map_err(|_| TriageError::LockFailed)?;
        Ok(conversations
            .get(conversation_id)
            .map(|entry| entry.messages.clone()))
    }
}

impl Default for TriageEngine {
    fn default() -> Self {
        Self::new()
    }
}
