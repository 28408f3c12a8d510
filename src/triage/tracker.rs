use std::collections::VecDeque;

use chrono::NaiveDateTime;

use crate::models::conversation::{ConversationRiskState, TrackerPhase};
use crate::models::enums::{MessageCategory, Severity};

/// How many recent classifications the rolling window keeps.
const WINDOW_CAPACITY: usize = 5;
/// Negative-or-worse classifications within the window that trigger a
/// sustained-distress escalation.
const SUSTAINED_NEGATIVE_THRESHOLD: usize = 3;

/// Per-conversation escalation state machine:
/// `Monitoring → PendingEscalation → Escalated → Resolved → Monitoring`.
///
/// Exactly one escalation is requested per episode: `observe` returns an
/// urgency only on the transition into `PendingEscalation`, and nothing is
/// requested again until the conversation is resolved externally.
pub struct ConversationRiskTracker {
    conversation_id: String,
    recent: VecDeque<MessageCategory>,
    phase: TrackerPhase,
    last_escalation_at: Option<NaiveDateTime>,
}

impl ConversationRiskTracker {
    pub fn new(conversation_id: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            recent: VecDeque::with_capacity(WINDOW_CAPACITY),
            phase: TrackerPhase::Monitoring,
            last_escalation_at: None,
        }
    }

    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    /// Record the next classification in send order.
    ///
    /// Returns the urgency to escalate at when this observation moves the
    /// tracker into `PendingEscalation`: `Critical` for an urgent message,
    /// `High` for sustained negative signal. Clinical-risk utterances
    /// escalate without any confirmation step.
    pub fn observe(&mut self, category: MessageCategory) -> Option<Severity> {
        if self.phase == TrackerPhase::Resolved {
            // Fresh episode: stale history before a resolved crisis must
            // not re-trigger.
            self.recent.clear();
            self.phase = TrackerPhase::Monitoring;
        }

        if self.recent.len() == WINDOW_CAPACITY {
            self.recent.pop_front();
        }
        self.recent.push_back(category);

        if self.phase != TrackerPhase::Monitoring {
            return None;
        }

        if category == MessageCategory::Urgent {
            self.phase = TrackerPhase::PendingEscalation;
            return Some(Severity::Critical);
        }

        let negative_or_worse = self
            .recent
            .iter()
            .filter(|c| c.is_negative_or_worse())
            .count();
        if negative_or_worse >= SUSTAINED_NEGATIVE_THRESHOLD {
            self.phase = TrackerPhase::PendingEscalation;
            return Some(Severity::High);
        }

        None
    }

    /// Complete the `PendingEscalation → Escalated` step once the event has
    /// been emitted. State change and emission form one atomic unit in the
    /// engine, so no observer ever sees a pending tracker without an event.
    pub fn mark_escalated(&mut self, at: NaiveDateTime) {
        self.phase = TrackerPhase::Escalated;
        self.last_escalation_at = Some(at);
    }

    /// External "hand-off completed" signal from the human workflow layer.
    pub fn resolve(&mut self) {
        self.phase = TrackerPhase::Resolved;
        self.recent.clear();
    }

    /// Immutable copy for dashboards; never a live reference.
    pub fn snapshot(&self) -> ConversationRiskState {
        ConversationRiskState {
            conversation_id: self.conversation_id.clone(),
            recent_categories: self.recent.iter().copied().collect(),
            phase: self.phase,
            escalated: self.phase == TrackerPhase::Escalated,
            last_escalation_at: self.last_escalation_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }

    #[test]
    fn urgent_message_requests_critical_escalation() {
        let mut tracker = ConversationRiskTracker::new("conv-1");
        assert_eq!(tracker.observe(MessageCategory::Neutral), None);
        assert_eq!(
            tracker.observe(MessageCategory::Urgent),
            Some(Severity::Critical)
        );
        assert_eq!(tracker.phase(), TrackerPhase::PendingEscalation);
    }

    #[test]
    fn sustained_negative_requests_high_escalation() {
        let mut tracker = ConversationRiskTracker::new("conv-1");
        // negative, negative, neutral, negative → 3 of last 5 negative.
        assert_eq!(tracker.observe(MessageCategory::Negative), None);
        assert_eq!(tracker.observe(MessageCategory::Negative), None);
        assert_eq!(tracker.observe(MessageCategory::Neutral), None);
        assert_eq!(
            tracker.observe(MessageCategory::Negative),
            Some(Severity::High)
        );
    }

    #[test]
    fn two_negatives_do_not_escalate() {
        let mut tracker = ConversationRiskTracker::new("conv-1");
        assert_eq!(tracker.observe(MessageCategory::Negative), None);
        assert_eq!(tracker.observe(MessageCategory::Negative), None);
        assert_eq!(tracker.phase(), TrackerPhase::Monitoring);
    }

    #[test]
    fn window_evicts_oldest() {
        let mut tracker = ConversationRiskTracker::new("conv-1");
        // Two negatives scroll out of the window before the count reaches 3.
        tracker.observe(MessageCategory::Negative);
        tracker.observe(MessageCategory::Negative);
        for _ in 0..5 {
            tracker.observe(MessageCategory::Positive);
        }
        assert_eq!(tracker.observe(MessageCategory::Negative), None);
        assert_eq!(tracker.snapshot().recent_categories.len(), 5);
    }

    #[test]
    fn no_second_request_while_escalated() {
        let mut tracker = ConversationRiskTracker::new("conv-1");
        assert!(tracker.observe(MessageCategory::Urgent).is_some());
        tracker.mark_escalated(now());

        // Further messages are still appended but never re-request.
        assert_eq!(tracker.observe(MessageCategory::Urgent), None);
        assert_eq!(tracker.observe(MessageCategory::Negative), None);
        assert_eq!(tracker.phase(), TrackerPhase::Escalated);
    }

    #[test]
    fn resolve_clears_history_and_starts_fresh_episode() {
        let mut tracker = ConversationRiskTracker::new("conv-1");
        tracker.observe(MessageCategory::Negative);
        tracker.observe(MessageCategory::Negative);
        assert!(tracker.observe(MessageCategory::Negative).is_some());
        tracker.mark_escalated(now());
        tracker.resolve();
        assert_eq!(tracker.phase(), TrackerPhase::Resolved);

        // Two negatives after resolution sit below the threshold because the
        // pre-crisis history is gone.
        assert_eq!(tracker.observe(MessageCategory::Negative), None);
        assert_eq!(tracker.phase(), TrackerPhase::Monitoring);
        assert_eq!(tracker.observe(MessageCategory::Negative), None);

        // A third one starts a new episode.
        assert_eq!(
            tracker.observe(MessageCategory::Negative),
            Some(Severity::High)
        );
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut tracker = ConversationRiskTracker::new("conv-1");
        tracker.observe(MessageCategory::Positive);
        assert!(tracker.observe(MessageCategory::Urgent).is_some());
        let at = now();
        tracker.mark_escalated(at);

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.conversation_id, "conv-1");
        assert_eq!(
            snapshot.recent_categories,
            vec![MessageCategory::Positive, MessageCategory::Urgent]
        );
        assert!(snapshot.escalated);
        assert_eq!(snapshot.last_escalation_at, Some(at));
    }
}
