use std::sync::RwLock;

use uuid::Uuid;

use crate::error::TriageError;
use crate::models::alert::{Alert, AlertKind};
use crate::models::enums::Severity;
use crate::models::profile::PatientRiskProfile;
use crate::risk::aggregator;
use crate::triage::types::EscalationEvent;

/// Alert copy builder. Calm, preparatory framing for the dashboard — these
/// strings sit next to a patient's name, so no alarm wording.
pub struct AlertMessages;

impl AlertMessages {
    pub fn risk(level: Severity) -> String {
        format!(
            "This patient's overall risk level is now {}. \
             Please review their latest assessment.",
            level.as_str(),
        )
    }

    pub fn escalation(event: &EscalationEvent) -> String {
        format!(
            "A support conversation was handed off to the {} at {} urgency. \
             Please follow up.",
            match event.target {
                crate::models::enums::ProfessionalType::OnCallCrisis =>
                    "on-call crisis professional",
                crate::models::enums::ProfessionalType::AssignedClinician =>
                    "assigned clinician",
            },
            event.urgency.as_str(),
        )
    }
}

/// In-memory alert list for the management dashboard.
///
/// Alerts are only ever deactivated by explicit clinician acknowledgment;
/// a later drop in the underlying risk level never removes one. Readers get
/// sorted snapshots, highest severity first, oldest first within a tier.
pub struct AlertGenerator {
    alerts: RwLock<Vec<Alert>>,
}

impl AlertGenerator {
    pub fn new() -> Self {
        Self {
            alerts: RwLock::new(Vec::new()),
        }
    }

    /// Recompute the alert list from every patient profile and every active
    /// escalation, then return the full ordered sequence of active alerts.
    /// Callers typically truncate for display.
    pub fn refresh(
        &self,
        profiles: &[PatientRiskProfile],
        escalations: &[(String, EscalationEvent)],
    ) -> Result<Vec<Alert>, TriageError> {
        for profile in profiles {
            let level = aggregator::aggregate(profile);
            self.ensure_risk_alert(&profile.patient_id, level)?;
        }
        for (patient_id, event) in escalations {
            self.ensure_escalation_alert(patient_id, event)?;
        }
        self.active_sorted(None)
    }

    /// Ensure an active risk alert at exactly this severity exists for the
    /// patient. Levels below `High` never create alerts; a level change
    /// creates a new alert and leaves the old one for acknowledgment.
    pub fn ensure_risk_alert(
        &self,
        patient_id: &str,
        level: Severity,
    ) -> Result<(), TriageError> {
        if level < Severity::High {
            return Ok(());
        }

        let mut alerts = self.alerts.write().map_err(|_| TriageError::LockFailed)?;

        let already_active = alerts.iter().any(|a| {
            a.active
                && a.patient_id == patient_id
                && a.kind == AlertKind::Risk
                && a.severity == level
        });
        if already_active {
            tracing::debug!(
                patient_id,
                level = level.as_str(),
                "Risk alert already active, skipping"
            );
            return Ok(());
        }

        tracing::info!(patient_id, level = level.as_str(), "Creating risk alert");
        alerts.push(Alert {
            id: Uuid::new_v4(),
            patient_id: patient_id.to_string(),
            kind: AlertKind::Risk,
            severity: level,
            message: AlertMessages::risk(level),
            active: true,
            created_at: chrono::Local::now().naive_local(),
        });
        Ok(())
    }

    /// Ensure an active alert mirrors this escalation event.
    pub fn ensure_escalation_alert(
        &self,
        patient_id: &str,
        event: &EscalationEvent,
    ) -> Result<(), TriageError> {
        let mut alerts = self.alerts.write().map_err(|_| TriageError::LockFailed)?;

        let already_active = alerts.iter().any(|a| {
            a.active
                && a.severity == event.urgency
                && matches!(
                    &a.kind,
                    AlertKind::Escalation { conversation_id }
                        if *conversation_id == event.conversation_id
                )
        });
        if already_active {
            return Ok(());
        }

        tracing::info!(
            patient_id,
            conversation_id = %event.conversation_id,
            urgency = event.urgency.as_str(),
            "Creating escalation alert"
        );
        alerts.push(Alert {
            id: Uuid::new_v4(),
            patient_id: patient_id.to_string(),
            kind: AlertKind::Escalation {
                conversation_id: event.conversation_id.clone(),
            },
            severity: event.urgency,
            message: AlertMessages::escalation(event),
            active: true,
            created_at: event.created_at,
        });
        Ok(())
    }

    /// Active alerts, descending severity, ties broken by earliest creation
    /// so the oldest unresolved alert surfaces first within a tier.
    pub fn active_sorted(&self, limit: Option<usize>) -> Result<Vec<Alert>, TriageError> {
        let alerts = self.alerts.read().map_err(|_| TriageError::LockFailed)?;

        let mut active: Vec<Alert> = alerts.iter().filter(|a| a.active).cloned().collect();
        active.sort_by(|a, b| {
            b.severity
                .cmp(&a.severity)
                .then(a.created_at.cmp(&b.created_at))
        });

        if let Some(limit) = limit {
            active.truncate(limit);
        }
        Ok(active)
    }

    /// Clinician acknowledgment: deactivates this alert and nothing else.
    /// Never cascades into the patient's risk level, which is always
    /// recomputed from ratings.
    pub fn acknowledge(&self, alert_id: &Uuid) -> Result<(), TriageError> {
        let mut alerts = self.alerts.write().map_err(|_| TriageError::LockFailed)?;

        let alert = alerts
            .iter_mut()
            .find(|a| a.id == *alert_id)
            .ok_or(TriageError::AlertNotFound(*alert_id))?;

        alert.active = false;
        tracing::info!(alert_id = %alert_id, "Alert acknowledged");
        Ok(())
    }
}

impl Default for AlertGenerator {
    fn default() -> Self {
        Self::new()
    }
}
