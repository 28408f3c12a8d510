use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::enums::{RiskCategory, RiskFactorRating};

/// A patient's clinician-assessed risk factor ratings, one per category.
/// Owned by the patient record and replaced whenever an assessment is
/// updated; the overall risk level is always recomputed from it, never
/// stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRiskProfile {
    pub patient_id: String,
    pub ratings: HashMap<RiskCategory, RiskFactorRating>,
}

impl PatientRiskProfile {
    pub fn new(patient_id: impl Into<String>) -> Self {
        Self {
            patient_id: patient_id.into(),
            ratings: HashMap::new(),
        }
    }

    /// A category with no recorded assessment reads as `Unknown` — the safe
    /// local default for missing data.
    pub fn rating(&self, category: RiskCategory) -> RiskFactorRating {
        self.ratings
            .get(&category)
            .copied()
            .unwrap_or(RiskFactorRating::Unknown)
    }
}
