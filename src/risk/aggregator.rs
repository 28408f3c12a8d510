use crate::models::enums::{RiskCategory, Severity};
use crate::models::profile::PatientRiskProfile;

/// Overall risk level for a patient: the maximum of the four category
/// ratings, never an average — a single critical rating must raise the
/// level no matter what the others say.
///
/// Pure function; callers re-run it whenever any single rating changes so
/// the level is never stale. A profile with nothing rated (max ordinal 0)
/// comes out `Low`: missing data is not treated as absent risk, but it must
/// not over-alert either.
pub fn aggregate(profile: &PatientRiskProfile) -> Severity {
    let max_ordinal = RiskCategory::ALL
        .iter()
        .map(|category| profile.rating(*category).ordinal())
        .max()
        .unwrap_or(0);
    Severity::from_ordinal(max_ordinal)
}
