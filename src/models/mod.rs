pub mod alert;
pub mod conversation;
pub mod enums;
pub mod profile;

pub use alert::{Alert, AlertKind};
pub use conversation::{ConversationRiskState, Message, TrackerPhase};
pub use profile::PatientRiskProfile;
