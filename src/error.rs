use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced at the triage core's boundary.
///
/// Classification itself never fails (it degrades to `Neutral`), and a
/// duplicate escalation is a suppressed no-op rather than an error, so this
/// taxonomy covers only malformed caller input, unknown entities, and
/// deployment lexicon problems.
#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown conversation: {0}")]
    UnknownConversation(String),

    #[error("Unknown patient: {0}")]
    UnknownPatient(String),

    #[error("No active escalation for conversation: {0}")]
    NotEscalated(String),

    #[error("Alert not found: {0}")]
    AlertNotFound(Uuid),

    #[error("Invalid value '{value}' for {field}")]
    InvalidEnum { field: String, value: String },

    #[error("Lexicon load failed ({0}): {1}")]
    LexiconLoad(String, String),

    #[error("Lexicon parse failed ({0}): {1}")]
    LexiconParse(String, String),

    #[error("Invalid lexicon: {0}")]
    LexiconInvalid(String),

    #[error("Internal lock failed")]
    LockFailed,
}

/// Reject empty or whitespace-only caller-supplied ids before any mutation.
pub(crate) fn require_id(field: &str, value: &str) -> Result<(), TriageError> {
    if value.trim().is_empty() {
        return Err(TriageError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(())
}
