pub mod classifier;
pub mod engine;
pub mod escalation;
pub mod lexicon;
pub mod replies;
pub mod tracker;
pub mod types;

pub use classifier::TextClassifier;
pub use engine::TriageEngine;
pub use escalation::EscalationCoordinator;
pub use lexicon::TriageLexicon;
pub use tracker::ConversationRiskTracker;
pub use types::{Classification, EscalationEvent, SubmitOutcome};
