use crate::models::enums::MessageCategory;

/// Follow-up prompt builder for the automated assistant.
/// Calm, preparatory framing throughout; suggestions are non-authoritative
/// and capped at three per category. An empty list is a valid outcome.
pub struct ReplyTemplates;

impl ReplyTemplates {
    /// Suggestions keyed by the winning classification category.
    pub fn for_category(category: MessageCategory) -> Vec<String> {
        match category {
            MessageCategory::Urgent => vec![
                "Let's take a slow breath together. Breathe in for four counts, \
                 hold for four, and out for four."
                    .to_string(),
                "You don't have to go through this alone. Would you like me to \
                 connect you with someone right now?"
                    .to_string(),
                "If you are in immediate danger, please contact your local \
                 emergency number."
                    .to_string(),
            ],
            MessageCategory::Negative => vec![
                "That sounds really hard. I'm here with you — can you tell me \
                 a bit more about what's weighing on you?"
                    .to_string(),
                "Sometimes naming one small thing that might help can be a \
                 start. Is there anything that has helped before?"
                    .to_string(),
            ],
            MessageCategory::Positive => vec![
                "That's really good to hear. What do you think made the \
                 difference today?"
                    .to_string(),
            ],
            MessageCategory::Neutral => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestions_capped_at_three() {
        for category in [
            MessageCategory::Positive,
            MessageCategory::Neutral,
            MessageCategory::Negative,
            MessageCategory::Urgent,
        ] {
            assert!(ReplyTemplates::for_category(category).len() <= 3);
        }
    }

    #[test]
    fn urgent_offers_grounding_and_handoff() {
        let suggestions = ReplyTemplates::for_category(MessageCategory::Urgent);
        assert!(suggestions.iter().any(|s| s.contains("breath")));
        assert!(suggestions.iter().any(|s| s.contains("connect you")));
    }

    #[test]
    fn neutral_may_have_no_suggestions() {
        assert!(ReplyTemplates::for_category(MessageCategory::Neutral).is_empty());
    }
}
