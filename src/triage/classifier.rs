use std::collections::BTreeSet;

use uuid::Uuid;

use crate::models::enums::MessageCategory;

use super::lexicon::{normalize_tokens, TriageLexicon, MAX_PHRASE_TOKENS};
use super::replies::ReplyTemplates;
use super::types::Classification;

/// Confidence reported when a message carries no recognizable signal, or
/// when category counts tie and the classifier falls back to neutral.
const WEAK_CONFIDENCE: f32 = 0.3;

/// Deterministic, lexicon-based message classification.
///
/// No model, no I/O: a normalized token scan against four fixed phrase
/// lists, so every result is explainable from `matched_triggers` alone and
/// fast enough to run synchronously per message. The accuracy bar is "never
/// silently miss an unambiguous crisis utterance", not sentiment accuracy.
pub struct TextClassifier {
    lexicon: TriageLexicon,
}

impl TextClassifier {
    pub fn new(lexicon: TriageLexicon) -> Self {
        Self { lexicon }
    }

    /// Classify one message. Never fails: empty input is neutral with zero
    /// confidence, unrecognized text is neutral with weak confidence.
    pub fn classify(&self, message_id: Uuid, text: &str) -> Classification {
        let tokens = normalize_tokens(text);
        if tokens.is_empty() {
            return Classification {
                message_id,
                category: MessageCategory::Neutral,
                confidence: 0.0,
                matched_triggers: BTreeSet::new(),
                suggestions: ReplyTemplates::for_category(MessageCategory::Neutral),
            };
        }

        // Sliding windows of 1..=4 tokens against the lexicons. Every match
        // is recorded; counts are distinct phrases per category.
        let mut urgent = BTreeSet::new();
        let mut negative = BTreeSet::new();
        let mut positive = BTreeSet::new();
        let mut neutral = BTreeSet::new();

        for width in 1..=MAX_PHRASE_TOKENS.min(tokens.len()) {
            for window in tokens.windows(width) {
                let phrase = window.join(" ");
                match self.lexicon.lookup(&phrase) {
                    Some(MessageCategory::Urgent) => {
                        urgent.insert(phrase);
                    }
                    Some(MessageCategory::Negative) => {
                        negative.insert(phrase);
                    }
                    Some(MessageCategory::Positive) => {
                        positive.insert(phrase);
                    }
                    Some(MessageCategory::Neutral) => {
                        neutral.insert(phrase);
                    }
                    None => {}
                }
            }
        }

        let matched_triggers: BTreeSet<String> = urgent
            .iter()
            .chain(&negative)
            .chain(&positive)
            .chain(&neutral)
            .cloned()
            .collect();

        // Urgent takes precedence over everything else in the same message:
        // users in crisis often phrase things ambiguously, and an urgent
        // marker must never be overridden by a positive one. Certainty about
        // risk language is never hedged.
        if !urgent.is_empty() {
            return Classification {
                message_id,
                category: MessageCategory::Urgent,
                confidence: 1.0,
                matched_triggers,
                suggestions: ReplyTemplates::for_category(MessageCategory::Urgent),
            };
        }

        let (category, confidence) =
            resolve_category(negative.len(), positive.len(), neutral.len());

        Classification {
            message_id,
            category,
            confidence,
            matched_triggers,
            suggestions: ReplyTemplates::for_category(category),
        }
    }
}

/// Pick the non-urgent winner by match count. Ties resolve to neutral — the
/// conservative default, since escalation needs a positive signal.
fn resolve_category(negative: usize, positive: usize, neutral: usize) -> (MessageCategory, f32) {
    let best = negative.max(positive).max(neutral);
    if best == 0 {
        return (MessageCategory::Neutral, WEAK_CONFIDENCE);
    }

    let contenders = [negative, positive, neutral]
        .iter()
        .filter(|&&count| count == best)
        .count();
    if contenders > 1 {
        return (MessageCategory::Neutral, WEAK_CONFIDENCE);
    }

    let category = if negative == best {
        MessageCategory::Negative
    } else if positive == best {
        MessageCategory::Positive
    } else {
        MessageCategory::Neutral
    };

    (category, confidence_for(best))
}

/// Only reached with at least one match, so the result is always ≥ 0.65.
fn confidence_for(match_count: usize) -> f32 {
    (0.5 + 0.15 * match_count as f32).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::lexicon::TriageLexicon;

    fn classifier() -> TextClassifier {
        TextClassifier::new(TriageLexicon::default())
    }

    fn classify(text: &str) -> Classification {
        classifier().classify(Uuid::new_v4(), text)
    }

    #[test]
    fn crisis_utterance_is_urgent_with_full_confidence() {
        let result = classify("I don't think I can go on, I want to end it");
        assert_eq!(result.category, MessageCategory::Urgent);
        assert_eq!(result.confidence, 1.0);
        assert!(result.matched_triggers.contains("want to end it"));
    }

    #[test]
    fn urgent_overrides_positive_in_same_message() {
        // Ambiguous crisis phrasing: gratitude plus an urgent marker.
        let result = classify("Thanks for everything, but I want to end it");
        assert_eq!(result.category, MessageCategory::Urgent);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn gratitude_is_positive_with_solid_confidence() {
        let result = classify("Thanks, I feel a bit better today");
        assert_eq!(result.category, MessageCategory::Positive);
        assert!(result.confidence >= 0.65);
    }

    #[test]
    fn despair_is_negative() {
        let result = classify("I feel hopeless and so alone");
        assert_eq!(result.category, MessageCategory::Negative);
        assert!(result.matched_triggers.contains("hopeless"));
        assert!(result.matched_triggers.contains("alone"));
        // Two distinct matches: 0.5 + 0.15 * 2
        assert!((result.confidence - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn empty_text_is_neutral_zero_confidence() {
        for text in ["", "   ", "\n\t"] {
            let result = classify(text);
            assert_eq!(result.category, MessageCategory::Neutral);
            assert_eq!(result.confidence, 0.0);
            assert!(result.matched_triggers.is_empty());
        }
    }

    #[test]
    fn unrecognized_text_degrades_to_weak_neutral() {
        let result = classify("zxcvbn qwerty 12345");
        assert_eq!(result.category, MessageCategory::Neutral);
        assert_eq!(result.confidence, WEAK_CONFIDENCE);
        assert!(result.matched_triggers.is_empty());
    }

    #[test]
    fn tie_between_categories_resolves_to_neutral() {
        // One negative match, one positive match.
        let result = classify("I was crying but I am hopeful");
        assert_eq!(result.category, MessageCategory::Neutral);
        assert_eq!(result.confidence, WEAK_CONFIDENCE);
        assert_eq!(result.matched_triggers.len(), 2);
    }

    #[test]
    fn all_matches_recorded_not_just_winner() {
        let result = classify("I feel hopeless and scared, but thanks");
        assert_eq!(result.category, MessageCategory::Negative);
        assert!(result.matched_triggers.contains("thanks"));
        assert!(result.matched_triggers.contains("hopeless"));
        assert!(result.matched_triggers.contains("scared"));
    }

    #[test]
    fn punctuation_and_case_do_not_hide_triggers() {
        let result = classify("I CAN'T COPE!!!");
        assert_eq!(result.category, MessageCategory::Negative);
        assert!(result.matched_triggers.contains("cant cope"));
    }

    #[test]
    fn confidence_ladder_bounds() {
        assert_eq!(confidence_for(10), 1.0);
        // A single match already clears the weak-confidence floor.
        assert!((confidence_for(1) - 0.65).abs() < f32::EPSILON);
        assert!(confidence_for(1) > WEAK_CONFIDENCE);
    }

    #[test]
    fn urgent_suggestions_present_positive_reinforced() {
        let urgent = classify("I keep thinking about suicide");
        assert!(!urgent.suggestions.is_empty());
        assert!(urgent.suggestions.len() <= 3);

        let positive = classify("Today was a good day");
        assert_eq!(positive.category, MessageCategory::Positive);
        assert!(positive.suggestions.len() <= 3);
    }
}
