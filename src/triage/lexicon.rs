use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TriageError;
use crate::models::enums::MessageCategory;

/// Longest phrase the classifier's sliding window scans for.
pub const MAX_PHRASE_TOKENS: usize = 4;

/// Lower-case the text and reduce it to alphanumeric tokens.
/// Apostrophes and other punctuation are stripped entirely, so "can't" and
/// "cant" normalize to the same token.
pub fn normalize_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() {
                Some(c)
            } else if c == '\'' || c == '’' {
                // Deleted, not spaced, so contractions stay one token.
                None
            } else {
                Some(' ')
            }
        })
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Normalize a lexicon phrase to the exact form a token window produces.
pub fn normalize_phrase(phrase: &str) -> String {
    normalize_tokens(phrase).join(" ")
}

/// On-disk shape of a deployment lexicon override.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconFile {
    pub urgent: Vec<String>,
    pub negative: Vec<String>,
    pub positive: Vec<String>,
    pub neutral: Vec<String>,
}

/// The four disjoint trigger lexicons classification runs against.
///
/// The built-in lists are a reference default, not a fixed clinical
/// standard; deployments tune them by shipping a JSON file and calling
/// [`TriageLexicon::load`]. Phrases are stored normalized so matching stays
/// consistent with message normalization.
#[derive(Debug)]
pub struct TriageLexicon {
    urgent: HashSet<String>,
    negative: HashSet<String>,
    positive: HashSet<String>,
    neutral: HashSet<String>,
}

impl TriageLexicon {
    /// Load a deployment override from a JSON file.
    pub fn load(path: &Path) -> Result<Self, TriageError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            TriageError::LexiconLoad(path.display().to_string(), e.to_string())
        })?;
        let file: LexiconFile = serde_json::from_str(&json).map_err(|e| {
            TriageError::LexiconParse(path.display().to_string(), e.to_string())
        })?;
        Self::from_file(file)
    }

    /// Build a validated lexicon from parsed lists.
    pub fn from_file(file: LexiconFile) -> Result<Self, TriageError> {
        let urgent = normalize_list(&file.urgent, "urgent")?;
        let negative = normalize_list(&file.negative, "negative")?;
        let positive = normalize_list(&file.positive, "positive")?;
        let neutral = normalize_list(&file.neutral, "neutral")?;

        let lists = [&urgent, &negative, &positive, &neutral];
        for (i, a) in lists.iter().enumerate() {
            for b in lists.iter().skip(i + 1) {
                if let Some(shared) = a.intersection(b).next() {
                    return Err(TriageError::LexiconInvalid(format!(
                        "phrase '{shared}' appears in more than one list"
                    )));
                }
            }
        }

        Ok(Self {
            urgent,
            negative,
            positive,
            neutral,
        })
    }

    /// Which lexicon a normalized token window belongs to, if any.
    /// The lists are disjoint, so the first hit is the only hit.
    pub fn lookup(&self, window: &str) -> Option<MessageCategory> {
        if self.urgent.contains(window) {
            Some(MessageCategory::Urgent)
        } else if self.negative.contains(window) {
            Some(MessageCategory::Negative)
        } else if self.positive.contains(window) {
            Some(MessageCategory::Positive)
        } else if self.neutral.contains(window) {
            Some(MessageCategory::Neutral)
        } else {
            None
        }
    }
}

fn normalize_list(phrases: &[String], list: &str) -> Result<HashSet<String>, TriageError> {
    let mut out = HashSet::with_capacity(phrases.len());
    for phrase in phrases {
        let normalized = normalize_phrase(phrase);
        if normalized.is_empty() {
            return Err(TriageError::LexiconInvalid(format!(
                "empty phrase in '{list}' list"
            )));
        }
        let tokens = normalized.split(' ').count();
        if tokens > MAX_PHRASE_TOKENS {
            return Err(TriageError::LexiconInvalid(format!(
                "phrase '{normalized}' in '{list}' list exceeds {MAX_PHRASE_TOKENS} tokens"
            )));
        }
        out.insert(normalized);
    }
    Ok(out)
}

impl Default for TriageLexicon {
    /// The built-in reference lexicon. Curated lists, already normalized and
    /// disjoint, so construction cannot fail.
    fn default() -> Self {
        fn set(phrases: &[&str]) -> HashSet<String> {
            phrases.iter().map(|p| normalize_phrase(p)).collect()
        }

        Self {
            urgent: set(&[
                "kill myself",
                "end my life",
                "take my own life",
                "want to die",
                "want to end it",
                "end it all",
                "suicide",
                "suicidal",
                "self harm",
                "hurt myself",
                "harm myself",
                "cut myself",
                "no reason to live",
                "better off dead",
                "overdose",
            ]),
            negative: set(&[
                "hopeless",
                "worthless",
                "despair",
                "desperate",
                "panic",
                "panicking",
                "panic attack",
                "cant cope",
                "cant sleep",
                "cant take it",
                "cant do this anymore",
                "overwhelmed",
                "anxious",
                "anxiety",
                "depressed",
                "miserable",
                "awful",
                "terrible",
                "alone",
                "lonely",
                "isolated",
                "scared",
                "afraid",
                "terrified",
                "exhausted",
                "crying",
                "numb",
                "empty inside",
                "falling apart",
                "giving up",
            ]),
            positive: set(&[
                "thank you",
                "thanks",
                "grateful",
                "gratitude",
                "relieved",
                "relief",
                "hopeful",
                "hope",
                "better",
                "bit better",
                "feel better",
                "feeling better",
                "improving",
                "improved",
                "calmer",
                "proud",
                "happy",
                "helped",
                "good day",
                "sleeping better",
            ]),
            neutral: set(&[
                "okay",
                "fine",
                "alright",
                "appointment",
                "schedule",
                "medication",
                "question",
                "hello",
                "hi",
                "update",
                "checking in",
            ]),
        }
    }
}
