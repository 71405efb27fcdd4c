//! Domain models for the lexiload import pipeline.
//!
//! - [`FlatRecord`] - One CSV row, column name to raw value
//! - [`WordProfile`] - Nested profile document built from one row
//! - [`MorphemeBreakdown`], [`Etymology`], [`Definitions`], [`WordForms`],
//!   [`Analysis`] - The five persisted category documents

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One input row: column name to raw (untrimmed) cell value.
pub type FlatRecord = HashMap<String, String>;

// =============================================================================
// Word Profile
// =============================================================================

/// A complete word profile.
///
/// `word` is the upsert key; the other five fields are stored as one JSON
/// document each.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordProfile {
    pub word: String,
    pub morpheme_breakdown: MorphemeBreakdown,
    pub etymology: Etymology,
    pub definitions: Definitions,
    pub word_forms: WordForms,
    pub analysis: Analysis,
}

impl WordProfile {
    /// A profile without a word cannot be stored.
    pub fn has_word(&self) -> bool {
        !self.word.is_empty()
    }
}

// =============================================================================
// Morpheme Breakdown
// =============================================================================

/// Prefix / root / suffix decomposition.
///
/// `prefix` and `suffix` are omitted from the serialized document when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MorphemeBreakdown {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub prefix: Option<Affix>,
    pub root: Root,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub suffix: Option<Affix>,
}

/// A prefix or suffix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Affix {
    pub text: String,
    pub meaning: String,
    pub origin: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Root {
    pub text: String,
    pub meaning: String,
}

// =============================================================================
// Etymology
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Etymology {
    pub historical_origins: String,
    pub language_of_origin: String,
    pub word_evolution: String,
    pub cultural_regional_variations: String,
}

// =============================================================================
// Definitions
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Definitions {
    pub primary: String,
    /// Split from the pipe-delimited `standard_definitions` column.
    pub standard: Vec<String>,
    /// Split from the pipe-delimited `extended_definitions` column.
    pub extended: Vec<String>,
    pub contextual: String,
    pub specialized: String,
}

// =============================================================================
// Word Forms
// =============================================================================

/// Inflected forms of the word.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordForms {
    pub base_form: String,
    pub verb_tenses: VerbTenses,
    pub noun_forms: NounForms,
    pub adjective_forms: AdjectiveForms,
    pub adverb_form: String,
    pub other_inflections: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerbTenses {
    pub present: String,
    pub past: String,
    pub future: String,
    pub present_participle: String,
    pub past_participle: String,
    pub other: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NounForms {
    pub singular: String,
    pub plural: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdjectiveForms {
    pub positive: String,
    pub comparative: String,
    pub superlative: String,
}

// =============================================================================
// Analysis
// =============================================================================

/// Free-text usage analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub parts_of_speech: String,
    pub tenses_voice_mood: String,
    pub articles_determiners: String,
    pub sentence_positions: String,
    pub sentence_structure: String,
    pub contextual_usage: String,
    pub synonyms_antonyms: String,
    pub common_collocations: String,
    pub cultural_historical_significance: String,
    pub example: String,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_affixes_are_omitted() {
        let breakdown = MorphemeBreakdown {
            prefix: None,
            root: Root {
                text: "flu".into(),
                meaning: "to flow".into(),
            },
            suffix: None,
        };
        let value = serde_json::to_value(&breakdown).unwrap();
        assert_eq!(value, json!({ "root": { "text": "flu", "meaning": "to flow" } }));
    }

    #[test]
    fn test_present_affix_keeps_empty_fields() {
        let breakdown = MorphemeBreakdown {
            prefix: Some(Affix {
                text: "super-".into(),
                ..Default::default()
            }),
            ..Default::default()
        };
        let value = serde_json::to_value(&breakdown).unwrap();
        assert_eq!(value["prefix"], json!({ "text": "super-", "meaning": "", "origin": "" }));
        assert!(value.get("suffix").is_none());
    }

    #[test]
    fn test_definitions_lists_always_serialized() {
        let value = serde_json::to_value(Definitions::default()).unwrap();
        assert_eq!(value["standard"], json!([]));
        assert_eq!(value["extended"], json!([]));
    }

    #[test]
    fn test_has_word() {
        assert!(!WordProfile::default().has_word());
        let profile = WordProfile {
            word: "laconic".into(),
            ..Default::default()
        };
        assert!(profile.has_word());
    }
}
