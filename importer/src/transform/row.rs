//! Flat CSV row to [`WordProfile`].
//!
//! Every lookup defaults to an empty string, so building a profile never
//! fails. Only `word` and list segments are trimmed; other cells are copied
//! verbatim.

use crate::models::{
    AdjectiveForms, Affix, Analysis, Definitions, Etymology, FlatRecord, MorphemeBreakdown,
    NounForms, Root, VerbTenses, WordForms, WordProfile,
};

/// In-cell separator for list-valued columns.
pub const LIST_SEPARATOR: char = '|';

/// Build a profile from one row.
///
/// # Example
/// ```
/// use lexiload::{profile_from_record, FlatRecord};
///
/// let mut row = FlatRecord::new();
/// row.insert("word".into(), "  superfluous ".into());
/// row.insert("standard_definitions".into(), "excessive|unnecessary".into());
///
/// let profile = profile_from_record(&row);
/// assert_eq!(profile.word, "superfluous");
/// assert_eq!(profile.morpheme_breakdown.root.text, "superfluous");
/// assert_eq!(profile.definitions.standard, vec!["excessive", "unnecessary"]);
/// ```
pub fn profile_from_record(row: &FlatRecord) -> WordProfile {
    let fields = Fields(row);
    let word = fields.get("word").trim().to_string();

    WordProfile {
        morpheme_breakdown: morpheme_breakdown(&fields, &word),
        etymology: Etymology {
            historical_origins: fields.owned("historical_origins"),
            language_of_origin: fields.owned("language_of_origin"),
            word_evolution: fields.owned("word_evolution"),
            cultural_regional_variations: fields.owned("cultural_regional_variations"),
        },
        definitions: Definitions {
            primary: fields.owned("primary_definition"),
            standard: split_list(fields.get("standard_definitions")),
            extended: split_list(fields.get("extended_definitions")),
            contextual: fields.owned("contextual_definition"),
            specialized: fields.owned("specialized_definition"),
        },
        word_forms: WordForms {
            base_form: fields.owned("base_form"),
            verb_tenses: VerbTenses {
                present: fields.owned("present_tense"),
                past: fields.owned("past_tense"),
                future: fields.owned("future_tense"),
                present_participle: fields.owned("present_participle"),
                past_participle: fields.owned("past_participle"),
                other: fields.owned("other_tenses"),
            },
            noun_forms: NounForms {
                singular: fields.owned("singular_form"),
                plural: fields.owned("plural_form"),
            },
            adjective_forms: AdjectiveForms {
                positive: fields.owned("positive_form"),
                comparative: fields.owned("comparative_form"),
                superlative: fields.owned("superlative_form"),
            },
            adverb_form: fields.owned("adverb_form"),
            other_inflections: fields.owned("other_inflections"),
        },
        analysis: Analysis {
            parts_of_speech: fields.owned("parts_of_speech"),
            tenses_voice_mood: fields.owned("tenses_voice_mood"),
            articles_determiners: fields.owned("articles_determiners"),
            sentence_positions: fields.owned("sentence_positions"),
            sentence_structure: fields.owned("sentence_structure"),
            contextual_usage: fields.owned("contextual_usage"),
            synonyms_antonyms: fields.owned("synonyms_antonyms"),
            common_collocations: fields.owned("common_collocations"),
            cultural_historical_significance: fields.owned("cultural_historical_significance"),
            example: fields.owned("example_sentence"),
        },
        word,
    }
}

/// Split a pipe-delimited cell into trimmed, non-empty segments.
///
/// ```
/// assert_eq!(lexiload::split_list("a | b||c "), vec!["a", "b", "c"]);
/// assert!(lexiload::split_list("").is_empty());
/// ```
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn morpheme_breakdown(fields: &Fields<'_>, word: &str) -> MorphemeBreakdown {
    let root_text = match fields.get("root_text") {
        "" => word.to_string(),
        text => text.to_string(),
    };

    MorphemeBreakdown {
        prefix: affix(fields, "prefix"),
        root: Root {
            text: root_text,
            meaning: fields.owned("root_meaning"),
        },
        suffix: affix(fields, "suffix"),
    }
}

/// `<kind>_text` gates the whole affix; once present, meaning and origin
/// are kept even when empty.
fn affix(fields: &Fields<'_>, kind: &str) -> Option<Affix> {
    let text = fields.get(&format!("{kind}_text"));
    if text.is_empty() {
        return None;
    }

    Some(Affix {
        text: text.to_string(),
        meaning: fields.owned(&format!("{kind}_meaning")),
        origin: fields.owned(&format!("{kind}_origin")),
    })
}

/// Default-to-empty view over a row.
struct Fields<'a>(&'a FlatRecord);

impl<'a> Fields<'a> {
    fn get(&self, key: &str) -> &'a str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }

    fn owned(&self, key: &str) -> String {
        self.get(key).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(pairs: &[(&str, &str)]) -> FlatRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_word_is_trimmed() {
        let profile = profile_from_record(&row(&[("word", "\t gregarious  ")]));
        assert_eq!(profile.word, "gregarious");
    }

    #[test]
    fn test_root_defaults_to_word() {
        let profile = profile_from_record(&row(&[("word", " laconic ")]));
        assert_eq!(profile.morpheme_breakdown.root.text, "laconic");

        let profile = profile_from_record(&row(&[("word", "laconic"), ("root_text", "")]));
        assert_eq!(profile.morpheme_breakdown.root.text, "laconic");
    }

    #[test]
    fn test_explicit_root_is_verbatim() {
        let profile = profile_from_record(&row(&[("word", "superfluous"), ("root_text", " flu")]));
        assert_eq!(profile.morpheme_breakdown.root.text, " flu");
    }

    #[test]
    fn test_missing_prefix_omits_key() {
        let profile = profile_from_record(&row(&[
            ("word", "fluent"),
            ("prefix_text", ""),
            ("prefix_meaning", "ignored"),
        ]));
        assert!(profile.morpheme_breakdown.prefix.is_none());

        let value = serde_json::to_value(&profile.morpheme_breakdown).unwrap();
        assert!(value.get("prefix").is_none());
        assert!(value.get("suffix").is_none());
    }

    #[test]
    fn test_affix_gate_keeps_empty_subfields() {
        let profile = profile_from_record(&row(&[("word", "joyous"), ("suffix_text", "-ous")]));
        let suffix = profile.morpheme_breakdown.suffix.unwrap();
        assert_eq!(suffix.text, "-ous");
        assert_eq!(suffix.meaning, "");
        assert_eq!(suffix.origin, "");
    }

    #[test]
    fn test_split_list_trims_and_drops_empty() {
        assert_eq!(split_list("a | b||c "), vec!["a", "b", "c"]);
        assert_eq!(split_list(" | |"), Vec::<String>::new());
        assert_eq!(split_list("only one"), vec!["only one"]);
    }

    #[test]
    fn test_empty_record_is_total() {
        let profile = profile_from_record(&FlatRecord::new());
        assert!(!profile.has_word());
        assert_eq!(profile.morpheme_breakdown.root.text, "");
        assert!(profile.definitions.standard.is_empty());
        assert!(profile.definitions.extended.is_empty());
        assert_eq!(profile.word_forms.verb_tenses.other, "");
    }

    #[test]
    fn test_scalars_are_not_trimmed() {
        let profile = profile_from_record(&row(&[
            ("word", "terse"),
            ("primary_definition", "  brief "),
            ("example_sentence", "His reply was terse. "),
        ]));
        assert_eq!(profile.definitions.primary, "  brief ");
        assert_eq!(profile.analysis.example, "His reply was terse. ");
    }

    #[test]
    fn test_column_mapping() {
        let profile = profile_from_record(&row(&[
            ("word", "run"),
            ("present_tense", "runs"),
            ("past_tense", "ran"),
            ("future_tense", "will run"),
            ("other_tenses", "had run"),
            ("singular_form", "run"),
            ("plural_form", "runs"),
            ("comparative_form", "n/a"),
            ("contextual_definition", "in sport"),
            ("specialized_definition", "in cricket"),
        ]));
        let forms = &profile.word_forms;
        assert_eq!(forms.verb_tenses.present, "runs");
        assert_eq!(forms.verb_tenses.past, "ran");
        assert_eq!(forms.verb_tenses.future, "will run");
        assert_eq!(forms.verb_tenses.other, "had run");
        assert_eq!(forms.noun_forms.plural, "runs");
        assert_eq!(forms.adjective_forms.comparative, "n/a");
        assert_eq!(profile.definitions.contextual, "in sport");
        assert_eq!(profile.definitions.specialized, "in cricket");
    }

    #[test]
    fn test_superfluous_end_to_end() {
        let profile = profile_from_record(&row(&[
            ("word", "superfluous"),
            ("prefix_text", "super-"),
            ("root_text", "flu"),
            ("suffix_text", "-ous"),
            ("standard_definitions", "excessive|unnecessary|redundant"),
        ]));

        assert_eq!(
            profile.definitions.standard,
            vec!["excessive", "unnecessary", "redundant"]
        );
        assert_eq!(profile.morpheme_breakdown.prefix.as_ref().unwrap().text, "super-");

        let breakdown = serde_json::to_value(&profile.morpheme_breakdown).unwrap();
        assert_eq!(
            breakdown,
            json!({
                "prefix": { "text": "super-", "meaning": "", "origin": "" },
                "root": { "text": "flu", "meaning": "" },
                "suffix": { "text": "-ous", "meaning": "", "origin": "" }
            })
        );
    }
}
