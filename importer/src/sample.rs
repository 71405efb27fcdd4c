//! Template CSV with one fully worked record.
//!
//! The column order here is the canonical input layout; [`columns`] is also
//! used to flag unknown headers on import.

use std::path::Path;

use tracing::info;

use crate::error::CsvResult;
use crate::models::FlatRecord;

/// Where `lexiload template` writes by default.
pub const DEFAULT_TEMPLATE_PATH: &str = "sample_word_profiles.csv";

/// The `superfluous` example, in column order.
pub const SAMPLE_ROW: &[(&str, &str)] = &[
    ("word", "superfluous"),
    ("prefix_text", "super-"),
    ("prefix_meaning", "above, over, beyond"),
    ("prefix_origin", "Latin"),
    ("root_text", "flu"),
    ("root_meaning", "to flow"),
    ("suffix_text", "-ous"),
    ("suffix_meaning", "having the quality of"),
    ("suffix_origin", "Latin"),
    (
        "historical_origins",
        "From Latin superfluus meaning \"overflowing, unnecessary\"",
    ),
    ("language_of_origin", "Latin"),
    (
        "word_evolution",
        "Originally meant \"overflowing\", evolved to mean \"excessive\" or \"unnecessary\"",
    ),
    (
        "cultural_regional_variations",
        "Used similarly across English-speaking regions",
    ),
    (
        "primary_definition",
        "unnecessary, especially through being more than enough",
    ),
    ("standard_definitions", "excessive|unnecessary|redundant"),
    (
        "extended_definitions",
        "beyond what is required|wastefully abundant",
    ),
    (
        "contextual_definition",
        "In formal writing, refers to elements that add no value",
    ),
    (
        "specialized_definition",
        "In logic, refers to premises that do not affect the conclusion",
    ),
    ("base_form", "superfluous"),
    ("present_tense", ""),
    ("past_tense", ""),
    ("future_tense", ""),
    ("present_participle", ""),
    ("past_participle", ""),
    ("other_tenses", ""),
    ("singular_form", ""),
    ("plural_form", ""),
    ("positive_form", "superfluous"),
    ("comparative_form", "more superfluous"),
    ("superlative_form", "most superfluous"),
    ("adverb_form", "superfluously"),
    ("other_inflections", "superfluity (noun)"),
    ("parts_of_speech", "adjective"),
    ("tenses_voice_mood", "N/A (adjective)"),
    (
        "articles_determiners",
        "a superfluous detail, the superfluous information",
    ),
    ("sentence_positions", "attributive and predicative positions"),
    (
        "sentence_structure",
        "can modify nouns directly or follow linking verbs",
    ),
    (
        "contextual_usage",
        "formal writing, academic contexts, criticism",
    ),
    (
        "synonyms_antonyms",
        "synonyms: unnecessary, excessive, redundant; antonyms: necessary, essential, required",
    ),
    (
        "common_collocations",
        "superfluous detail, superfluous information, superfluous to requirements",
    ),
    (
        "cultural_historical_significance",
        "Often used in literary criticism and formal analysis",
    ),
    (
        "example_sentence",
        "The lengthy introduction seemed superfluous to the main argument.",
    ),
];

/// Every recognised input column, in template order.
pub fn columns() -> impl Iterator<Item = &'static str> {
    SAMPLE_ROW.iter().map(|(column, _)| *column)
}

/// The example as a row, as the CSV reader would produce it.
pub fn sample_record() -> FlatRecord {
    SAMPLE_ROW
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Write the header plus the example row to `path`.
pub fn write_template<P: AsRef<Path>>(path: P) -> CsvResult<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    writer.write_record(columns())?;
    writer.write_record(SAMPLE_ROW.iter().map(|(_, value)| *value))?;
    writer.flush()?;

    info!("Created {}", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_csv_file;
    use crate::transform::profile_from_record;
    use std::collections::HashSet;

    #[test]
    fn test_columns_are_unique() {
        let all: Vec<_> = columns().collect();
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(all.len(), 42);
        assert_eq!(unique.len(), all.len());
        assert_eq!(all[0], "word");
    }

    #[test]
    fn test_template_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_TEMPLATE_PATH);

        write_template(&path).unwrap();
        let parsed = parse_csv_file(&path, None).unwrap();

        assert_eq!(parsed.delimiter, ',');
        assert_eq!(parsed.headers, columns().collect::<Vec<_>>());
        assert_eq!(parsed.records, vec![sample_record()]);
    }

    #[test]
    fn test_sample_profile() {
        let profile = profile_from_record(&sample_record());

        assert_eq!(profile.word, "superfluous");
        assert_eq!(
            profile.definitions.extended,
            vec!["beyond what is required", "wastefully abundant"]
        );
        assert_eq!(profile.word_forms.adverb_form, "superfluously");
        assert_eq!(
            profile.analysis.example,
            "The lengthy introduction seemed superfluous to the main argument."
        );
        let suffix = profile.morpheme_breakdown.suffix.unwrap();
        assert_eq!(suffix.origin, "Latin");
    }
}
