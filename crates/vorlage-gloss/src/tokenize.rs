//! Verse tokenization.
//!
//! Splits a raw verse string into word tokens in logical reading order.
//! Verse-internal punctuation (maqaf, sof pasuq, and their Latin
//! equivalents) counts as a word boundary; runs of separators never
//! produce empty tokens.

/// Characters treated as word boundaries in addition to whitespace:
/// maqaf, hyphen, colon, semicolon, comma, sof pasuq.
const SEPARATORS: [char; 6] = ['־', '-', ':', ';', ',', '׃'];

/// Split a verse into word tokens, dropping punctuation.
///
/// Empty or separator-only input yields an empty sequence.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| c.is_whitespace() || SEPARATORS.contains(&c))
        .filter(|token| !token.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(
            tokenize("בראשית ברא אלהים"),
            vec!["בראשית", "ברא", "אלהים"]
        );
    }

    #[test]
    fn maqaf_and_sof_pasuq_are_boundaries() {
        assert_eq!(tokenize("על־פני"), vec!["על", "פני"]);
        assert_eq!(tokenize("הארץ׃"), vec!["הארץ"]);
    }

    #[test]
    fn order_matches_input() {
        assert_eq!(tokenize("אחד שנים, שלשה"), vec!["אחד", "שנים", "שלשה"]);
    }

    #[test]
    fn empty_and_punctuation_only_inputs() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t ").is_empty());
        assert!(tokenize("־׃;,:-").is_empty());
    }

    #[test]
    fn separator_runs_produce_no_empty_tokens() {
        assert_eq!(tokenize("  ברא־־אלהים ׃ "), vec!["ברא", "אלהים"]);
    }
}
