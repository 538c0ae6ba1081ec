//! Consonantal normalization of Hebrew word tokens.
//!
//! Two steps: strip every combining mark in the Hebrew points-and-accents
//! block (niqqud and cantillation), then fold the five final-letter glyphs
//! onto their medial equivalents so that normalized forms match the
//! medial-keyed lexicon. Anything else passes through untouched, so the
//! function is total and idempotent.

use thiserror::Error;

/// Unicode block holding Hebrew cantillation accents and vowel points
/// (U+0591..=U+05C7). Punctuation inside the block (maqaf, sof pasuq) is
/// also dropped here; the tokenizer has already split on it by the time a
/// token reaches normalization.
const MARKS: std::ops::RangeInclusive<char> = '\u{0591}'..='\u{05C7}';

/// The linguistically correct final-to-medial table:
/// ך→כ, ם→מ, ן→נ, ף→פ, ץ→צ.
const STANDARD_FINALS: [(char, char); 5] = [
    ('ך', 'כ'),
    ('ם', 'מ'),
    ('ן', 'נ'),
    ('ף', 'פ'),
    ('ץ', 'צ'),
];

/// Rejected shapes of a final-form substitution table.
///
/// A misaligned table (unequal source/target sides) silently miswires the
/// whole mapping, so it is refused at construction rather than surfacing as
/// per-token garbage later.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("final-form table is misaligned: {finals} final letters vs {medials} medials")]
    Misaligned { finals: usize, medials: usize },
    #[error("final letter {0:?} appears twice in the table")]
    DuplicateFinal(char),
}

/// Validated final-to-medial substitution table.
#[derive(Clone, Debug)]
pub struct FinalForms {
    pairs: Vec<(char, char)>,
}

impl FinalForms {
    /// The standard five-letter table.
    pub fn standard() -> Self {
        FinalForms {
            pairs: STANDARD_FINALS.to_vec(),
        }
    }

    /// Build a table from parallel strings of final and medial letters.
    ///
    /// The two sides must pair up one-to-one and no final letter may repeat.
    pub fn from_strs(finals: &str, medials: &str) -> Result<Self, TableError> {
        let finals: Vec<char> = finals.chars().collect();
        let medials: Vec<char> = medials.chars().collect();
        if finals.len() != medials.len() {
            return Err(TableError::Misaligned {
                finals: finals.len(),
                medials: medials.len(),
            });
        }
        let mut pairs = Vec::with_capacity(finals.len());
        for (f, m) in finals.into_iter().zip(medials) {
            if pairs.iter().any(|(seen, _)| *seen == f) {
                return Err(TableError::DuplicateFinal(f));
            }
            pairs.push((f, m));
        }
        Ok(FinalForms { pairs })
    }

    fn medial(&self, c: char) -> char {
        self.pairs
            .iter()
            .find(|(f, _)| *f == c)
            .map_or(c, |(_, m)| *m)
    }
}

/// Normalizes tokens against a fixed [`FinalForms`] table.
#[derive(Clone, Debug)]
pub struct Normalizer {
    finals: FinalForms,
}

impl Normalizer {
    pub fn new(finals: FinalForms) -> Self {
        Normalizer { finals }
    }

    /// Normalizer with the standard final-form table.
    pub fn standard() -> Self {
        Normalizer::new(FinalForms::standard())
    }

    /// Strip niqqud and cantillation, fold finals to medials.
    ///
    /// Total and deterministic; unrecognized characters pass through, so
    /// already-normalized text is a fixed point.
    pub fn normalize(&self, token: &str) -> String {
        token
            .chars()
            .filter(|c| !MARKS.contains(c))
            .map(|c| self.finals.medial(c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_vowel_points_and_accents() {
        let norm = Normalizer::standard();
        assert_eq!(norm.normalize("בְּרֵאשִׁ֖ית"), "בראשית");
        assert_eq!(norm.normalize("אֱלֹהִ֑ים"), "אלהים");
    }

    #[test]
    fn folds_each_final_letter() {
        let norm = Normalizer::standard();
        for (fin, medial) in STANDARD_FINALS {
            assert_eq!(norm.normalize(&fin.to_string()), medial.to_string());
        }
    }

    #[test]
    fn leaves_other_characters_alone() {
        let norm = Normalizer::standard();
        assert_eq!(norm.normalize("תורה"), "תורה");
        assert_eq!(norm.normalize("abc!"), "abc!");
        assert_eq!(norm.normalize(""), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        let norm = Normalizer::standard();
        for raw in ["בְּרֵאשִׁית", "הָאָֽרֶץ", "וְיֹלֶדֶת בֵּן", "כָּאֲרִי"] {
            let once = norm.normalize(raw);
            assert_eq!(norm.normalize(&once), once);
        }
    }

    #[test]
    fn rejects_misaligned_table() {
        let err = FinalForms::from_strs("ךםןףץ", "כמהנפצ").unwrap_err();
        assert!(matches!(
            err,
            TableError::Misaligned {
                finals: 5,
                medials: 6
            }
        ));
    }

    #[test]
    fn rejects_duplicate_finals() {
        let err = FinalForms::from_strs("ךך", "ככ").unwrap_err();
        assert!(matches!(err, TableError::DuplicateFinal('ך')));
    }

    #[test]
    fn custom_table_applies() {
        let finals = FinalForms::from_strs("ם", "מ").unwrap();
        let norm = Normalizer::new(finals);
        assert_eq!(norm.normalize("שלום"), "שלומ");
        // Letters outside the custom table keep their final shapes.
        assert_eq!(norm.normalize("ארץ"), "ארץ");
    }
}
