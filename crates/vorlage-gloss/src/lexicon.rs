//! The gloss lexicon and the Hebrew prefix table.
//!
//! Both are immutable once constructed and are injected into the
//! [`Glosser`](crate::Glosser) rather than living as module globals, so
//! tests and alternative lexicon versions can coexist in one process.
//! Malformed tables (duplicate keys, multi-letter prefixes) are refused at
//! construction; nothing is deferred to per-token lookup time.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::info;

use crate::normalize::Normalizer;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("duplicate lexicon entry for {normalized:?} (from {raw:?})")]
    DuplicateEntry { raw: String, normalized: String },
    #[error("lexicon entry with empty form (gloss {gloss:?})")]
    EmptyForm { gloss: String },
    #[error("prefix {0:?} must be a single letter")]
    MultiLetterPrefix(String),
    #[error("duplicate prefix {0:?}")]
    DuplicatePrefix(char),
}

/// Seed lexicon covering the bundled verses (Genesis 1:1, Isaiah 7:14,
/// Psalm 22:16). Bare stems like ראשית or ארץ are deliberately absent:
/// words the seed carries as full forms resolve as direct hits, not as
/// prefix compositions.
const SEED_ENTRIES: [(&str, &str); 18] = [
    ("בראשית", "beginning"),
    ("ברא", "created"),
    ("אלהים", "God"),
    ("את", "[obj]"),
    ("השמים", "the-heavens"),
    ("הארץ", "the-earth"),
    ("ו", "and"),
    ("הנה", "behold"),
    ("עלמה", "maiden"),
    ("הרה", "conceiving"),
    ("ילדת", "bearing"),
    ("בן", "son"),
    ("בתולה", "virgin"),
    ("ארי", "lion"),
    ("ידי", "my-hands"),
    ("רגלי", "my-feet"),
    ("כרו", "they-dug"),
    ("כארו", "they-pierced"),
];

/// Single-letter prefixes in tie-break order: first match wins.
const SEED_PREFIXES: [(char, &str); 5] = [
    ('ו', "and"),
    ('ה', "the"),
    ('ב', "in"),
    ('ל', "to"),
    ('כ', "as"),
];

/// Read-only mapping from normalized word form to English gloss.
#[derive(Clone, Debug)]
pub struct Lexicon {
    entries: HashMap<String, String>,
}

impl Lexicon {
    /// Build a lexicon, normalizing each key.
    ///
    /// Keys are run through the normalizer so pointed or final-form
    /// spellings of the same word cannot alias; entries that collide after
    /// normalization are an error.
    pub fn new<I, K, V>(entries: I, normalizer: &Normalizer) -> Result<Self, LexiconError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut map = HashMap::new();
        for (raw, gloss) in entries {
            let raw = raw.as_ref();
            let gloss = gloss.into();
            let normalized = normalizer.normalize(raw);
            if normalized.is_empty() {
                return Err(LexiconError::EmptyForm { gloss });
            }
            if map.insert(normalized.clone(), gloss).is_some() {
                return Err(LexiconError::DuplicateEntry {
                    raw: raw.to_string(),
                    normalized,
                });
            }
        }
        Ok(Lexicon { entries: map })
    }

    /// The built-in seed lexicon.
    pub fn seed(normalizer: &Normalizer) -> Self {
        Lexicon::new(SEED_ENTRIES, normalizer).expect("seed lexicon is internally consistent")
    }

    /// Load a lexicon from a tab-separated file: `form<TAB>gloss` per line,
    /// blank lines and `#` comments skipped.
    pub fn load(path: impl AsRef<Path>, normalizer: &Normalizer) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("open lexicon file {}", path.display()))?;
        let reader = BufReader::new(file);
        let mut entries = Vec::new();
        for (lineno, line) in reader.lines().enumerate() {
            let line = line
                .with_context(|| format!("read line {} in {}", lineno + 1, path.display()))?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (form, gloss) = line.split_once('\t').with_context(|| {
                format!("line {} in {} is not form<TAB>gloss", lineno + 1, path.display())
            })?;
            entries.push((form.trim().to_string(), gloss.trim().to_string()));
        }
        let lexicon = Lexicon::new(entries, normalizer)
            .with_context(|| format!("validate lexicon {}", path.display()))?;
        info!("loaded {} lexicon entries from {}", lexicon.len(), path.display());
        Ok(lexicon)
    }

    /// Gloss for an already-normalized form.
    pub fn gloss(&self, form: &str) -> Option<&str> {
        self.entries.get(form).map(String::as_str)
    }

    pub fn contains(&self, form: &str) -> bool {
        self.entries.contains_key(form)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ordered table of single-letter prefixes and their gloss fragments.
///
/// Iteration order is definition order; when more than one rule could
/// apply, the first match in the table wins.
#[derive(Clone, Debug)]
pub struct PrefixTable {
    entries: Vec<(char, String)>,
}

impl PrefixTable {
    pub fn new<I, S>(entries: I) -> Result<Self, LexiconError>
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut table = Vec::new();
        for (letter, gloss) in entries {
            let letter = letter.as_ref();
            let mut chars = letter.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                return Err(LexiconError::MultiLetterPrefix(letter.to_string()));
            };
            if table.iter().any(|(seen, _)| *seen == c) {
                return Err(LexiconError::DuplicatePrefix(c));
            }
            table.push((c, gloss.as_ref().to_string()));
        }
        Ok(PrefixTable { entries: table })
    }

    /// The built-in conjunction/article/preposition prefixes.
    pub fn seed() -> Self {
        PrefixTable {
            entries: SEED_PREFIXES
                .iter()
                .map(|(c, gloss)| (*c, gloss.to_string()))
                .collect(),
        }
    }

    /// Prefixes in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.entries.iter().map(|(c, gloss)| (*c, gloss.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn seed_lexicon_holds_genesis_vocabulary() {
        let normalizer = Normalizer::standard();
        let lexicon = Lexicon::seed(&normalizer);
        assert_eq!(lexicon.gloss("בראשית"), Some("beginning"));
        assert_eq!(lexicon.gloss("את"), Some("[obj]"));
        // Bare stems are not seeded.
        assert!(!lexicon.contains("ראשית"));
        assert!(!lexicon.contains("ארץ"));
    }

    #[test]
    fn keys_are_normalized_on_construction() {
        let normalizer = Normalizer::standard();
        let lexicon = Lexicon::new([("בֵּן", "son")], &normalizer).unwrap();
        // Final nun folded, points stripped.
        assert_eq!(lexicon.gloss("בנ"), Some("son"));
        assert_eq!(lexicon.gloss("בֵּן"), None);
    }

    #[test]
    fn aliasing_keys_are_rejected() {
        let normalizer = Normalizer::standard();
        let err = Lexicon::new([("בן", "son"), ("בנ", "son")], &normalizer).unwrap_err();
        assert!(matches!(err, LexiconError::DuplicateEntry { .. }));
    }

    #[test]
    fn rejects_empty_forms() {
        let normalizer = Normalizer::standard();
        // A marks-only "form" normalizes to nothing.
        let err = Lexicon::new([("\u{05B0}", "gloss")], &normalizer).unwrap_err();
        assert!(matches!(err, LexiconError::EmptyForm { .. }));
    }

    #[test]
    fn loads_tab_separated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.tsv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "# test lexicon").unwrap();
        writeln!(file, "ברא\tcreated").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "הארץ\tthe-earth").unwrap();
        drop(file);

        let normalizer = Normalizer::standard();
        let lexicon = Lexicon::load(&path, &normalizer).unwrap();
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.gloss("ברא"), Some("created"));
        // Stored under the folded spelling.
        assert_eq!(lexicon.gloss("הארצ"), Some("the-earth"));
    }

    #[test]
    fn load_rejects_untabbed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.tsv");
        std::fs::write(&path, "ברא created\n").unwrap();
        let normalizer = Normalizer::standard();
        assert!(Lexicon::load(&path, &normalizer).is_err());
    }

    #[test]
    fn prefix_table_keeps_definition_order() {
        let table = PrefixTable::seed();
        let letters: Vec<char> = table.iter().map(|(c, _)| c).collect();
        assert_eq!(letters, vec!['ו', 'ה', 'ב', 'ל', 'כ']);
    }

    #[test]
    fn prefix_table_rejects_multi_letter_and_duplicate_rules() {
        let err = PrefixTable::new([("וה", "and-the")]).unwrap_err();
        assert!(matches!(err, LexiconError::MultiLetterPrefix(_)));
        let err = PrefixTable::new([("ו", "and"), ("ו", "also")]).unwrap_err();
        assert!(matches!(err, LexiconError::DuplicatePrefix('ו')));
    }
}
