//! Shared types for the Proto-Vorlage parallel-text service.
//!
//! These are the plain data values passed between the verse sources, the
//! glossing pipeline, and the web layer: which textual [`Tradition`] a text
//! belongs to, a parsed [`VerseRef`], the [`Passage`] payload a source hands
//! back, and the per-word [`GlossedWord`] output of the glosser.
//!
//! ```rust
//! use vorlage_types::{Tradition, VerseRef};
//!
//! let verse = VerseRef::parse("Genesis 1:1").unwrap();
//! assert_eq!(verse.book, "Genesis");
//! assert_eq!((verse.chapter, verse.verse), (1, 1));
//! assert_eq!(Tradition::from_slug("lxx"), Some(Tradition::Septuagint));
//! ```

use std::fmt;

/// One of the textual traditions displayed side by side.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Tradition {
    /// Masoretic Hebrew text.
    Masoretic,
    /// Dead Sea Scrolls fragments.
    DeadSeaScrolls,
    /// Septuagint Greek (LXX).
    Septuagint,
    /// Latin Vulgate.
    Vulgate,
}

impl Tradition {
    /// Display order of the tradition columns.
    pub const ALL: [Tradition; 4] = [
        Tradition::Masoretic,
        Tradition::DeadSeaScrolls,
        Tradition::Septuagint,
        Tradition::Vulgate,
    ];

    /// Short identifier used in URLs and JSON payloads.
    pub fn slug(self) -> &'static str {
        match self {
            Tradition::Masoretic => "masoretic",
            Tradition::DeadSeaScrolls => "dss",
            Tradition::Septuagint => "lxx",
            Tradition::Vulgate => "vulgate",
        }
    }

    /// Parse a slug back into a tradition.
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "masoretic" => Some(Tradition::Masoretic),
            "dss" => Some(Tradition::DeadSeaScrolls),
            "lxx" => Some(Tradition::Septuagint),
            "vulgate" => Some(Tradition::Vulgate),
            _ => None,
        }
    }

    /// Human-readable column title.
    pub fn title(self) -> &'static str {
        match self {
            Tradition::Masoretic => "Masoretic",
            Tradition::DeadSeaScrolls => "DSS",
            Tradition::Septuagint => "LXX",
            Tradition::Vulgate => "Vulgate",
        }
    }

    /// Name of the source language.
    pub fn language(self) -> &'static str {
        match self {
            Tradition::Masoretic | Tradition::DeadSeaScrolls => "Hebrew",
            Tradition::Septuagint => "Greek",
            Tradition::Vulgate => "Latin",
        }
    }
}

impl fmt::Display for Tradition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A parsed verse reference such as "Genesis 1:1".
///
/// The book name may itself contain spaces ("Song of Songs 2:4"); the last
/// whitespace-separated field must be `chapter:verse` with both parts
/// positive integers. No canon-range validation is performed.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct VerseRef {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
}

impl VerseRef {
    /// Parse a human-entered reference, tolerating surrounding whitespace.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let (book, numbers) = input.rsplit_once(char::is_whitespace)?;
        let (chapter, verse) = numbers.split_once(':')?;
        let chapter: u32 = chapter.parse().ok()?;
        let verse: u32 = verse.parse().ok()?;
        if chapter == 0 || verse == 0 {
            return None;
        }
        let book = book.trim();
        if book.is_empty() {
            return None;
        }
        Some(VerseRef {
            book: book.to_string(),
            chapter,
            verse,
        })
    }
}

impl fmt::Display for VerseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.book, self.chapter, self.verse)
    }
}

/// The payload a verse source returns for one tradition.
///
/// Lookup and fetch failures are reported in-band as bracketed placeholder
/// strings (with detail in `notes`) rather than as errors, so callers always
/// have something to render.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Passage {
    /// Verse text in the source language.
    pub original: String,
    /// English translation.
    pub english: String,
    /// Attribution or error detail.
    pub notes: String,
}

impl Passage {
    /// Placeholder payload for a verse a source does not carry.
    pub fn unavailable(notes: impl Into<String>) -> Self {
        Passage {
            original: "[Verse not available]".to_string(),
            english: "[Verse not available]".to_string(),
            notes: notes.into(),
        }
    }

    /// Whether `original` is a bracketed placeholder rather than verse text.
    pub fn is_placeholder(&self) -> bool {
        self.original.starts_with('[')
    }
}

/// How a gloss was arrived at.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GlossOrigin {
    /// Direct lexicon hit on the normalized form.
    Lexicon,
    /// Composed from a stripped prefix letter plus a lexicon stem.
    Prefix { prefix: char },
    /// No lexicon entry, directly or via prefix decomposition.
    Unmapped,
}

/// One word of a verse paired with its interlinear gloss.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GlossedWord {
    /// The surface token as it appeared in the verse.
    pub surface: String,
    /// English gloss, or the unmapped sentinel.
    pub gloss: String,
    pub origin: GlossOrigin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_reference() {
        let verse = VerseRef::parse("Genesis 1:1").unwrap();
        assert_eq!(verse.book, "Genesis");
        assert_eq!(verse.chapter, 1);
        assert_eq!(verse.verse, 1);
        assert_eq!(verse.to_string(), "Genesis 1:1");
    }

    #[test]
    fn parses_multiword_book() {
        let verse = VerseRef::parse("  Song of Songs 2:4 ").unwrap();
        assert_eq!(verse.book, "Song of Songs");
        assert_eq!(verse.chapter, 2);
        assert_eq!(verse.verse, 4);
    }

    #[test]
    fn rejects_malformed_references() {
        for bad in ["", "Genesis", "Genesis 1", "Genesis one:1", "1:1", "Genesis 0:3"] {
            assert!(VerseRef::parse(bad).is_none(), "accepted {bad:?}");
        }
    }

    #[test]
    fn slug_round_trip() {
        for tradition in Tradition::ALL {
            assert_eq!(Tradition::from_slug(tradition.slug()), Some(tradition));
        }
        assert_eq!(Tradition::from_slug("targum"), None);
    }

    #[test]
    fn placeholder_is_marked() {
        let passage = Passage::unavailable("not in seed data");
        assert!(passage.is_placeholder());
        assert_eq!(passage.original, "[Verse not available]");
    }
}
