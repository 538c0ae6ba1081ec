//! Gloss resolution and the verse pipeline.
//!
//! Resolution order for a token: normalize, try each prefix rule in table
//! order (single-letter tokens are never decomposed into prefix plus empty
//! stem), then a direct lexicon lookup, then the [`UNMAPPED`] sentinel.
//! A prefix match whose stem is in the lexicon wins outright; direct lookup
//! is only reached after every prefix rule has failed.

use vorlage_types::{GlossOrigin, GlossedWord};

use crate::lexicon::{Lexicon, PrefixTable};
use crate::normalize::Normalizer;
use crate::tokenize::tokenize;

/// Sentinel gloss for a word the lexicon does not cover. A normal result,
/// not an error.
pub const UNMAPPED: &str = "[unmapped]";

/// The assembled pipeline: normalizer, lexicon, and prefix table.
///
/// Holds only read-only state, so one `Glosser` can serve concurrent
/// requests without locking.
#[derive(Clone, Debug)]
pub struct Glosser {
    normalizer: Normalizer,
    lexicon: Lexicon,
    prefixes: PrefixTable,
}

impl Glosser {
    pub fn new(normalizer: Normalizer, lexicon: Lexicon, prefixes: PrefixTable) -> Self {
        Glosser {
            normalizer,
            lexicon,
            prefixes,
        }
    }

    /// Pipeline over the built-in seed tables.
    pub fn seed() -> Self {
        let normalizer = Normalizer::standard();
        let lexicon = Lexicon::seed(&normalizer);
        Glosser::new(normalizer, lexicon, PrefixTable::seed())
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Resolve one word token to its gloss.
    pub fn resolve(&self, token: &str) -> GlossedWord {
        let normalized = self.normalizer.normalize(token);

        // Prefix decomposition; skipped for single-letter tokens so a bare
        // prefix letter is looked up as a word in its own right.
        if normalized.chars().count() > 1 {
            for (prefix, prefix_gloss) in self.prefixes.iter() {
                let Some(stem) = normalized.strip_prefix(prefix) else {
                    continue;
                };
                if let Some(stem_gloss) = self.lexicon.gloss(stem) {
                    return GlossedWord {
                        surface: token.to_string(),
                        gloss: format!("{prefix_gloss}-{stem_gloss}"),
                        origin: GlossOrigin::Prefix { prefix },
                    };
                }
            }
        }

        if let Some(gloss) = self.lexicon.gloss(&normalized) {
            return GlossedWord {
                surface: token.to_string(),
                gloss: gloss.to_string(),
                origin: GlossOrigin::Lexicon,
            };
        }

        GlossedWord {
            surface: token.to_string(),
            gloss: UNMAPPED.to_string(),
            origin: GlossOrigin::Unmapped,
        }
    }

    /// Gloss a whole verse: one [`GlossedWord`] per token, in token order.
    ///
    /// The output length always equals the token count; unmapped words are
    /// carried through, never dropped.
    pub fn gloss_verse(&self, text: &str) -> Vec<GlossedWord> {
        tokenize(text)
            .into_iter()
            .map(|token| self.resolve(token))
            .collect()
    }
}
