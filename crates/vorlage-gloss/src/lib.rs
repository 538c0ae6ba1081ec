//! Hebrew word-level normalization and interlinear glossing.
//!
//! The pipeline that turns a raw Hebrew verse string into an aligned
//! token/gloss sequence:
//!
//! 1. Tokenize the verse (maqaf, sof pasuq and friends are word boundaries).
//! 2. Normalize each token: strip niqqud and cantillation, fold the five
//!    final letter forms onto their medial equivalents.
//! 3. Resolve a gloss per token against an immutable [`Lexicon`], trying
//!    single-letter prefix decomposition (conjunction, article,
//!    prepositions) before direct lookup, falling back to the
//!    [`UNMAPPED`] sentinel.
//!
//! Everything here is pure and synchronous: no I/O happens after
//! construction, and a [`Glosser`] can be shared freely across threads.
//! Table problems (misaligned final-form tables, duplicate lexicon keys)
//! are construction-time errors, never per-token failures.
//!
//! # Example
//! ```rust
//! use vorlage_gloss::Glosser;
//!
//! let glosser = Glosser::seed();
//! let words = glosser.gloss_verse("בְּרֵאשִׁית בָּרָא אֱלֹהִים");
//! let glosses: Vec<&str> = words.iter().map(|w| w.gloss.as_str()).collect();
//! assert_eq!(glosses, ["beginning", "created", "God"]);
//! ```
//!
//! For a runnable demo, see
//! `cargo run -p vorlage-gloss --example gloss -- "<hebrew text>"`.

pub mod lexicon;
pub mod normalize;
pub mod resolve;
pub mod tokenize;

pub use lexicon::{Lexicon, LexiconError, PrefixTable};
pub use normalize::{FinalForms, Normalizer, TableError};
pub use resolve::{Glosser, UNMAPPED};
pub use tokenize::tokenize;
