//! Verse text retrieval for the parallel-text traditions.
//!
//! This crate is the I/O-facing collaborator of the glossing pipeline: it
//! turns a [`VerseRef`](vorlage_types::VerseRef) and a
//! [`Tradition`](vorlage_types::Tradition) into a
//! [`Passage`](vorlage_types::Passage). Static seed data covers the
//! bundled verses; the Septuagint can additionally be resolved against the
//! remote interlinear data set. All failure modes are soft: a miss or a
//! fetch error produces a clearly bracketed placeholder passage, so the
//! glossing pipeline and the UI never see a network error.

pub mod library;
pub mod lxx_remote;

pub use library::Library;
pub use lxx_remote::{DEFAULT_ENGLISH_URL, DEFAULT_GREEK_URL, RemoteLxx};
