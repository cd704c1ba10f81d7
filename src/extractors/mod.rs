// Repository inspection
//
// Extractors read a fetched repository's build file, compose manifest,
// documentation and package manifest and condense them into a FactSheet.
// Everything here is best-effort: a missing artifact leaves its section empty.

pub mod extractor;
pub mod facts;
pub mod parsers;
pub mod rules;

pub use extractor::Extractor;
pub use facts::{BuildFileFacts, ComposeFacts, DocFacts, FactSheet, PackageFacts};
