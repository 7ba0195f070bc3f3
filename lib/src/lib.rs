pub mod error;
pub mod normalizer;
pub mod parser;
pub mod table;
pub mod tagger;
pub mod token;
pub mod tokenizer;

pub use {
    error::Error,
    normalizer::case::CasePolicy,
    table::{Entry, Resolution, TableBuilder, TagTable},
    tagger::{TaggedWord, Tagger, WordTag},
};
