//! Decoders for documents handed over by the schema parser

pub mod json;

pub use json::{parse_document, read_document};
