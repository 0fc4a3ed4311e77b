//! Parser module for INI-style configuration files.
//!
//! This module turns a stream of text lines into an ordered
//! [`Document`] while tolerating the kinds of damage hand-maintained
//! config files accumulate: duplicate keys, re-opened sections,
//! content before the first header, and lines that parse as nothing
//! at all.
//!
//! # Example
//!
//! ```rust
//! use confparse_core::parse::parse_document;
//!
//! let input = "\
//! [server]
//! host = localhost
//! port = 8080
//! ";
//!
//! let result = parse_document(input).unwrap();
//! assert!(result.is_ok());
//! let server = result.document.section("server").unwrap();
//! assert_eq!(server.value("host").as_deref(), Some("localhost"));
//! ```

mod classify;
mod document;
mod error;
mod parser;

// Re-export public types
pub use document::{Document, OptionValue, Section, SectionName};
pub use error::{ParseError, ParseResult, SyntaxError};
pub use parser::{
    NameTransform, ParserConfig, parse_document, parse_document_strict, parse_document_with_config,
};

// Re-export classifier utilities that may be useful for custom parsing
pub use classify::{ClassifiedLine, OptionLine, classify_line, parse_option_line, section_header};
