//! confparse Core
//!
//! A library for parsing INI-style configuration files permissively,
//! built to survive the damage hand-maintained config files accumulate.
//!
//! # Features
//!
//! - **Permissive by default**: duplicate options resolve first-wins,
//!   duplicate section headers merge, and content before any header is
//!   recovered into a placeholder section instead of aborting
//! - **Strict Mode**: duplicate sections and options fail fast
//! - **Aggregated Errors**: malformed lines never stop the scan; they
//!   are reported together once the whole stream has been consumed
//! - **Order Preserving**: sections and options keep file order, and
//!   multi-line values keep their raw physical lines
//!
//! # Quick Start
//!
//! ```rust
//! use confparse_core::parse::parse_document;
//!
//! let input = "\
//! # deployment config
//! [server]
//! host = localhost
//! banner = line one
//!     line two
//! ";
//!
//! let result = parse_document(input).unwrap();
//!
//! if result.is_ok() {
//!     let server = result.document.section("server").unwrap();
//!     assert_eq!(server.value("banner").as_deref(), Some("line one\nline two"));
//! } else {
//!     for error in &result.errors {
//!         eprintln!("syntax problem: {}", error);
//!     }
//! }
//! ```
//!
//! # Modules
//!
//! - [`parse`]: classifier, assembler, document model, and errors
//! - [`generate`]: deterministic fixture generation (feature `generate`)

pub mod parse;

#[cfg(feature = "generate")]
pub mod generate;

// Re-export commonly used types at the crate root
pub use parse::{
    Document, OptionValue, ParseError, ParseResult, ParserConfig, Section, SectionName,
    parse_document,
};
