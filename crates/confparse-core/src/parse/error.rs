//! Error types for configuration file parsing.
//!
//! Malformed lines are collected while the scan keeps going and only
//! surface as one aggregate error after the whole stream is consumed.
//! Duplicate sections and options are fatal in strict mode only.

use super::document::Document;
use serde::Serialize;
use std::fmt::{self, Display};
use thiserror::Error;

/// One line that could not be interpreted.
///
/// Not a header, not an option, not blank, and with no open value to
/// continue into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxError {
    /// The line number where the problem occurred (1-based).
    pub line: usize,
    /// The raw text of the offending line.
    pub text: String,
}

impl SyntaxError {
    /// Creates a syntax error for a raw line.
    pub fn new(line: usize, text: impl Into<String>) -> Self {
        Self {
            line,
            text: text.into(),
        }
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: '{}'", self.line, self.text)
    }
}

fn list_syntax_errors(errors: &[SyntaxError]) -> String {
    errors
        .iter()
        .map(SyntaxError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// An error that occurred during parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The aggregate of every malformed line in the stream, in file
    /// order. Raised only after the full input has been consumed.
    #[error("source contains {} parsing error(s): {}", .errors.len(), list_syntax_errors(.errors))]
    Syntax {
        /// The malformed lines, in file order.
        errors: Vec<SyntaxError>,
    },

    /// A section header re-declared a section (strict mode only).
    #[error("line {line}: section '{name}' was already declared")]
    DuplicateSection {
        /// The section header name.
        name: String,
        /// The line number of the re-declaration (1-based).
        line: usize,
    },

    /// An option re-declared within one section (strict mode only).
    #[error("line {line}: option '{option}' in section '{section}' was already declared")]
    DuplicateOption {
        /// The section the option belongs to.
        section: String,
        /// The normalized option name.
        option: String,
        /// The line number of the re-declaration (1-based).
        line: usize,
    },
}

impl ParseError {
    /// Creates the end-of-stream aggregate from recorded lines.
    pub fn syntax(errors: Vec<SyntaxError>) -> Self {
        Self::Syntax { errors }
    }

    /// Creates a strict-mode duplicate section error.
    pub fn duplicate_section(name: impl Into<String>, line: usize) -> Self {
        Self::DuplicateSection {
            name: name.into(),
            line,
        }
    }

    /// Creates a strict-mode duplicate option error.
    pub fn duplicate_option(
        section: impl Into<String>,
        option: impl Into<String>,
        line: usize,
    ) -> Self {
        Self::DuplicateOption {
            section: section.into(),
            option: option.into(),
            line,
        }
    }

    /// The malformed lines carried by an aggregate error.
    pub fn syntax_errors(&self) -> &[SyntaxError] {
        match self {
            ParseError::Syntax { errors } => errors,
            _ => &[],
        }
    }
}

/// The result of parsing one configuration stream.
///
/// The document is always fully populated with everything that could be
/// parsed; the error list is advisory. Callers that want the aggregate
/// failure use [`ParseResult::into_result`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    /// The parsed document (complete even when there were errors).
    pub document: Document,
    /// Malformed lines encountered during the scan, in file order.
    pub errors: Vec<SyntaxError>,
}

impl ParseResult {
    /// Creates a clean parse result.
    pub fn ok(document: Document) -> Self {
        Self {
            document,
            errors: Vec::new(),
        }
    }

    /// Creates a parse result carrying recorded syntax errors.
    pub fn with_errors(document: Document, errors: Vec<SyntaxError>) -> Self {
        Self { document, errors }
    }

    /// Returns true if the scan recorded no syntax errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns true if any line was malformed.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Converts into a hard result, folding recorded lines into one
    /// aggregate [`ParseError::Syntax`].
    pub fn into_result(self) -> Result<Document, ParseError> {
        if self.errors.is_empty() {
            Ok(self.document)
        } else {
            Err(ParseError::syntax(self.errors))
        }
    }
}
