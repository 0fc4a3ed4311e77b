//! Document assembler for configuration files.
//!
//! A sequential state machine consumes classified lines in order and
//! builds the final [`Document`], handling section and option headers,
//! multi-line continuation, duplicate resolution, and headerless-input
//! recovery. Malformed lines are recorded and surfaced only once the
//! whole stream has been consumed.

use super::classify::{OptionLine, classify_line, parse_option_line, section_header};
use super::document::{Document, OptionValue, Section, SectionName};
use super::error::{ParseError, ParseResult, SyntaxError};
use log::{debug, trace};
use std::collections::HashSet;

/// Normalization applied to option names before storage and
/// uniqueness comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameTransform {
    /// Case-fold option names (the conventional INI behavior).
    Lowercase,
    /// Store option names exactly as written.
    Preserve,
    /// Apply a caller-provided transform.
    Custom(fn(&str) -> String),
}

impl NameTransform {
    /// Applies the transform to an option name.
    pub fn apply(&self, name: &str) -> String {
        match self {
            NameTransform::Lowercase => name.to_lowercase(),
            NameTransform::Preserve => name.to_string(),
            NameTransform::Custom(transform) => transform(name),
        }
    }
}

impl Default for NameTransform {
    fn default() -> Self {
        Self::Lowercase
    }
}

/// Configuration options for the parser.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Prefixes that mark a full-line comment when they start the
    /// whitespace-stripped line.
    pub comment_prefixes: Vec<String>,
    /// Prefixes that mark an inline comment when whitespace-adjacent.
    pub inline_comment_prefixes: Vec<String>,
    /// Accepted name/value delimiters; earliest occurrence wins,
    /// configuration order breaks same-position ties.
    pub delimiters: Vec<String>,
    /// If true, an option may be written without any delimiter.
    pub allow_no_value: bool,
    /// If true, blank lines extend an open multi-line value; if false,
    /// a blank line terminates continuation.
    pub allow_blank_in_values: bool,
    /// If true, duplicate sections and options are fatal errors.
    /// If false, duplicates merge (sections) or lose silently to the
    /// first occurrence (options).
    pub strict: bool,
    /// The reserved name of the implicit default section.
    pub default_section: String,
    /// Option-name normalization.
    pub transform: NameTransform,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            comment_prefixes: vec!["#".to_string(), ";".to_string()],
            inline_comment_prefixes: vec!["#".to_string(), ";".to_string()],
            delimiters: vec!["=".to_string(), ":".to_string()],
            allow_no_value: true,
            allow_blank_in_values: true,
            strict: false,
            default_section: "DEFAULT".to_string(),
            transform: NameTransform::Lowercase,
        }
    }
}

impl ParserConfig {
    /// Creates a parser config with default (permissive) settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a strict config: duplicate sections and options are fatal.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Default::default()
        }
    }

    /// Creates a permissive config (first-wins, merge, recover).
    pub fn lenient() -> Self {
        Self::default()
    }

    /// Sets the full-line comment prefixes.
    pub fn with_comment_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.comment_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the inline comment prefixes.
    pub fn with_inline_comment_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inline_comment_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the accepted name/value delimiters.
    pub fn with_delimiters<I, S>(mut self, delimiters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.delimiters = delimiters.into_iter().map(Into::into).collect();
        self
    }

    /// Sets whether valueless options are accepted.
    pub fn with_allow_no_value(mut self, value: bool) -> Self {
        self.allow_no_value = value;
        self
    }

    /// Sets whether blank lines extend open multi-line values.
    pub fn with_allow_blank_in_values(mut self, value: bool) -> Self {
        self.allow_blank_in_values = value;
        self
    }

    /// Sets the reserved default-section name.
    pub fn with_default_section(mut self, name: impl Into<String>) -> Self {
        self.default_section = name.into();
        self
    }

    /// Sets the option-name transform.
    pub fn with_transform(mut self, transform: NameTransform) -> Self {
        self.transform = transform;
        self
    }
}

/// Where options currently land: the defaults section or a stored one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Target {
    Defaults,
    Section(SectionName),
}

fn target_section<'a>(document: &'a mut Document, target: &Target) -> &'a mut Section {
    match target {
        Target::Defaults => document.defaults_mut(),
        Target::Section(name) => document.section_entry(name),
    }
}

fn target_label(target: &Target, config: &ParserConfig) -> String {
    match target {
        Target::Defaults => config.default_section.clone(),
        Target::Section(name) => name.to_string(),
    }
}

/// Mutable cross-line state carried through the scan.
#[derive(Debug, Default)]
struct ReadState {
    /// Section receiving options, once one is open.
    target: Option<Target>,
    /// Normalized name of the option a continuation would extend.
    option: Option<String>,
    /// Indent baseline set by the most recent header or option line;
    /// `usize::MAX` forbids any further continuation.
    indent: usize,
    /// Named sections declared so far (strict duplicate detection).
    seen_sections: HashSet<String>,
    /// `(section, option)` pairs declared so far.
    seen_options: HashSet<(Target, String)>,
    /// Malformed lines, in file order.
    errors: Vec<SyntaxError>,
}

/// Parses a configuration stream with the given configuration.
///
/// Returns `Err` only for strict-mode duplicate sections or options;
/// malformed lines never abort the scan and are reported through the
/// returned [`ParseResult`].
pub fn parse_document_with_config(
    input: &str,
    config: &ParserConfig,
) -> Result<ParseResult, ParseError> {
    debug!(
        "parsing configuration ({} bytes, strict={})",
        input.len(),
        config.strict
    );
    let mut document = Document::new();
    let mut state = ReadState::default();

    for (idx, raw) in input.lines().enumerate() {
        let lineno = idx + 1;
        let line = classify_line(raw, config);

        // Blank or fully-commented line.
        if line.content.is_empty() {
            if config.allow_blank_in_values {
                // A blank line joins an open multi-line value, but a line
                // that is blank because it was a comment never does.
                if line.comment_start.is_none()
                    && let (Some(target), Some(option)) = (&state.target, &state.option)
                    && let Some(OptionValue::Lines(lines)) =
                        target_section(&mut document, target).get_mut(option)
                {
                    lines.push(String::new());
                }
            } else {
                // Blank line marks the end of a value.
                state.indent = usize::MAX;
            }
            continue;
        }

        // Continuation line: strictly deeper than the baseline set by
        // the open option's header line.
        let continuation = match (&state.target, &state.option) {
            (Some(target), Some(option)) if line.indent > state.indent => {
                Some((target.clone(), option.clone()))
            }
            _ => None,
        };
        if let Some((target, option)) = continuation {
            trace!("line {lineno}: continuation of '{option}'");
            match target_section(&mut document, &target).get_mut(&option) {
                Some(OptionValue::Lines(lines)) => lines.push(line.content.to_string()),
                // A valueless option has no line sequence to extend.
                _ => state.errors.push(SyntaxError::new(lineno, raw)),
            }
            continue;
        }

        state.indent = line.indent;

        // Section header?
        if let Some(name) = section_header(line.content) {
            if name == config.default_section {
                trace!("line {lineno}: default section header");
                state.target = Some(Target::Defaults);
            } else {
                if state.seen_sections.contains(name) {
                    if config.strict {
                        return Err(ParseError::duplicate_section(name, lineno));
                    }
                    trace!("line {lineno}: re-opening section '{name}'");
                }
                let section_name = SectionName::named(name);
                document.section_entry(&section_name);
                state.seen_sections.insert(name.to_string());
                state.target = Some(Target::Section(section_name));
            }
            // Nothing may continue a header line.
            state.option = None;
            continue;
        }

        // Content before any header: recover into the placeholder
        // section and handle this very line as one of its options.
        let target = match &state.target {
            Some(target) => target.clone(),
            None => {
                debug!("line {lineno}: content before any section header, recovering");
                document.section_entry(&SectionName::Placeholder);
                let target = Target::Section(SectionName::Placeholder);
                state.target = Some(target.clone());
                state.option = None;
                target
            }
        };

        // Option line?
        match parse_option_line(line.content, config) {
            Some(option_line) => {
                let (name, value) = match option_line {
                    OptionLine::KeyValue { name, value } => (name, Some(value)),
                    OptionLine::Bare { name } => (name, None),
                };
                let key = config.transform.apply(name);
                let seen_key = (target.clone(), key.clone());
                if state.seen_options.contains(&seen_key) {
                    if config.strict {
                        return Err(ParseError::duplicate_option(
                            target_label(&target, config),
                            key,
                            lineno,
                        ));
                    }
                    trace!("line {lineno}: duplicate option '{key}', keeping first value");
                } else {
                    state.seen_options.insert(seen_key);
                }
                let section = target_section(&mut document, &target);
                // First occurrence wins; a bare re-statement never
                // clobbers an existing value either.
                if !section.has_option(&key) {
                    let stored = match value {
                        Some(value) => OptionValue::Lines(vec![value.to_string()]),
                        None => OptionValue::NoValue,
                    };
                    section.insert(key.clone(), stored);
                }
                state.option = Some(key);
            }
            None => {
                debug!("line {lineno}: unparseable line");
                state.errors.push(SyntaxError::new(lineno, raw));
            }
        }
    }

    document.finalize();
    debug!(
        "parse complete: {} section(s), {} syntax error(s)",
        document.len(),
        state.errors.len()
    );
    if state.errors.is_empty() {
        Ok(ParseResult::ok(document))
    } else {
        Ok(ParseResult::with_errors(document, state.errors))
    }
}

/// Parses a configuration stream with default (permissive) settings.
pub fn parse_document(input: &str) -> Result<ParseResult, ParseError> {
    parse_document_with_config(input, &ParserConfig::default())
}

/// Parses in strict mode: duplicate sections or options are fatal.
pub fn parse_document_strict(input: &str) -> Result<ParseResult, ParseError> {
    parse_document_with_config(input, &ParserConfig::strict())
}
