//! Parsed document model for configuration files.
//!
//! This module defines the structured result of a parse: an ordered
//! collection of sections, each holding ordered options with raw
//! multi-line values.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt::{self, Display};

/// Identifies a section within a document.
///
/// The `Placeholder` variant is the recovery target for content that
/// appears before any `[...]` header. It is a distinct variant rather
/// than a magic string, so it can never collide with a section a user
/// actually named.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionName {
    /// A section introduced by a `[name]` header.
    Named(String),
    /// The synthesized section holding headerless content.
    Placeholder,
}

impl SectionName {
    /// Creates a named section identifier.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Returns the header name, or `None` for the placeholder.
    pub fn as_named(&self) -> Option<&str> {
        match self {
            SectionName::Named(name) => Some(name),
            SectionName::Placeholder => None,
        }
    }

    /// Returns true if this is the headerless-recovery placeholder.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, SectionName::Placeholder)
    }
}

impl Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionName::Named(name) => f.write_str(name),
            SectionName::Placeholder => f.write_str("<placeholder>"),
        }
    }
}

impl Serialize for SectionName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The value of a single option.
///
/// Values are stored as the raw physical lines that composed them, one
/// entry per line, each trimmed. Interior blank lines of a multi-line
/// value are kept as empty strings. Joining into a logical value happens
/// through [`OptionValue::join`], never during the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// The option was written without a delimiter (a valueless flag).
    NoValue,
    /// The physical lines of a (possibly multi-line) value.
    Lines(Vec<String>),
}

impl OptionValue {
    /// Returns the raw value lines, or `None` for a valueless option.
    pub fn lines(&self) -> Option<&[String]> {
        match self {
            OptionValue::NoValue => None,
            OptionValue::Lines(lines) => Some(lines),
        }
    }

    /// Joins the value lines into one logical value.
    ///
    /// Lines are joined with `\n`; a valueless option yields `None`.
    pub fn join(&self) -> Option<String> {
        self.lines().map(|lines| lines.join("\n"))
    }

    /// Returns true if the option carries a value (possibly empty).
    pub fn has_value(&self) -> bool {
        matches!(self, OptionValue::Lines(_))
    }

    /// Drops trailing blank lines accumulated during the scan.
    ///
    /// A blank line is only part of a value when a deeper-indented
    /// continuation follows it; trailing blanks are scan noise.
    pub(crate) fn finalize(&mut self) {
        if let OptionValue::Lines(lines) = self {
            while lines.last().is_some_and(|line| line.is_empty()) {
                lines.pop();
            }
        }
    }
}

impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Serialized as the joined logical value; valueless options are null.
        self.join().serialize(serializer)
    }
}

/// A named group of options with insertion order preserved.
///
/// Option names are normalized by the parser's configured transform
/// before storage, so lookups must use the normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Section {
    options: IndexMap<String, OptionValue>,
}

impl Section {
    /// Creates an empty section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up an option by its stored (normalized) name.
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    /// Returns the joined logical value of an option.
    ///
    /// `None` when the option is absent or valueless.
    pub fn value(&self, name: &str) -> Option<String> {
        self.get(name).and_then(OptionValue::join)
    }

    /// Returns true if the option exists (with or without a value).
    pub fn has_option(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    /// Iterates over options in insertion order.
    pub fn options(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.options.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of options in the section.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns true if the section has no options.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut OptionValue> {
        self.options.get_mut(name)
    }

    pub(crate) fn insert(&mut self, name: String, value: OptionValue) {
        self.options.insert(name, value);
    }

    pub(crate) fn finalize(&mut self) {
        for value in self.options.values_mut() {
            value.finalize();
        }
    }
}

/// The complete parse result for one configuration stream.
///
/// Owns the always-present defaults section plus every named (or
/// placeholder) section in file order. Duplicate headers in the input
/// merge into one stored section, so names are unique here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Document {
    defaults: Section,
    sections: IndexMap<SectionName, Section>,
}

impl Document {
    /// Creates an empty document with only the defaults section.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default section, always present, never headerless-recovery.
    pub fn defaults(&self) -> &Section {
        &self.defaults
    }

    /// Looks up a named section (case-sensitive).
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(&SectionName::Named(name.to_string()))
    }

    /// The headerless-recovery section, if any content landed there.
    pub fn placeholder(&self) -> Option<&Section> {
        self.sections.get(&SectionName::Placeholder)
    }

    /// Returns true if a section with this header name exists.
    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Iterates over sections in file order (defaults excluded).
    pub fn sections(&self) -> impl Iterator<Item = (&SectionName, &Section)> {
        self.sections.iter()
    }

    /// Number of sections, excluding the defaults section.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns true if no section headers (or recovery) were seen.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total option count across defaults and all sections.
    pub fn option_count(&self) -> usize {
        self.defaults.len() + self.sections.values().map(Section::len).sum::<usize>()
    }

    pub(crate) fn defaults_mut(&mut self) -> &mut Section {
        &mut self.defaults
    }

    /// Returns the section for `name`, creating it if absent (merge on
    /// duplicate headers).
    pub(crate) fn section_entry(&mut self, name: &SectionName) -> &mut Section {
        self.sections.entry(name.clone()).or_default()
    }

    pub(crate) fn finalize(&mut self) {
        self.defaults.finalize();
        for section in self.sections.values_mut() {
            section.finalize();
        }
    }
}
