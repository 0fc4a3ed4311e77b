//! Line classification for configuration files.
//!
//! Each raw line is reduced to its effective content (comments
//! stripped), the position of any comment marker, and the indentation
//! of the raw line. The assembler in [`super::parser`] consumes these
//! classifications one line at a time.

use nom::{
    IResult, Parser,
    bytes::complete::take_while1,
    character::complete::char,
    combinator::all_consuming,
    sequence::delimited,
};

use super::parser::ParserConfig;

/// A raw line reduced to the pieces the assembler cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    /// Effective content after comment stripping, trimmed. Empty for
    /// blank and fully-commented lines.
    pub content: &'a str,
    /// Byte offset where a comment starts, if one was found. Full-line
    /// comments report column 0.
    pub comment_start: Option<usize>,
    /// Byte offset of the first non-whitespace character of the raw
    /// line; `usize::MAX` for all-whitespace lines, so a blank line can
    /// never read as a continuation.
    pub indent: usize,
}

/// Classifies one raw line under the given parser configuration.
pub fn classify_line<'a>(raw: &'a str, config: &ParserConfig) -> ClassifiedLine<'a> {
    let comment_start = find_comment_start(raw, config);
    let content = match comment_start {
        Some(start) => raw[..start].trim(),
        None => raw.trim(),
    };
    ClassifiedLine {
        content,
        comment_start,
        indent: indent_of(raw),
    }
}

/// Indentation depth of the raw line, `usize::MAX` when all-whitespace.
pub fn indent_of(raw: &str) -> usize {
    raw.find(|c: char| !c.is_whitespace()).unwrap_or(usize::MAX)
}

/// Finds where a comment begins on this line, if anywhere.
///
/// Full-line comment prefixes win outright. Inline prefixes only count
/// when at column 0 or immediately preceded by whitespace, which keeps
/// a `#` buried inside a value (`key=value#nothashtag`) intact. Ties
/// among inline prefixes go to the leftmost occurrence.
fn find_comment_start(raw: &str, config: &ParserConfig) -> Option<usize> {
    let stripped = raw.trim_start();
    if config
        .comment_prefixes
        .iter()
        .any(|prefix| !prefix.is_empty() && stripped.starts_with(prefix.as_str()))
    {
        return Some(0);
    }

    let mut earliest: Option<usize> = None;
    for prefix in &config.inline_comment_prefixes {
        if let Some(idx) = first_adjacent_occurrence(raw, prefix) {
            earliest = Some(earliest.map_or(idx, |found| found.min(idx)));
        }
    }
    earliest
}

/// First occurrence of `prefix` that sits at column 0 or right after
/// whitespace.
fn first_adjacent_occurrence(raw: &str, prefix: &str) -> Option<usize> {
    if prefix.is_empty() {
        return None;
    }
    raw.match_indices(prefix).find_map(|(idx, _)| {
        let adjacent = idx == 0
            || raw[..idx]
                .chars()
                .next_back()
                .is_some_and(char::is_whitespace);
        adjacent.then_some(idx)
    })
}

/// Parses a section header from already-classified content.
///
/// The header is `[name]` with a non-empty, `]`-free name; nothing may
/// follow the closing bracket (content arrives pre-trimmed).
pub fn section_header(content: &str) -> Option<&str> {
    let result: IResult<&str, &str> =
        all_consuming(delimited(char('['), take_while1(|c| c != ']'), char(']'))).parse(content);
    match result {
        Ok((_, name)) => Some(name),
        Err(_) => None,
    }
}

/// Characters allowed in a bare (valueless) option name.
///
/// Kept deliberately narrow: without a delimiter there is nothing else
/// to anchor the grammar, and a permissive rule would swallow arbitrary
/// garbage lines that should surface as syntax errors.
fn is_bare_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '.')
}

/// A successfully recognized option line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionLine<'a> {
    /// `name <delimiter> value` — the value may be empty.
    KeyValue { name: &'a str, value: &'a str },
    /// A valueless option written without any delimiter.
    Bare { name: &'a str },
}

/// Tries to read classified content as an option line.
///
/// The earliest occurrence of any configured delimiter splits name from
/// value; configuration order breaks ties at the same position. With no
/// delimiter present, the line is a bare option when `allow_no_value`
/// is set and the content is a single name token.
pub fn parse_option_line<'a>(content: &'a str, config: &ParserConfig) -> Option<OptionLine<'a>> {
    if let Some((pos, delimiter)) = earliest_delimiter(content, &config.delimiters) {
        let name = content[..pos].trim_end();
        if name.is_empty() {
            return None;
        }
        let value = content[pos + delimiter.len()..].trim();
        return Some(OptionLine::KeyValue { name, value });
    }

    if config.allow_no_value {
        let result: IResult<&str, &str> =
            all_consuming(take_while1(is_bare_name_char)).parse(content);
        if let Ok((_, name)) = result {
            return Some(OptionLine::Bare { name });
        }
    }

    None
}

/// Leftmost occurrence of any delimiter; first configured delimiter
/// wins when two match at the same position.
fn earliest_delimiter<'a>(content: &str, delimiters: &'a [String]) -> Option<(usize, &'a str)> {
    let mut best: Option<(usize, &'a str)> = None;
    for delimiter in delimiters {
        if delimiter.is_empty() {
            continue;
        }
        if let Some(pos) = content.find(delimiter.as_str()) {
            match best {
                Some((found, _)) if found <= pos => {}
                _ => best = Some((pos, delimiter)),
            }
        }
    }
    best
}
