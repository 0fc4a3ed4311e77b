//! Output formatting for the CLI.
//!
//! This module provides human-readable and JSON output formatters for
//! parse reports.

use colored::Colorize;
use confparse_core::parse::{Document, SyntaxError};
use serde::Serialize;
use std::io::Write;

/// JSON report covering every checked file.
#[derive(Debug, Default, Serialize)]
pub struct JsonReport {
    /// Per-file results, in command-line order.
    pub files: Vec<JsonFileReport>,
}

impl JsonReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file result to the report.
    pub fn add(&mut self, file: JsonFileReport) {
        self.files.push(file);
    }

    /// Writes the JSON report to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }
}

/// Parse results for one file in JSON form.
#[derive(Debug, Serialize)]
pub struct JsonFileReport {
    /// The file path as given on the command line.
    pub path: String,
    /// Malformed lines, in file order.
    pub errors: Vec<JsonIssue>,
    /// Number of sections parsed (defaults excluded).
    pub sections: usize,
    /// Total number of options parsed.
    pub options: usize,
    /// A strict-mode failure that aborted the scan, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fatal: Option<String>,
    /// The parsed document, present with `--dump`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,
}

impl JsonFileReport {
    /// Creates a report for a parsed file.
    pub fn new(path: impl Into<String>, document: &Document, errors: &[SyntaxError]) -> Self {
        Self {
            path: path.into(),
            errors: errors.iter().map(JsonIssue::from).collect(),
            sections: document.len(),
            options: document.option_count(),
            fatal: None,
            document: None,
        }
    }

    /// Creates a report for a file that failed a strict-mode check.
    pub fn fatal(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            errors: Vec::new(),
            sections: 0,
            options: 0,
            fatal: Some(message.into()),
            document: None,
        }
    }

    /// Attaches the parsed document for `--dump`.
    pub fn with_document(mut self, document: Document) -> Self {
        self.document = Some(document);
        self
    }
}

/// A single malformed line in JSON form.
#[derive(Debug, Serialize)]
pub struct JsonIssue {
    /// Line number where the problem occurred (1-based).
    pub line: usize,
    /// The raw text of the offending line.
    pub text: String,
}

impl From<&SyntaxError> for JsonIssue {
    fn from(error: &SyntaxError) -> Self {
        Self {
            line: error.line,
            text: error.text.clone(),
        }
    }
}

/// Output formatter for human-readable console output.
pub struct HumanOutput<W: Write> {
    writer: W,
    use_colors: bool,
}

impl<W: Write> HumanOutput<W> {
    /// Creates a new human output formatter.
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self { writer, use_colors }
    }

    /// Writes a header for a file.
    pub fn write_file_header(&mut self, path: &str) -> std::io::Result<()> {
        let header = format!("==> {}", path);
        if self.use_colors {
            writeln!(self.writer, "\n{}", header.cyan().bold())
        } else {
            writeln!(self.writer, "\n{}", header)
        }
    }

    /// Writes a single malformed line.
    pub fn write_issue(&mut self, error: &SyntaxError) -> std::io::Result<()> {
        if self.use_colors {
            writeln!(self.writer, "  {} {}", "[ERROR]".red().bold(), error)
        } else {
            writeln!(self.writer, "  [ERROR] {}", error)
        }
    }

    /// Writes per-file section and option counts.
    pub fn write_file_stats(&mut self, sections: usize, options: usize) -> std::io::Result<()> {
        writeln!(
            self.writer,
            "  {} section(s), {} option(s)",
            sections, options
        )
    }

    /// Writes a fatal strict-mode failure.
    pub fn write_fatal(&mut self, message: &str) -> std::io::Result<()> {
        if self.use_colors {
            writeln!(self.writer, "  {} {}", "[FATAL]".red().bold(), message)
        } else {
            writeln!(self.writer, "  [FATAL] {}", message)
        }
    }

    /// Writes a startup error (unreadable file and the like).
    pub fn write_error(&mut self, message: &str) -> std::io::Result<()> {
        if self.use_colors {
            writeln!(self.writer, "{} {}", "error:".red().bold(), message)
        } else {
            writeln!(self.writer, "error: {}", message)
        }
    }

    /// Writes the closing summary.
    pub fn write_summary(&mut self, total_files: usize, total_errors: usize) -> std::io::Result<()> {
        writeln!(self.writer)?;

        if total_errors == 0 {
            let message = format!("✓ {} file(s) parsed cleanly", total_files);
            if self.use_colors {
                writeln!(self.writer, "{}", message.green().bold())
            } else {
                writeln!(self.writer, "{}", message)
            }
        } else {
            let message = format!(
                "✗ found {} problem(s) across {} file(s)",
                total_errors, total_files
            );
            if self.use_colors {
                writeln!(self.writer, "{}", message.red().bold())
            } else {
                writeln!(self.writer, "{}", message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confparse_core::parse::parse_document;

    fn render<F: FnOnce(&mut HumanOutput<&mut Vec<u8>>)>(f: F) -> String {
        let mut buffer = Vec::new();
        let mut output = HumanOutput::new(&mut buffer, false);
        f(&mut output);
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn issue_formatting() {
        let rendered = render(|output| {
            output
                .write_issue(&SyntaxError::new(4, "!!!bad!!!"))
                .unwrap();
        });
        assert_eq!(rendered, "  [ERROR] line 4: '!!!bad!!!'\n");
    }

    #[test]
    fn file_header_formatting() {
        let rendered = render(|output| {
            output.write_file_header("app.ini").unwrap();
        });
        assert_eq!(rendered, "\n==> app.ini\n");
    }

    #[test]
    fn clean_summary() {
        let rendered = render(|output| {
            output.write_summary(2, 0).unwrap();
        });
        assert!(rendered.contains("✓ 2 file(s) parsed cleanly"));
    }

    #[test]
    fn failing_summary() {
        let rendered = render(|output| {
            output.write_summary(1, 3).unwrap();
        });
        assert!(rendered.contains("✗ found 3 problem(s) across 1 file(s)"));
    }

    #[test]
    fn json_report_shape() {
        let result = parse_document("[s]\na=1\n???\n").unwrap();
        let report_file = JsonFileReport::new("app.ini", &result.document, &result.errors);

        let mut report = JsonReport::new();
        report.add(report_file);

        let mut buffer = Vec::new();
        report.write(&mut buffer).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(json["files"][0]["path"], "app.ini");
        assert_eq!(json["files"][0]["sections"], 1);
        assert_eq!(json["files"][0]["options"], 1);
        assert_eq!(json["files"][0]["errors"][0]["line"], 3);
        assert_eq!(json["files"][0]["errors"][0]["text"], "???");
        assert!(json["files"][0].get("fatal").is_none());
        assert!(json["files"][0].get("document").is_none());
    }

    #[test]
    fn json_report_with_dump() {
        let result = parse_document("[s]\na=1\n").unwrap();
        let file = JsonFileReport::new("app.ini", &result.document, &result.errors)
            .with_document(result.document.clone());

        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["document"]["sections"]["s"]["a"], "1");
    }

    #[test]
    fn json_report_fatal() {
        let file = JsonFileReport::fatal("app.ini", "line 3: section 's' was already declared");
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["fatal"], "line 3: section 's' was already declared");
    }
}
