//! confparse CLI
//!
//! A command-line tool for linting INI-style configuration files.

use clap::Parser;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode as StdExitCode;
use tracing::{Level, debug, info};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::output::{HumanOutput, JsonFileReport, JsonReport};
use cli::{Args, ExitCode};
use confparse_core::parse::{ParseResult, parse_document_with_config};

fn main() -> StdExitCode {
    let args = Args::parse();

    init_tracing(args.verbose, args.json);

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    let code = run(&args, &mut stdout, &mut stderr);
    StdExitCode::from(u8::from(code))
}

/// Initialize tracing based on verbosity level.
fn init_tracing(verbosity: u8, json_output: bool) {
    // Don't output logs when using JSON output mode
    if json_output {
        return;
    }

    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

/// Outcome of checking one file.
enum FileOutcome {
    /// The scan ran to completion (possibly with recorded problems).
    Parsed { path: String, result: ParseResult },
    /// A strict-mode check aborted the scan.
    Fatal { path: String, message: String },
}

impl FileOutcome {
    fn findings(&self) -> usize {
        match self {
            FileOutcome::Parsed { result, .. } => result.errors.len(),
            FileOutcome::Fatal { .. } => 1,
        }
    }
}

/// Run the linter with the given arguments.
fn run<O: Write, E: Write>(args: &Args, stdout: &mut O, stderr: &mut E) -> ExitCode {
    let config = args.parser_config();
    let use_colors = !args.json && io::stdout().is_terminal();

    debug!("parser configuration: {:?}", config);

    let mut outcomes = Vec::with_capacity(args.paths.len());
    for path in &args.paths {
        let display_path = path.display().to_string();
        info!("checking {}", display_path);

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) => {
                let mut output = HumanOutput::new(&mut *stderr, use_colors);
                let _ =
                    output.write_error(&format!("failed to read '{}': {}", display_path, error));
                return ExitCode::StartupFailure;
            }
        };

        match parse_document_with_config(&content, &config) {
            Ok(result) => outcomes.push(FileOutcome::Parsed {
                path: display_path,
                result,
            }),
            Err(error) => outcomes.push(FileOutcome::Fatal {
                path: display_path,
                message: error.to_string(),
            }),
        }
    }

    let total_findings: usize = outcomes.iter().map(FileOutcome::findings).sum();

    if args.json {
        let mut report = JsonReport::new();
        for outcome in outcomes {
            match outcome {
                FileOutcome::Parsed { path, result } => {
                    let mut file = JsonFileReport::new(path, &result.document, &result.errors);
                    if args.dump {
                        file = file.with_document(result.document);
                    }
                    report.add(file);
                }
                FileOutcome::Fatal { path, message } => {
                    report.add(JsonFileReport::fatal(path, message));
                }
            }
        }
        if let Err(error) = report.write(stdout) {
            let mut output = HumanOutput::new(&mut *stderr, use_colors);
            let _ = output.write_error(&format!("failed to write JSON output: {}", error));
            return ExitCode::StartupFailure;
        }
    } else {
        let mut output = HumanOutput::new(&mut *stdout, use_colors);
        for outcome in &outcomes {
            match outcome {
                FileOutcome::Parsed { path, result } => {
                    if args.summary || result.has_errors() {
                        let _ = output.write_file_header(path);
                    }
                    if args.summary {
                        let _ = output.write_file_stats(
                            result.document.len(),
                            result.document.option_count(),
                        );
                    }
                    for error in &result.errors {
                        let _ = output.write_issue(error);
                    }
                }
                FileOutcome::Fatal { path, message } => {
                    let _ = output.write_file_header(path);
                    let _ = output.write_fatal(message);
                }
            }
        }
        let _ = output.write_summary(args.paths.len(), total_findings);
    }

    if total_findings > 0 {
        ExitCode::Findings
    } else {
        ExitCode::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn write_fixture(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn run_with(args: Vec<String>) -> (ExitCode, String, String) {
        let args = Args::parse_from(args);
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let code = run(&args, &mut stdout, &mut stderr);
        (
            code,
            String::from_utf8(stdout).unwrap(),
            String::from_utf8(stderr).unwrap(),
        )
    }

    fn args_for(file: &NamedTempFile, extra: &[&str]) -> Vec<String> {
        let mut args = vec!["confparse".to_string()];
        args.extend(extra.iter().map(|s| s.to_string()));
        args.push(file.path().display().to_string());
        args
    }

    #[test]
    fn clean_file_exits_ok() {
        let file = write_fixture("[s]\na = 1\n");
        let (code, stdout, _) = run_with(args_for(&file, &[]));
        assert_eq!(code, ExitCode::Ok);
        assert!(stdout.contains("parsed cleanly"));
    }

    #[test]
    fn malformed_lines_exit_with_findings() {
        let file = write_fixture("[s]\n!!!bad!!!\na = 1\n");
        let (code, stdout, _) = run_with(args_for(&file, &[]));
        assert_eq!(code, ExitCode::Findings);
        assert!(stdout.contains("[ERROR] line 2: '!!!bad!!!'"));
        assert!(stdout.contains("found 1 problem(s)"));
    }

    #[test]
    fn strict_duplicate_is_fatal() {
        let file = write_fixture("[s]\na=1\na=2\n");
        let (code, stdout, _) = run_with(args_for(&file, &["--strict"]));
        assert_eq!(code, ExitCode::Findings);
        assert!(stdout.contains("[FATAL]"));
        assert!(stdout.contains("already declared"));
    }

    #[test]
    fn summary_prints_counts() {
        let file = write_fixture("[s]\na = 1\nb = 2\n[t]\nc = 3\n");
        let (code, stdout, _) = run_with(args_for(&file, &["--summary"]));
        assert_eq!(code, ExitCode::Ok);
        assert!(stdout.contains("2 section(s), 3 option(s)"));
    }

    #[test]
    fn missing_file_is_startup_failure() {
        let (code, _, stderr) = run_with(vec![
            "confparse".to_string(),
            "/definitely/not/a/real/file.ini".to_string(),
        ]);
        assert_eq!(code, ExitCode::StartupFailure);
        assert!(stderr.contains("failed to read"));
    }

    #[test]
    fn json_output_is_machine_readable() {
        let file = write_fixture("[s]\na = 1\n???\n");
        let (code, stdout, _) = run_with(args_for(&file, &["--json"]));
        assert_eq!(code, ExitCode::Findings);

        let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(json["files"][0]["sections"], 1);
        assert_eq!(json["files"][0]["errors"][0]["line"], 3);
    }

    #[test]
    fn json_dump_includes_document() {
        let file = write_fixture("[s]\na = 1\n");
        let (code, stdout, _) = run_with(args_for(&file, &["--json", "--dump"]));
        assert_eq!(code, ExitCode::Ok);

        let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(json["files"][0]["document"]["sections"]["s"]["a"], "1");
    }
}
