//! Random configuration file generation for benchmarking and testing.
//!
//! Output is plain INI text built from a small vocabulary, so every
//! generated file parses cleanly. Generation is deterministic for a
//! given seed.

use rand::prelude::*;
use rand::rngs::StdRng;
use std::fmt::Write;

/// Configuration for generating config files.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of sections to generate.
    pub num_sections: usize,
    /// Maximum options per section (1 minimum).
    pub max_options_per_section: usize,
    /// Number of comment lines to intersperse.
    pub num_comments: usize,
    /// Seed for deterministic generation.
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_sections: 20,
            max_options_per_section: 8,
            num_comments: 10,
            seed: 42,
        }
    }
}

impl GeneratorConfig {
    /// Create a new config with the given section count and
    /// proportional comments (~50% of sections).
    pub fn new(num_sections: usize) -> Self {
        Self {
            num_sections,
            num_comments: num_sections / 2,
            ..Default::default()
        }
    }

    /// Small fixture (~5 sections).
    pub fn small() -> Self {
        Self::new(5)
    }

    /// Medium fixture (~50 sections).
    pub fn medium() -> Self {
        Self::new(50)
    }

    /// Large fixture (~500 sections).
    pub fn large() -> Self {
        Self::new(500)
    }

    /// Extra large fixture (~5k sections).
    pub fn xlarge() -> Self {
        Self::new(5_000)
    }

    /// Generate a file targeting approximately the given byte size.
    ///
    /// Note: actual size varies with key/value vocabulary.
    pub fn target_bytes(bytes: usize) -> Self {
        // A section averages ~120 bytes including its options
        Self::new(bytes.saturating_div(120).max(1))
    }

    /// Set the random seed for deterministic generation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of comment lines explicitly.
    pub fn with_comments(mut self, num_comments: usize) -> Self {
        self.num_comments = num_comments;
        self
    }

    /// Set the maximum options per section.
    pub fn with_max_options(mut self, max: usize) -> Self {
        self.max_options_per_section = max.max(1); // At least 1 option
        self
    }
}

/// Vocabulary for generating realistic sections and options.
mod vocabulary {
    pub const SECTION_STEMS: &[&str] = &[
        "server", "client", "database", "cache", "logging", "auth", "metrics", "worker",
        "scheduler", "storage",
    ];

    pub const KEYS: &[&str] = &[
        "host", "port", "timeout", "retries", "path", "level", "enabled", "pool_size",
        "endpoint", "interval",
    ];

    pub const VALUES: &[&str] = &[
        "localhost",
        "8080",
        "30",
        "/var/lib/app",
        "debug",
        "true",
        "https://example.com/api",
        "primary",
        "0.5",
        "none",
    ];

    pub const COMMENTS: &[&str] = &[
        " tuned for staging",
        " do not change without review",
        " defaults copied from production",
        " see runbook for details",
    ];
}

/// Probability of a multi-line (continued) value (percentage).
const CONTINUATION_PROBABILITY: u32 = 15;

/// Probability of a valueless flag option (percentage).
const BARE_OPTION_PROBABILITY: u32 = 10;

/// Generates a configuration file as a string.
pub fn generate(config: &GeneratorConfig) -> String {
    use vocabulary::*;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut out = String::new();

    out.push_str("# Auto-generated configuration for benchmarking\n\n");

    let mut comments_added = 0;

    for section_idx in 0..config.num_sections {
        // Maybe add a comment before the section
        if comments_added < config.num_comments && rng.random_ratio(30, 100) {
            let comment = COMMENTS[rng.random_range(0..COMMENTS.len())];
            let _ = writeln!(out, "#{}", comment);
            comments_added += 1;
        }

        let stem = SECTION_STEMS[rng.random_range(0..SECTION_STEMS.len())];
        let _ = writeln!(out, "[{}-{}]", stem, section_idx);

        let num_options = rng.random_range(1..=config.max_options_per_section);
        for option_idx in 0..num_options {
            let key = KEYS[rng.random_range(0..KEYS.len())];

            if rng.random_ratio(BARE_OPTION_PROBABILITY, 100) {
                let _ = writeln!(out, "{}_{}", key, option_idx);
                continue;
            }

            let value = VALUES[rng.random_range(0..VALUES.len())];
            let _ = writeln!(out, "{}_{} = {}", key, option_idx, value);

            if rng.random_ratio(CONTINUATION_PROBABILITY, 100) {
                let extra = VALUES[rng.random_range(0..VALUES.len())];
                let _ = writeln!(out, "    {}", extra);
            }
        }

        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_document;

    #[test]
    fn round_trip_small() {
        let content = generate(&GeneratorConfig::small());
        let parsed = parse_document(&content).unwrap();
        assert!(
            parsed.is_ok(),
            "generated content should parse: {:?}",
            parsed.errors
        );
    }

    #[test]
    fn round_trip_large() {
        let content = generate(&GeneratorConfig::large());
        let parsed = parse_document(&content).unwrap();
        assert!(parsed.is_ok());
        assert_eq!(parsed.document.len(), 500);
    }

    #[test]
    fn deterministic_generation() {
        let config = GeneratorConfig::medium();
        let content1 = generate(&config);
        let content2 = generate(&config);
        assert_eq!(content1, content2, "same seed should produce same output");
    }

    #[test]
    fn different_seeds_differ() {
        let content1 = generate(&GeneratorConfig::medium().with_seed(1));
        let content2 = generate(&GeneratorConfig::medium().with_seed(2));
        assert_ne!(content1, content2);
    }

    #[test]
    fn target_bytes_approximate() {
        let config = GeneratorConfig::target_bytes(100_000);
        let content = generate(&config);
        // Should be within 3x of target
        assert!(
            content.len() > 30_000 && content.len() < 300_000,
            "got {} bytes",
            content.len()
        );
    }

    #[test]
    fn zero_sections_produces_header_only() {
        let content = generate(&GeneratorConfig::new(0));
        let parsed = parse_document(&content).unwrap();
        assert!(parsed.is_ok());
        assert!(parsed.document.is_empty());
    }

    #[test]
    fn with_max_options_minimum() {
        let config = GeneratorConfig::default().with_max_options(0);
        assert_eq!(config.max_options_per_section, 1); // Should be at least 1
    }

    #[test]
    fn section_names_are_unique() {
        let content = generate(&GeneratorConfig::medium());
        let parsed = parse_document(&content).unwrap();
        // Indexed suffixes keep headers distinct, so nothing merges.
        assert_eq!(parsed.document.len(), 50);
    }
}
