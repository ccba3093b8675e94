/*!
 * Configuration handling for ContextForge
 */

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::Parser;
use clap_complete::Shell;
use regex::Regex;

use crate::emit::OutputFormat;
use crate::filter::FilterCriteria;
use crate::git;
use crate::{bail, ensure, error::Result};

/// Command-line arguments for ContextForge
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "contextforge",
    version = env!("CARGO_PKG_VERSION"),
    about = "Concatenate and filter source trees into LLM context documents",
    long_about = "Walks files, directories or Git repository URLs, filters their contents \
                  by extension, regex, size, modification time and ignore rules, and emits \
                  the selected files in plain text, Claude XML, JSON or JSONL."
)]
pub struct Args {
    /// Files, directories or Git repository URLs to process
    #[clap(required_unless_present = "generate")]
    pub paths: Vec<String>,

    /// Filter by file extensions (e.g., -e py -e md)
    #[clap(short = 'e', long = "extension")]
    pub extensions: Vec<String>,

    /// Include files and folders starting with .
    #[clap(long)]
    pub include_hidden: bool,

    /// Apply --ignore patterns only to files, not directories
    #[clap(long)]
    pub ignore_files_only: bool,

    /// Ignore .gitignore files and include all files
    #[clap(long)]
    pub ignore_gitignore: bool,

    /// Glob patterns to ignore (repeatable)
    #[clap(long = "ignore")]
    pub ignore_patterns: Vec<String>,

    /// Filter files using a regular expression pattern
    #[clap(long = "regex")]
    pub regex_pattern: Option<String>,

    /// Only include files larger than or equal to this size (in bytes)
    #[clap(long)]
    pub min_size: Option<u64>,

    /// Only include files smaller than or equal to this size (in bytes)
    #[clap(long)]
    pub max_size: Option<u64>,

    /// Only include files modified after this date (YYYY-MM-DD)
    #[clap(long)]
    pub modified_after: Option<String>,

    /// Output to a file instead of stdout
    #[clap(short = 'o', long = "output")]
    pub output_file: Option<PathBuf>,

    /// Output in Claude XML format
    #[clap(short = 'c', long, group = "format")]
    pub cxml: bool,

    /// Output in JSON array format
    #[clap(short = 'j', long, group = "format")]
    pub json: bool,

    /// Output in JSONL format (one JSON object per line)
    #[clap(short = 'l', long, group = "format")]
    pub jsonl: bool,

    /// Add line numbers to the output
    #[clap(short = 'n', long)]
    pub line_numbers: bool,

    /// Emit repository tree overview, file summaries and dataset delimiters
    #[clap(long)]
    pub dataset_mode: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Input roots: local paths or Git repository URLs, in argument order
    pub roots: Vec<String>,

    /// File selection criteria
    pub criteria: FilterCriteria,

    /// Include hidden files and directories
    pub include_hidden: bool,

    /// Apply ignore patterns only to files
    pub ignore_files_only: bool,

    /// Skip .gitignore consultation entirely
    pub ignore_gitignore: bool,

    /// User-supplied glob patterns to ignore
    pub ignore_patterns: Vec<String>,

    /// Output file path (None writes to stdout)
    pub output_file: Option<PathBuf>,

    /// Selected output format
    pub format: OutputFormat,

    /// Prefix content lines with line numbers
    pub line_numbers: bool,

    /// Dataset-mode extras for plain output
    pub dataset_mode: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    ///
    /// Compiles the regex pattern and parses the modification-time threshold,
    /// so bad filter values surface as usage errors before any output.
    pub fn from_args(args: Args) -> Result<Self> {
        let regex = match args.regex_pattern {
            Some(pattern) => Some(Regex::new(&pattern)?),
            None => None,
        };

        let modified_after = match args.modified_after {
            Some(value) => Some(parse_modified_after(&value)?),
            None => None,
        };

        let format = if args.cxml {
            OutputFormat::Cxml
        } else if args.json {
            OutputFormat::Json
        } else if args.jsonl {
            OutputFormat::Jsonl
        } else {
            OutputFormat::Plain
        };

        Ok(Self {
            roots: args.paths,
            criteria: FilterCriteria {
                extensions: args.extensions,
                regex,
                min_size: args.min_size,
                max_size: args.max_size,
                modified_after,
            },
            include_hidden: args.include_hidden,
            ignore_files_only: args.ignore_files_only,
            ignore_gitignore: args.ignore_gitignore,
            ignore_patterns: args.ignore_patterns,
            output_file: args.output_file,
            format,
            line_numbers: args.line_numbers,
            dataset_mode: args.dataset_mode,
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.roots.is_empty(), Usage, "No input paths given");

        // Git URLs are validated during cloning; local roots must exist now
        for root in &self.roots {
            if git::is_git_url(root) {
                continue;
            }
            ensure!(
                Path::new(root).exists(),
                Usage,
                "Error processing {}: No such file or directory",
                root
            );
        }

        // Check that the output file directory exists
        if let Some(output) = &self.output_file {
            if let Some(parent) = output.parent() {
                ensure!(
                    parent == Path::new("") || parent.exists(),
                    Usage,
                    "Output directory not found: {}",
                    parent.display()
                );
            }
        }

        Ok(())
    }
}

/// Parse a modification-time threshold
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DDTHH:MM:SS`;
/// a bare date means midnight local time.
fn parse_modified_after(value: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    bail!(
        Usage,
        "Invalid date '{}': expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS",
        value
    )
}
