/*!
 * Output formatting
 *
 * Serializes (path, content) documents into one of the supported formats,
 * streaming each document straight to the sink. The only per-run state is
 * the XML document index and the JSON array separator flag, both owned by
 * the Emitter instance.
 */

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

/// Supported output formats, selected mutually exclusively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Path, separator and content blocks
    #[default]
    Plain,
    /// Claude-style XML with indexed document elements
    Cxml,
    /// One JSON array over the whole run
    Json,
    /// One JSON object per line
    Jsonl,
}

/// The de-facto wire shape for JSON and JSONL output
#[derive(Serialize)]
struct Document<'a> {
    path: &'a str,
    content: &'a str,
}

/// Streams documents to a sink in the configured format
pub struct Emitter {
    format: OutputFormat,
    line_numbers: bool,
    dataset_mode: bool,
    /// Next XML document index; shared across all roots, never reset
    index: usize,
    /// Whether the next JSON array element is the first (no leading comma)
    first_entry: bool,
}

impl Emitter {
    /// Create an emitter; framing state lives for exactly one run
    pub fn new(format: OutputFormat, line_numbers: bool, dataset_mode: bool) -> Self {
        Self {
            format,
            line_numbers,
            dataset_mode,
            index: 1,
            first_entry: true,
        }
    }

    /// Write the opening container token, if the format has one
    pub fn begin<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        match self.format {
            OutputFormat::Cxml => writeln!(out, "<documents>"),
            OutputFormat::Json => writeln!(out, "["),
            _ => Ok(()),
        }
    }

    /// Emit one document
    pub fn emit<W: Write>(&mut self, out: &mut W, path: &str, content: &str) -> Result<()> {
        let numbered;
        let content = if self.line_numbers {
            numbered = number_lines(content);
            numbered.as_str()
        } else {
            content
        };

        match self.format {
            OutputFormat::Plain => self.emit_plain(out, path, content)?,
            OutputFormat::Cxml => {
                writeln!(out, "<document index=\"{}\">", self.index)?;
                writeln!(out, "<source>{}</source>", path)?;
                writeln!(out, "<document_content>")?;
                writeln!(out, "{}", content)?;
                writeln!(out, "</document_content>")?;
                writeln!(out, "</document>")?;
                self.index += 1;
            }
            OutputFormat::Json => {
                if !self.first_entry {
                    writeln!(out, ",")?;
                }
                write!(out, "{}", serde_json::to_string(&Document { path, content })?)?;
                self.first_entry = false;
            }
            OutputFormat::Jsonl => {
                writeln!(out, "{}", serde_json::to_string(&Document { path, content })?)?;
            }
        }

        Ok(())
    }

    /// Write the closing container token, if the format has one
    pub fn finish<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        match self.format {
            OutputFormat::Cxml => writeln!(out, "</documents>"),
            OutputFormat::Json => write!(out, "\n]\n"),
            _ => Ok(()),
        }
    }

    fn emit_plain<W: Write>(&self, out: &mut W, path: &str, content: &str) -> io::Result<()> {
        if self.dataset_mode {
            write!(
                out,
                "\n===== FILE BEGIN: {} =====\n{}\n===== FILE END: {} =====\n\n",
                path, content, path
            )
        } else {
            write!(out, "{}\n---\n{}\n\n---\n\n", path, content)
        }
    }
}

/// Prefix each line with its 1-based index
///
/// The index is right-aligned to the decimal width of the total line count
/// and followed by two spaces. Identical across all output formats.
pub fn number_lines(content: &str) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let width = lines.len().to_string().len();
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>width$}  {}", i + 1, line, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the dataset-mode repository tree overview (depth 1)
///
/// Large subdirectories are summarized instead of expanded.
pub fn write_tree_overview<W: Write>(out: &mut W, base: &Path) -> io::Result<()> {
    writeln!(out, "\n[DATASET-MODE] Repository Tree Overview")?;
    writeln!(out, "----------------------------------------")?;
    write_tree_level(out, base, base, 0)?;
    writeln!(out)
}

const TREE_MAX_DEPTH: usize = 1;
const TREE_EXPAND_THRESHOLD: usize = 50;

fn write_tree_level<W: Write>(
    out: &mut W,
    base: &Path,
    current: &Path,
    depth: usize,
) -> io::Result<()> {
    if depth > TREE_MAX_DEPTH {
        return Ok(());
    }

    let entries = match fs::read_dir(current) {
        Ok(entries) => entries,
        Err(_) => return Ok(()),
    };

    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        } else {
            files.push(path);
        }
    }
    dirs.sort();
    files.sort();

    let indent = "  ".repeat(depth);
    for path in &dirs {
        let rel = path.strip_prefix(base).unwrap_or(path);
        writeln!(out, "{}📂 {}/", indent, rel.display())?;
        let entry_count = fs::read_dir(path).map(|it| it.count()).unwrap_or(0);
        if entry_count < TREE_EXPAND_THRESHOLD {
            write_tree_level(out, base, path, depth + 1)?;
        } else {
            writeln!(out, "{}  (... {} items omitted ...)", indent, entry_count)?;
        }
    }
    for path in &files {
        let rel = path.strip_prefix(base).unwrap_or(path);
        writeln!(out, "{}📄 {}", indent, rel.display())?;
    }

    Ok(())
}

/// Write a dataset-mode one-line file summary
pub fn write_file_summary<W: Write>(
    out: &mut W,
    path: &str,
    size: u64,
    content: &str,
) -> io::Result<()> {
    let line_count = content.lines().count();
    let snippet: Option<String> = content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.chars().take(60).collect());

    match snippet {
        Some(snippet) => writeln!(
            out,
            "[SUMMARY] {} | {} bytes | {} lines | snippet: {}",
            path, size, line_count, snippet
        ),
        None => writeln!(out, "[SUMMARY] {} | {} bytes | {} lines", path, size, line_count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_lines_single_digit_width() {
        let content = (1..=9).map(|i| format!("line{}", i)).collect::<Vec<_>>().join("\n");
        let numbered = number_lines(&content);
        assert!(numbered.starts_with("1  line1"));
        assert!(numbered.ends_with("9  line9"));
    }

    #[test]
    fn test_number_lines_double_digit_width() {
        let content = (1..=10).map(|i| format!("line{}", i)).collect::<Vec<_>>().join("\n");
        let numbered = number_lines(&content);
        assert!(numbered.starts_with(" 1  line1"));
        assert!(numbered.ends_with("10  line10"));
    }

    #[test]
    fn test_number_lines_empty_content() {
        assert_eq!(number_lines(""), "");
    }

    #[test]
    fn test_plain_framing() {
        let mut emitter = Emitter::new(OutputFormat::Plain, false, false);
        let mut out = Vec::new();
        emitter.begin(&mut out).unwrap();
        emitter.emit(&mut out, "a.txt", "hello").unwrap();
        emitter.finish(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a.txt\n---\nhello\n\n---\n\n");
    }

    #[test]
    fn test_xml_indices_increase_without_gaps() {
        let mut emitter = Emitter::new(OutputFormat::Cxml, false, false);
        let mut out = Vec::new();
        emitter.begin(&mut out).unwrap();
        emitter.emit(&mut out, "a", "x").unwrap();
        emitter.emit(&mut out, "b", "y").unwrap();
        emitter.emit(&mut out, "c", "z").unwrap();
        emitter.finish(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("<documents>\n"));
        assert!(text.contains("<document index=\"1\">"));
        assert!(text.contains("<document index=\"2\">"));
        assert!(text.contains("<document index=\"3\">"));
        assert!(!text.contains("<document index=\"4\">"));
        assert!(text.ends_with("</documents>\n"));
    }

    #[test]
    fn test_json_array_is_valid_json() {
        let mut emitter = Emitter::new(OutputFormat::Json, false, false);
        let mut out = Vec::new();
        emitter.begin(&mut out).unwrap();
        emitter.emit(&mut out, "a.txt", "x \"quoted\"").unwrap();
        emitter.emit(&mut out, "b.txt", "y\nz").unwrap();
        emitter.finish(&mut out).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let array = parsed.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["path"], "a.txt");
        assert_eq!(array[0]["content"], "x \"quoted\"");
        assert_eq!(array[1]["content"], "y\nz");
    }

    #[test]
    fn test_empty_json_array_is_valid() {
        let mut emitter = Emitter::new(OutputFormat::Json, false, false);
        let mut out = Vec::new();
        emitter.begin(&mut out).unwrap();
        emitter.finish(&mut out).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_jsonl_one_object_per_line() {
        let mut emitter = Emitter::new(OutputFormat::Jsonl, false, false);
        let mut out = Vec::new();
        emitter.begin(&mut out).unwrap();
        emitter.emit(&mut out, "a", "1").unwrap();
        emitter.emit(&mut out, "b", "2").unwrap();
        emitter.finish(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(parsed.get("path").is_some());
            assert!(parsed.get("content").is_some());
        }
    }

    #[test]
    fn test_line_numbers_injected_identically_in_plain_and_xml() {
        let content = "alpha\nbeta";

        let mut plain = Emitter::new(OutputFormat::Plain, true, false);
        let mut plain_out = Vec::new();
        plain.emit(&mut plain_out, "f", content).unwrap();

        let mut xml = Emitter::new(OutputFormat::Cxml, true, false);
        let mut xml_out = Vec::new();
        xml.emit(&mut xml_out, "f", content).unwrap();

        let expected = "1  alpha\n2  beta";
        assert!(String::from_utf8(plain_out).unwrap().contains(expected));
        assert!(String::from_utf8(xml_out).unwrap().contains(expected));
    }

    #[test]
    fn test_dataset_mode_delimiters() {
        let mut emitter = Emitter::new(OutputFormat::Plain, false, true);
        let mut out = Vec::new();
        emitter.emit(&mut out, "a.txt", "body").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("===== FILE BEGIN: a.txt ====="));
        assert!(text.contains("===== FILE END: a.txt ====="));
    }
}
