/*!
 * ContextForge - Concatenate source trees into LLM context documents
 *
 * This library walks local directories or cloned Git repositories, filters
 * files by extension, regex, size, modification time and ignore rules, and
 * streams their contents in plain text, Claude-style XML, JSON or JSONL.
 */

pub mod config;
pub mod content;
pub mod emit;
pub mod error;
pub mod filter;
pub mod git;
pub mod report;
pub mod rules;
pub mod session;
pub mod traverse;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use config::{Args, Config};
pub use content::FileContent;
pub use emit::{Emitter, OutputFormat};
pub use error::{ContextForgeError, Result};
pub use filter::FilterCriteria;
pub use report::{ReportFormat, Reporter, RunReport};
pub use session::Session;
pub use traverse::{SelectedFile, Traverser};
pub use utils::format_file_size;
pub use writer::Output;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
