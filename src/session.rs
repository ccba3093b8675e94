/*!
 * Run orchestration
 *
 * Drives Traverser -> ContentReader -> Emitter across all input roots,
 * sharing one emitter (and its document index) for the whole run and
 * handling remote-root acquisition and output lifecycle.
 */

use std::io::Write;
use std::path::Path;
use std::time::Instant;

use indicatif::ProgressBar;

use crate::config::Config;
use crate::content::{self, FileContent};
use crate::emit::{self, Emitter, OutputFormat};
use crate::error::Result;
use crate::git::{self, GitProgress};
use crate::report::RunReport;
use crate::traverse::{SelectedFile, Traverser};
use crate::writer::Output;

/// Counters accumulated over one run
#[derive(Debug, Clone, Default)]
struct RunStats {
    documents: usize,
    skipped: usize,
    total_lines: usize,
}

/// One processing run over the configured roots
pub struct Session {
    config: Config,
    emitter: Emitter,
    stats: RunStats,
    progress: Option<ProgressBar>,
}

impl Session {
    /// Create a session; the emitter's framing state lives for this run only
    pub fn new(config: Config, progress: Option<ProgressBar>) -> Self {
        let emitter = Emitter::new(config.format, config.line_numbers, config.dataset_mode);
        Self {
            config,
            emitter,
            stats: RunStats::default(),
            progress,
        }
    }

    /// Process every root and return the run report
    ///
    /// The container token (XML wrapper, JSON array brackets) spans all
    /// roots; a failing root aborts the whole run. Temporary clone
    /// directories are removed on every exit path.
    pub fn run(&mut self) -> Result<RunReport> {
        let start_time = Instant::now();

        let mut out = Output::create(self.config.output_file.as_deref())?;
        self.emitter.begin(&mut out)?;

        let roots = self.config.roots.clone();
        for root in &roots {
            self.process_root(root, &mut out)?;
        }

        self.emitter.finish(&mut out)?;
        out.flush()?;

        Ok(RunReport {
            output: self
                .config
                .output_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "stdout".to_string()),
            duration: start_time.elapsed(),
            documents: self.stats.documents,
            skipped: self.stats.skipped,
            total_lines: self.stats.total_lines,
        })
    }

    /// Process one root argument, resolving remote references first
    fn process_root<W: Write>(&mut self, root: &str, out: &mut W) -> Result<()> {
        if git::is_git_url(root) {
            let info = git::parse_git_url(root)?;

            let progress = self.progress.clone();
            let reporter = move |p: &GitProgress| {
                if let Some(bar) = &progress {
                    bar.set_message(format!(
                        "Cloning: {}% ({})",
                        p.percentage(),
                        p.formatted_bytes()
                    ));
                }
            };

            // The TempDir owns the checkout; dropping it at the end of this
            // scope deletes the clone even when processing fails early
            let checkout = git::clone_to_temp(&info, Some(&reporter))?;
            self.process_local(checkout.path(), out)
        } else {
            self.process_local(Path::new(root), out)
        }
    }

    /// Traverse a local root and emit every selected, decodable file
    fn process_local<W: Write>(&mut self, root: &Path, out: &mut W) -> Result<()> {
        let dataset_extras =
            self.config.dataset_mode && self.config.format == OutputFormat::Plain;

        if dataset_extras && root.is_dir() {
            emit::write_tree_overview(out, root)?;
        }

        let traverser = Traverser::new(&self.config);
        let emitter = &mut self.emitter;
        let stats = &mut self.stats;

        traverser.walk(root, &mut |file: SelectedFile| {
            let path_str = file.path.to_string_lossy();
            match content::read(&file.path) {
                Ok(FileContent::Text(text)) => {
                    if dataset_extras {
                        emit::write_file_summary(out, &path_str, file.size, &text)?;
                    }
                    emitter.emit(out, &path_str, &text)?;
                    stats.documents += 1;
                    stats.total_lines += text.lines().count();
                }
                Ok(FileContent::Binary) => {
                    eprintln!("Warning: skipping binary file {}", file.path.display());
                    stats.skipped += 1;
                }
                Err(e) => {
                    eprintln!("Warning: error reading {}: {}", file.path.display(), e);
                    stats.skipped += 1;
                }
            }
            Ok(())
        })
    }
}
