/*!
 * Directory traversal and file selection
 *
 * Walks each root depth-first, consulting the scoped ignore rules and the
 * filter criteria at every level, and yields selected files in a
 * deterministic order: within a directory, files sorted by name first, then
 * subdirectories in sorted order.
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use glob_match::glob_match;
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::Result;
use crate::rules;

/// A file chosen for emission, with its stat snapshot
///
/// Size and modification time are captured exactly once, at selection time.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    /// Path as it will appear in the output
    pub path: PathBuf,
    /// Size in bytes at selection time
    pub size: u64,
    /// Modification time at selection time
    pub modified: SystemTime,
}

/// Walks roots and yields files passing all filters
pub struct Traverser<'a> {
    config: &'a Config,
}

impl<'a> Traverser<'a> {
    /// Create a traverser over the given configuration
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Walk a root, invoking `visit` for every selected file
    ///
    /// A root that is a single file is tested against the filter criteria
    /// only: hidden-name and ignore-rule checks do not apply to paths given
    /// explicitly.
    pub fn walk<F>(&self, root: &Path, visit: &mut F) -> Result<()>
    where
        F: FnMut(SelectedFile) -> Result<()>,
    {
        if root.is_file() {
            if let Some(file) = self.select(root) {
                visit(file)?;
            }
            return Ok(());
        }

        let mut rules = Vec::new();
        self.walk_dir(root, &mut rules, visit)
    }

    /// Recursively walk one directory level
    ///
    /// `rules` is the accumulated ignore-rule stack: rules read from this
    /// directory's .gitignore are pushed before descending and popped on
    /// return, so they apply to this subtree only.
    fn walk_dir<F>(&self, dir: &Path, rules: &mut Vec<String>, visit: &mut F) -> Result<()>
    where
        F: FnMut(SelectedFile) -> Result<()>,
    {
        let mut files = Vec::new();
        let mut dirs = Vec::new();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    // Unreadable entries are skipped, not fatal
                    eprintln!("Warning: skipping {}: {}", dir.display(), e);
                    continue;
                }
            };
            let name = entry.file_name().to_string_lossy().to_string();
            if !self.config.include_hidden && name.starts_with('.') {
                continue;
            }
            if entry.file_type().is_dir() {
                dirs.push(name);
            } else {
                files.push(name);
            }
        }

        let mark = rules.len();
        if !self.config.ignore_gitignore {
            rules.extend(rules::read_gitignore(dir));
        }

        files.retain(|name| !rules::is_ignored(name, false, rules));
        dirs.retain(|name| !rules::is_ignored(name, true, rules));

        if !self.config.ignore_patterns.is_empty() {
            files.retain(|name| !self.matches_ignore_pattern(name));
            if !self.config.ignore_files_only {
                dirs.retain(|name| !self.matches_ignore_pattern(name));
            }
        }

        files.sort();
        dirs.sort();

        for name in &files {
            if let Some(file) = self.select(&dir.join(name)) {
                visit(file)?;
            }
        }

        for name in &dirs {
            self.walk_dir(&dir.join(name), rules, visit)?;
        }

        rules.truncate(mark);
        Ok(())
    }

    /// Stat a candidate once and test it against the filter criteria
    ///
    /// A failed stat (vanished or unreadable file) excludes the candidate.
    fn select(&self, path: &Path) -> Option<SelectedFile> {
        let metadata = fs::metadata(path).ok()?;
        let modified = metadata.modified().ok()?;
        let size = metadata.len();

        if !self.config.criteria.matches(path, size, modified) {
            return None;
        }

        Some(SelectedFile {
            path: path.to_path_buf(),
            size,
            modified,
        })
    }

    fn matches_ignore_pattern(&self, name: &str) -> bool {
        self.config
            .ignore_patterns
            .iter()
            .any(|pattern| glob_match(pattern, name))
    }
}
