/*!
 * Hierarchical ignore-rule handling
 *
 * Implements a deliberately simplified subset of gitignore semantics:
 * patterns match against basenames only (a rule `build` excludes anything
 * named `build` at any depth), and negation prefixes (`!`) are not treated
 * specially. Rules accumulate as the traversal descends and are scoped to
 * the directory that defined them and its descendants.
 */

use std::fs;
use std::path::Path;

use glob_match::glob_match;

/// Read ignore rules from a directory's .gitignore file
///
/// Each non-empty, non-comment line becomes one glob pattern. A missing or
/// unreadable file yields no rules.
pub fn read_gitignore(dir: &Path) -> Vec<String> {
    match fs::read_to_string(dir.join(".gitignore")) {
        Ok(text) => text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(String::from)
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Check whether a basename is excluded by any of the accumulated rules
///
/// Directories additionally match rules written with a trailing slash.
pub fn is_ignored(name: &str, is_dir: bool, rules: &[String]) -> bool {
    rules.iter().any(|rule| {
        glob_match(rule, name) || (is_dir && glob_match(rule, &format!("{}/", name)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn rules(patterns: &[&str]) -> Vec<String> {
        patterns.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_basename_glob_matching() {
        let rules = rules(&["*.log", "build"]);
        assert!(is_ignored("debug.log", false, &rules));
        assert!(is_ignored("build", false, &rules));
        assert!(is_ignored("build", true, &rules));
        assert!(!is_ignored("main.rs", false, &rules));
    }

    #[test]
    fn test_trailing_slash_matches_directories_only() {
        let rules = rules(&["target/"]);
        assert!(is_ignored("target", true, &rules));
        assert!(!is_ignored("target", false, &rules));
    }

    #[test]
    fn test_negation_is_not_special() {
        // `!` is a literal glob character here, not a gitignore negation
        let rules = rules(&["!keep.txt"]);
        assert!(!is_ignored("keep.txt", false, &rules));
        assert!(is_ignored("!keep.txt", false, &rules));
    }

    #[test]
    fn test_read_gitignore_skips_comments_and_blanks() {
        let dir = tempdir().unwrap();
        let mut file = File::create(dir.path().join(".gitignore")).unwrap();
        writeln!(file, "# a comment").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "*.tmp").unwrap();
        writeln!(file, "  cache  ").unwrap();

        let rules = read_gitignore(dir.path());
        assert_eq!(rules, vec!["*.tmp".to_string(), "cache".to_string()]);
    }

    #[test]
    fn test_read_gitignore_missing_file() {
        let dir = tempdir().unwrap();
        assert!(read_gitignore(dir.path()).is_empty());
    }
}
