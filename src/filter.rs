/*!
 * File selection criteria
 */

use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local, NaiveDateTime};
use regex::Regex;

/// Criteria a candidate file must satisfy to be emitted
///
/// All configured criteria are combined with logical AND; absent criteria
/// are vacuously true.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Extension allow-list: plain case-sensitive suffix match against the
    /// path string, not dot-normalized (`py` matches `a.py`)
    pub extensions: Vec<String>,
    /// Unanchored regex searched against the whole path string
    pub regex: Option<Regex>,
    /// Inclusive lower size bound in bytes
    pub min_size: Option<u64>,
    /// Inclusive upper size bound in bytes
    pub max_size: Option<u64>,
    /// Only files modified at or after this local time
    pub modified_after: Option<NaiveDateTime>,
}

impl FilterCriteria {
    /// Test a candidate against every configured criterion
    ///
    /// `size` and `modified` come from the stat snapshot taken at selection
    /// time; callers treat a failed stat as an exclusion, so this function
    /// itself is total and never fails.
    pub fn matches(&self, path: &Path, size: u64, modified: SystemTime) -> bool {
        let path_str = path.to_string_lossy();

        if !self.extensions.is_empty()
            && !self.extensions.iter().any(|ext| path_str.ends_with(ext.as_str()))
        {
            return false;
        }

        if let Some(regex) = &self.regex {
            if !regex.is_match(&path_str) {
                return false;
            }
        }

        if let Some(min) = self.min_size {
            if size < min {
                return false;
            }
        }

        if let Some(max) = self.max_size {
            if size > max {
                return false;
            }
        }

        if let Some(threshold) = self.modified_after {
            let mtime = DateTime::<Local>::from(modified).naive_local();
            if mtime < threshold {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    fn path(s: &str) -> PathBuf {
        PathBuf::from(s)
    }

    #[test]
    fn test_empty_criteria_match_everything() {
        let criteria = FilterCriteria::default();
        assert!(criteria.matches(&path("anything.bin"), 0, SystemTime::now()));
    }

    #[test]
    fn test_extension_suffix_semantics() {
        let criteria = FilterCriteria {
            extensions: vec!["py".to_string(), ".md".to_string()],
            ..Default::default()
        };
        assert!(criteria.matches(&path("src/main.py"), 1, SystemTime::now()));
        assert!(criteria.matches(&path("README.md"), 1, SystemTime::now()));
        // Plain suffix match, so a bare `py` also matches paths merely ending in it
        assert!(criteria.matches(&path("hard-copy"), 1, SystemTime::now()));
        // Case-sensitive
        assert!(!criteria.matches(&path("MAIN.PY"), 1, SystemTime::now()));
        assert!(!criteria.matches(&path("main.rs"), 1, SystemTime::now()));
    }

    #[test]
    fn test_regex_searches_whole_path() {
        let criteria = FilterCriteria {
            regex: Some(Regex::new("tests?/").unwrap()),
            ..Default::default()
        };
        assert!(criteria.matches(&path("src/tests/mod.rs"), 1, SystemTime::now()));
        assert!(!criteria.matches(&path("src/lib.rs"), 1, SystemTime::now()));
    }

    #[test]
    fn test_size_bounds_inclusive() {
        let criteria = FilterCriteria {
            min_size: Some(10),
            max_size: Some(20),
            ..Default::default()
        };
        assert!(!criteria.matches(&path("a"), 9, SystemTime::now()));
        assert!(criteria.matches(&path("a"), 10, SystemTime::now()));
        assert!(criteria.matches(&path("a"), 20, SystemTime::now()));
        assert!(!criteria.matches(&path("a"), 21, SystemTime::now()));
    }

    #[test]
    fn test_inverted_bounds_match_nothing() {
        let criteria = FilterCriteria {
            min_size: Some(100),
            max_size: Some(50),
            ..Default::default()
        };
        for size in [0, 50, 75, 100, 1000] {
            assert!(!criteria.matches(&path("a"), size, SystemTime::now()));
        }
    }

    #[test]
    fn test_modified_after_threshold() {
        let now = SystemTime::now();
        let old = now - Duration::from_secs(365 * 24 * 3600);
        let threshold = DateTime::<Local>::from(now - Duration::from_secs(3600)).naive_local();

        let criteria = FilterCriteria {
            modified_after: Some(threshold),
            ..Default::default()
        };
        assert!(criteria.matches(&path("a"), 1, now));
        assert!(!criteria.matches(&path("a"), 1, old));
    }

    #[test]
    fn test_criteria_are_conjunctive() {
        let criteria = FilterCriteria {
            extensions: vec!["py".to_string()],
            min_size: Some(5),
            ..Default::default()
        };
        // Passes both
        assert!(criteria.matches(&path("a.py"), 10, SystemTime::now()));
        // Fails one of the two
        assert!(!criteria.matches(&path("a.py"), 1, SystemTime::now()));
        assert!(!criteria.matches(&path("a.txt"), 10, SystemTime::now()));
    }
}
