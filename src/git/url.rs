/*!
 * Git URL parsing and handling
 */

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use super::error::{GitError, GitResult};

// Statically compiled regexes for better performance
static HTTP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^https?://(?:www\.)?(?:github\.com|gitlab\.com|bitbucket\.org|.*)/[^/]+/[^/]+(?:\.git)?$",
    )
    .unwrap()
});

static SSH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^git@(?:github\.com|gitlab\.com|bitbucket\.org|[^:]+):[^/]+/[^/]+(?:\.git)?$")
        .unwrap()
});

static SSH_PARSE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^git@([^:]+):([^/]+)/([^/]+)(?:\.git)?$").unwrap());

/// Git hosting platform types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitHost {
    /// GitHub repository
    GitHub,
    /// GitLab repository
    GitLab,
    /// Bitbucket repository
    Bitbucket,
    /// Other Git hosting
    Other(String),
}

impl std::fmt::Display for GitHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GitHost::GitHub => write!(f, "GitHub"),
            GitHost::GitLab => write!(f, "GitLab"),
            GitHost::Bitbucket => write!(f, "Bitbucket"),
            GitHost::Other(host) => write!(f, "{}", host),
        }
    }
}

/// Information about a Git repository
#[derive(Debug, Clone)]
pub struct GitRepoInfo {
    /// Original URL
    pub url: String,
    /// Git hosting platform
    pub host: GitHost,
    /// Repository owner/username
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl std::fmt::Display for GitRepoInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.host, self.owner, self.name)
    }
}

impl FromStr for GitRepoInfo {
    type Err = GitError;

    fn from_str(url: &str) -> Result<Self, Self::Err> {
        // Check if the URL is valid
        if !HTTP_REGEX.is_match(url) && !SSH_REGEX.is_match(url) {
            return Err(GitError::InvalidUrl(url.to_string()));
        }

        // Handle HTTP/HTTPS URLs
        if url.starts_with("http://") || url.starts_with("https://") {
            if let Ok(parsed_url) = Url::parse(url) {
                let host_str = parsed_url
                    .host_str()
                    .ok_or_else(|| GitError::InvalidUrl(format!("Invalid host in URL: {}", url)))?;

                // Get path without leading slash
                let path = parsed_url.path();
                let path = path.strip_prefix('/').unwrap_or(path);

                let path_segments: Vec<&str> = path.split('/').collect();

                if path_segments.len() < 2 {
                    return Err(GitError::InvalidUrl(format!(
                        "Missing owner or repository in URL: {}",
                        url
                    )));
                }

                let owner = path_segments[0].to_string();
                let mut name = path_segments[1].to_string();

                // Remove .git suffix if present
                if let Some(stripped) = name.strip_suffix(".git") {
                    name = stripped.to_string();
                }

                let host = match host_str {
                    "github.com" => GitHost::GitHub,
                    "gitlab.com" => GitHost::GitLab,
                    "bitbucket.org" => GitHost::Bitbucket,
                    _ => GitHost::Other(host_str.to_string()),
                };

                return Ok(GitRepoInfo {
                    url: url.to_string(),
                    host,
                    owner,
                    name,
                });
            }
        }

        // Handle SSH URLs (git@github.com:owner/repo.git)
        if url.starts_with("git@") {
            if let Some(captures) = SSH_PARSE_REGEX.captures(url) {
                if let (Some(host_match), Some(owner_match), Some(name_match)) =
                    (captures.get(1), captures.get(2), captures.get(3))
                {
                    let host_str = host_match.as_str();
                    let owner = owner_match.as_str().to_string();
                    let mut name = name_match.as_str().to_string();

                    // Remove .git suffix if present
                    if let Some(stripped) = name.strip_suffix(".git") {
                        name = stripped.to_string();
                    }

                    let host = match host_str {
                        "github.com" => GitHost::GitHub,
                        "gitlab.com" => GitHost::GitLab,
                        "bitbucket.org" => GitHost::Bitbucket,
                        _ => GitHost::Other(host_str.to_string()),
                    };

                    return Ok(GitRepoInfo {
                        url: url.to_string(),
                        host,
                        owner,
                        name,
                    });
                }
            }
        }

        Err(GitError::InvalidUrl(url.to_string()))
    }
}

/// Check if a path is a Git repository URL
pub fn is_git_url(path: &str) -> bool {
    path.parse::<GitRepoInfo>().is_ok()
}

/// Parse a Git repository URL into components
pub fn parse_git_url(url: &str) -> GitResult<GitRepoInfo> {
    url.parse()
}
