/*!
 * Remote repository acquisition
 *
 * Treated as an external collaborator by the rest of the crate: it turns a
 * recognizable Git URL into a local checkout directory, or fails. The
 * checkout lives in a temporary directory that is removed when dropped,
 * including on error paths.
 */

mod error;
mod progress;
mod repository;
mod url;

// Re-export public items
pub use error::{GitError, GitResult};
pub use progress::{GitProgress, ProgressReporter};
pub use repository::clone_to_temp;
pub use url::{is_git_url, parse_git_url, GitHost, GitRepoInfo};
