/*!
 * Git repository cloning
 */

use git2::{FetchOptions, RemoteCallbacks};
use tempfile::TempDir;

use super::error::{GitError, GitResult};
use super::progress::{GitProgress, ProgressReporter};
use super::url::GitRepoInfo;

const TEMP_DIR_PREFIX: &str = "contextforge_";

/// Clone a repository into a fresh temporary directory
///
/// The returned `TempDir` owns the checkout; dropping it removes the clone,
/// so the directory is cleaned up on every exit path. No retries and no
/// timeout: a hanging network operation is an accepted external dependency.
pub fn clone_to_temp<P: ProgressReporter>(
    info: &GitRepoInfo,
    progress: Option<&P>,
) -> GitResult<TempDir> {
    let temp_dir = tempfile::Builder::new()
        .prefix(TEMP_DIR_PREFIX)
        .tempdir()
        .map_err(GitError::IoError)?;

    let mut builder = git2::build::RepoBuilder::new();

    if let Some(reporter) = progress {
        let mut callbacks = RemoteCallbacks::new();
        callbacks.transfer_progress(|stats| {
            let progress = GitProgress {
                total_objects: stats.total_objects(),
                received_objects: stats.received_objects(),
                indexed_objects: stats.indexed_objects(),
                received_bytes: stats.received_bytes(),
            };
            reporter.report(&progress);
            true
        });

        let mut fetch_options = FetchOptions::new();
        fetch_options.remote_callbacks(callbacks);
        builder.fetch_options(fetch_options);
    }

    builder
        .clone(&info.url, temp_dir.path())
        .map_err(GitError::CloneError)?;

    Ok(temp_dir)
}
