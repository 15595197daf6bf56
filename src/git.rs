//! Git working-directory resolution
//!
//! The test runner always executes from the repository root containing
//! the file under the cursor. Root lookup uses subprocess calls to git
//! for maximum compatibility.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{ProveError, Result};

/// Run a git command and return stdout as string
pub fn git_command(args: &[&str], cwd: Option<&Path>) -> Result<String> {
    let mut cmd = Command::new("git");
    cmd.args(args);

    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let output = cmd.output().map_err(|e| ProveError::Git {
        message: format!("Failed to execute git: {}", e),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ProveError::Git {
            message: format!("git {} failed: {}", args.join(" "), stderr.trim()),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Repository root containing `file_path`, resolved from its parent
/// directory with `git rev-parse --show-toplevel`.
///
/// Fails when the file has no on-disk presence or git reports no root;
/// the caller must abort without launching anything in that case.
pub fn repo_root_for_file(file_path: &Path) -> Result<PathBuf> {
    if !file_path.exists() {
        tracing::warn!(path = %file_path.display(), "file has no on-disk path; aborting");
        return Err(ProveError::FileNotFound {
            path: file_path.display().to_string(),
        });
    }

    let parent = file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty());

    let root = git_command(&["rev-parse", "--show-toplevel"], parent)?;
    if root.is_empty() {
        return Err(ProveError::NotGitRepo);
    }

    Ok(PathBuf::from(root))
}
