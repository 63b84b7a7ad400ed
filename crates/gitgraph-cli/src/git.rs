use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{CliError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

/// Synchronous wrapper around the `git` binary. Every method shells out via
/// [`std::process::Command`] and captures stdout/stderr whole; none of this
/// crate's callers stream output.
#[derive(Debug, Clone)]
pub struct GitRunner {
    git_binary: String,
}

impl Default for GitRunner {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitRunner {
    pub fn new(git_binary: impl Into<String>) -> Self {
        Self {
            git_binary: git_binary.into(),
        }
    }

    pub fn validate_repo(&self, repo_path: &Path) -> Result<()> {
        if !repo_path.exists() || !repo_path.is_dir() {
            return Err(CliError::InvalidRepository(repo_path.to_path_buf()));
        }
        let out = self.exec(repo_path, &["rev-parse", "--is-inside-work-tree"], true)?;
        if out.stdout.trim() == "true" {
            return Ok(());
        }
        Err(CliError::InvalidRepository(repo_path.to_path_buf()))
    }

    pub fn exec(&self, repo_path: &Path, args: &[&str], allow_non_zero: bool) -> Result<GitOutput> {
        let output = Command::new(&self.git_binary)
            .current_dir(repo_path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| CliError::io("running git command", source))?;

        let result = GitOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
        };

        if output.status.success() || allow_non_zero {
            return Ok(result);
        }
        Err(CliError::GitCommandFailed {
            program: self.git_binary.clone(),
            args: args.iter().map(|s| s.to_string()).collect(),
            exit_code: result.exit_code,
            stderr: result.stderr,
        })
    }

    pub fn discover_repo_root(&self, start_path: &Path) -> Result<PathBuf> {
        let out = self.exec(start_path, &["rev-parse", "--show-toplevel"], false)?;
        let root = out.stdout.trim();
        if root.is_empty() {
            return Err(CliError::InvalidRepository(start_path.to_path_buf()));
        }
        Ok(PathBuf::from(root))
    }

    /// `git log` output in the `0x00`/`0x01`-delimited record format
    /// [`gitgraph_core::parse_git_log`] expects.
    pub fn log_buffer(&self, repo_path: &Path, max_commits: Option<usize>) -> Result<String> {
        let mut args: Vec<String> = vec![
            "log".to_string(),
            "--topo-order".to_string(),
            "--all".to_string(),
            format!(
                "--pretty=format:%H{sep}%P{sep}%an{sep}%ae{sep}%aI{sep}%cn{sep}%ce{sep}%cI{sep}%s{sep}%b\x01",
                sep = "\x00"
            ),
        ];
        if let Some(limit) = max_commits {
            args.push(format!("-n{limit}"));
        }
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        Ok(self.exec(repo_path, &arg_refs, false)?.stdout)
    }

    /// `for-each-ref` output in the format [`gitgraph_core::parse_refs`] expects.
    pub fn refs_buffer(&self, repo_path: &Path) -> Result<String> {
        Ok(self
            .exec(
                repo_path,
                &["for-each-ref", "--format=%(objectname) %(refname) %(objecttype)"],
                false,
            )?
            .stdout)
    }

    pub fn current_branch(&self, repo_path: &Path) -> Result<Option<String>> {
        let out = self.exec(repo_path, &["symbolic-ref", "--short", "HEAD"], true)?;
        let name = out.stdout.trim();
        Ok(if name.is_empty() { None } else { Some(name.to_string()) })
    }

    pub fn head_commit(&self, repo_path: &Path) -> Result<Option<String>> {
        let out = self.exec(repo_path, &["rev-parse", "HEAD"], true)?;
        let hash = out.stdout.trim();
        Ok(if hash.is_empty() { None } else { Some(hash.to_string()) })
    }
}
