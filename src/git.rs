use anyhow::{anyhow, Context, Result};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command as GitCommand, Stdio};

/// The repository operations a commit run needs.
pub trait Vcs {
    fn is_repository(&self) -> bool;

    /// Full text of the staged changes.
    fn staged_diff(&self) -> Result<String>;

    fn current_branch(&self) -> Result<String>;

    /// Create a commit whose message is exactly `message`.
    fn commit(&self, message: &str) -> Result<()>;
}

/// `Vcs` backed by the `git` executable, run in `dir` or the current directory.
#[derive(Debug, Default, Clone)]
pub struct GitCli {
    dir: Option<PathBuf>,
}

impl GitCli {
    #[cfg(test)]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        GitCli {
            dir: Some(dir.into()),
        }
    }

    fn command(&self) -> GitCommand {
        let mut cmd = GitCommand::new("git");
        if let Some(dir) = &self.dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Run a git command and capture stdout as String.
    fn git_output(&self, args: &[&str]) -> Result<String> {
        git_output(self.command(), args)
    }
}

fn git_output(mut cmd: GitCommand, args: &[&str]) -> Result<String> {
    let output = cmd
        .args(args)
        .output()
        .with_context(|| format!("failed to run git {:?}", args))?;

    if !output.status.success() {
        return Err(anyhow!(
            "git {:?} exited with status {:?}: {}",
            args,
            output.status.code(),
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

impl Vcs for GitCli {
    fn is_repository(&self) -> bool {
        match self.git_output(&["rev-parse", "--is-inside-work-tree"]) {
            Ok(out) => out.trim() == "true",
            Err(e) => {
                log::debug!("Repository check failed: {e:#}");
                false
            }
        }
    }

    fn staged_diff(&self) -> Result<String> {
        self.git_output(&["diff", "--staged"])
    }

    fn current_branch(&self) -> Result<String> {
        let name = self.git_output(&["branch", "--show-current"])?
            .trim()
            .to_string();
        if !name.is_empty() {
            return Ok(name);
        }

        // Detached HEAD
        let name = self.git_output(&["rev-parse", "--abbrev-ref", "HEAD"])?
            .trim()
            .to_string();
        Ok(name)
    }

    fn commit(&self, message: &str) -> Result<()> {
        // verbatim keeps blank lines and `#` lines exactly as given
        let mut child = self
            .command()
            .args(["commit", "--cleanup=verbatim", "-F", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context("failed to run git commit")?;

        {
            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| anyhow!("git commit stdin was not captured"))?;
            stdin
                .write_all(message.as_bytes())
                .context("failed to pass the commit message to git")?;
        }

        let output = child
            .wait_with_output()
            .context("failed to wait for git commit")?;

        if !output.status.success() {
            return Err(anyhow!(
                "git commit exited with status {:?}: {}",
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        log::debug!("{}", String::from_utf8_lossy(&output.stdout).trim());
        Ok(())
    }
}
