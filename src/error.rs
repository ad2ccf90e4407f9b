//! Error taxonomy for a single commit run.

use thiserror::Error;

/// Everything that can end a run without a commit being created.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("This is not a git repository 🙅‍♂️")]
    NotARepository,

    #[error(
        "No changes to commit 🙅\nMay be you forgot to add the files? Try `git add .` and then run this again."
    )]
    NoStagedChanges,

    #[error("Failed to read repository state: {0}")]
    Repository(String),

    #[error("Failed to generate a commit message: {0}")]
    Generation(String),

    #[error("Failed to read your answer: {0}")]
    Interaction(String),

    #[error("{0}")]
    Aborted(AbortReason),

    #[error("Commit failed: {0}")]
    Commit(String),
}

/// Why the operator ended the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// Answered "no" to the proposed message, or cancelled the menu.
    Declined,
    /// Refused to send a prompt above the token limit.
    TokenLimit,
}

impl std::fmt::Display for AbortReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbortReason::Declined => f.write_str("Commit aborted by user 🙅‍♂️"),
            AbortReason::TokenLimit => {
                f.write_str("Generation aborted: the prompt is over the token limit 🙅‍♂️")
            }
        }
    }
}

impl AppError {
    /// Format an `anyhow` chain into a single line for the wrapped variants.
    pub fn chain(err: &anyhow::Error) -> String {
        format!("{err:#}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abort_messages_are_distinct() {
        let declined = AppError::Aborted(AbortReason::Declined).to_string();
        let limit = AppError::Aborted(AbortReason::TokenLimit).to_string();
        assert!(declined.contains("aborted by user"));
        assert!(limit.contains("token limit"));
        assert_ne!(declined, limit);
    }

    #[test]
    fn chain_keeps_context() {
        let err = anyhow::anyhow!("root cause").context("outer");
        assert_eq!(AppError::chain(&err), "outer: root cause");
    }
}
