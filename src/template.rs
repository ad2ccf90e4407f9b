use crate::git::Vcs;
use anyhow::Result;

pub const MESSAGE_PLACEHOLDER: &str = "{COMMIT_MESSAGE}";
pub const BRANCH_PLACEHOLDER: &str = "{GIT_BRANCH}";

/// Result of running a message through a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expanded {
    pub message: String,
    /// The template had no `{COMMIT_MESSAGE}`, so `message` is the input unchanged.
    pub missing_placeholder: bool,
}

/// Expand `template` around `message`.
///
/// Substitution is literal. `{GIT_BRANCH}` is only resolved (one VCS call)
/// when the expanded text still contains it. A template without
/// `{COMMIT_MESSAGE}` would throw the generated text away, so the message
/// is returned untouched with a warning instead.
pub fn apply(template: &str, message: &str, vcs: &dyn Vcs) -> Result<Expanded> {
    if !template.contains(MESSAGE_PLACEHOLDER) {
        log::warn!("Template doesn't include {MESSAGE_PLACEHOLDER}; using the message as is");
        return Ok(Expanded {
            message: message.to_string(),
            missing_placeholder: true,
        });
    }

    let mut expanded = template.replace(MESSAGE_PLACEHOLDER, message);

    if expanded.contains(BRANCH_PLACEHOLDER) {
        let branch = vcs.current_branch()?;
        log::info!("Using current branch: {branch}");
        expanded = expanded.replace(BRANCH_PLACEHOLDER, &branch);
    }

    Ok(Expanded {
        message: expanded,
        missing_placeholder: false,
    })
}
