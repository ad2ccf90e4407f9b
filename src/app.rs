use crate::config::Settings;
use crate::error::AppError;
use crate::git::Vcs;
use crate::llm::LlmClient;
use crate::operator::Operator;
use crate::pipeline::Generator;
use crate::selection::SelectionController;
use crate::sink;
use crate::token_gate::{TokenGate, WordCount};

/// Generate, approve and commit a message for the staged changes.
pub fn commit_staged_changes(
    settings: &Settings,
    vcs: &dyn Vcs,
    llm: &dyn LlmClient,
    operator: &mut dyn Operator,
) -> Result<(), AppError> {
    if !vcs.is_repository() {
        return Err(AppError::NotARepository);
    }

    let diff = vcs
        .staged_diff()
        .map_err(|e| AppError::Repository(AppError::chain(&e)))?;

    if diff.trim().is_empty() {
        return Err(AppError::NoStagedChanges);
    }
    log::debug!("Staged diff is {} bytes", diff.len());

    let gate = TokenGate::new(WordCount, settings.token_limit);
    let generator = Generator::new(llm, gate, settings);
    let message = SelectionController::new(settings, &generator, vcs, operator).run(&diff)?;

    sink::commit(vcs, &message)
}
