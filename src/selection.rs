use crate::config::Settings;
use crate::error::{AbortReason, AppError};
use crate::git::Vcs;
use crate::operator::Operator;
use crate::pipeline::Generator;
use crate::template;

/// Menu entry that asks for a fresh set of candidates. Never committed.
pub const REGENERATE_OPTION: &str = "♻️ Regenerate Commit Messages";

/// Decides which message, if any, gets committed.
///
/// Single mode shows one proposal and asks for confirmation (skipped with
/// `--force`). List mode shows a menu of candidates plus a regenerate entry
/// and loops until a real candidate is picked.
pub struct SelectionController<'a> {
    settings: &'a Settings,
    generator: &'a Generator<'a>,
    vcs: &'a dyn Vcs,
    operator: &'a mut dyn Operator,
}

impl<'a> SelectionController<'a> {
    pub fn new(
        settings: &'a Settings,
        generator: &'a Generator<'a>,
        vcs: &'a dyn Vcs,
        operator: &'a mut dyn Operator,
    ) -> Self {
        SelectionController {
            settings,
            generator,
            vcs,
            operator,
        }
    }

    /// Run the workflow for `diff` and return the message to commit.
    pub fn run(&mut self, diff: &str) -> Result<String, AppError> {
        match self.settings.candidate_count {
            Some(_) => {
                if self.settings.force {
                    log::warn!("--force only applies to single-message mode; showing the menu");
                }
                self.run_list(diff)
            }
            None => self.run_single(diff),
        }
    }

    fn run_single(&mut self, diff: &str) -> Result<String, AppError> {
        let candidates = self.generator.generate(diff, &mut *self.operator)?;
        if candidates.len() > 1 {
            log::debug!("Model returned {} messages; proposing the first", candidates.len());
        }
        let (message, templated) = self.expand(candidates.first())?;

        let heading = if templated {
            "Proposed Commit With Template:"
        } else {
            "Proposed Commit:"
        };
        println!("{heading}\n------------------------------\n{message}\n------------------------------");

        if self.settings.force {
            return Ok(message);
        }

        let confirmed = self
            .operator
            .confirm("Do you want to continue?", true)
            .map_err(|e| AppError::Interaction(AppError::chain(&e)))?;

        if confirmed {
            Ok(message)
        } else {
            Err(AppError::Aborted(AbortReason::Declined))
        }
    }

    fn run_list(&mut self, diff: &str) -> Result<String, AppError> {
        loop {
            let candidates = self.generator.generate(diff, &mut *self.operator)?;

            let mut options = candidates
                .iter()
                .map(|c| self.expand(c).map(|(message, _)| message))
                .collect::<Result<Vec<_>, _>>()?;
            let regenerate_at = options.len();
            options.push(REGENERATE_OPTION.to_string());

            let choice = self
                .operator
                .select("Select a commit message", &options)
                .map_err(|e| AppError::Interaction(AppError::chain(&e)))?;

            match choice {
                None => return Err(AppError::Aborted(AbortReason::Declined)),
                Some(idx) if idx == regenerate_at => {
                    log::info!("Regenerating commit messages");
                    continue;
                }
                Some(idx) if idx < regenerate_at => return Ok(options.swap_remove(idx)),
                Some(idx) => {
                    return Err(AppError::Interaction(format!(
                        "menu returned option {idx} of {}",
                        options.len()
                    )));
                }
            }
        }
    }

    /// Candidate after templating, and whether the template was applied.
    fn expand(&self, candidate: &str) -> Result<(String, bool), AppError> {
        match &self.settings.template {
            Some(tpl) => template::apply(tpl, candidate, self.vcs)
                .map(|expanded| (expanded.message, !expanded.missing_placeholder))
                .map_err(|e| AppError::Repository(AppError::chain(&e))),
            None => Ok((candidate.to_string(), false)),
        }
    }
}
