use crate::aggregator::{aggregate, CandidateSet};
use crate::config::Settings;
use crate::error::{AbortReason, AppError};
use crate::llm::prompt_builder;
use crate::llm::LlmClient;
use crate::logging::truncate;
use crate::operator::Operator;
use crate::token_gate::TokenGate;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// One generation attempt: prompt, size check, model call, aggregation.
pub struct Generator<'a> {
    llm: &'a dyn LlmClient,
    gate: TokenGate,
    settings: &'a Settings,
}

impl<'a> Generator<'a> {
    pub fn new(llm: &'a dyn LlmClient, gate: TokenGate, settings: &'a Settings) -> Self {
        Generator { llm, gate, settings }
    }

    /// Produce a fresh candidate set for `diff`. Nothing is kept between calls.
    pub fn generate(&self, diff: &str, operator: &mut dyn Operator) -> Result<CandidateSet, AppError> {
        let prompt = prompt_builder::build(
            diff,
            &self.settings.language,
            self.settings.commit_type.as_deref(),
            self.settings.candidate_count,
        );
        log::trace!("Prompt:\n{}", truncate(prompt.as_str(), 3000));

        let allowed = self
            .gate
            .evaluate(prompt.as_str(), operator)
            .map_err(|e| AppError::Interaction(AppError::chain(&e)))?;
        if !allowed {
            return Err(AppError::Aborted(AbortReason::TokenLimit));
        }

        let spinner = spinner(format!("Prompting {}...", self.llm.name()));
        let result = self
            .llm
            .generate(prompt.as_str())
            .map_err(|e| AppError::Generation(AppError::chain(&e)))
            .and_then(aggregate);
        spinner.finish_and_clear();

        let candidates = result?;
        log::debug!("Received {} candidate(s)", candidates.len());
        Ok(candidates)
    }
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
