//! Prompt size check run before every model call.
//!
//! The size is an estimate: the default estimator counts whitespace-separated
//! words, which is only a stand-in for a model tokenizer. Swap the
//! [`TokenEstimator`] to change that without touching the gate.

use crate::operator::Operator;
use anyhow::Result;
use colored::Colorize;

/// Estimates how many tokens a prompt will cost.
pub trait TokenEstimator {
    fn estimate(&self, text: &str) -> usize;
}

/// Counts whitespace-delimited words.
#[derive(Debug, Default, Clone, Copy)]
pub struct WordCount;

impl TokenEstimator for WordCount {
    fn estimate(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }
}

pub struct TokenGate {
    estimator: Box<dyn TokenEstimator>,
    limit: usize,
}

impl TokenGate {
    pub fn new(estimator: impl TokenEstimator + 'static, limit: usize) -> Self {
        TokenGate {
            estimator: Box::new(estimator),
            limit,
        }
    }

    /// Whether `prompt` may be sent. Above the limit the operator decides.
    pub fn evaluate(&self, prompt: &str, operator: &mut dyn Operator) -> Result<bool> {
        let estimate = self.estimator.estimate(prompt);
        log::debug!("Prompt estimate: {estimate} tokens (limit {})", self.limit);

        if estimate <= self.limit {
            return Ok(true);
        }

        eprintln!(
            "{}",
            format!(
                "The commit diff is too large for the model: about {estimate} tokens, max {} tokens.",
                self.limit
            )
            .yellow()
        );

        operator.confirm(
            &format!("Do you want to continue with {} tokens?", self.limit),
            true,
        )
    }
}
