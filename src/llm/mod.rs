pub mod gemini;
pub mod noop;
pub mod openai;
mod prompts;
pub mod prompt_builder;
mod stream;

use anyhow::Result;

pub use prompts::CANDIDATE_DELIMITER;

/// Text fragments of one model answer, in arrival order.
pub type FragmentStream<'a> = Box<dyn Iterator<Item = Result<String>> + 'a>;

/// Trait for talking to an LLM.
pub trait LlmClient: Send + Sync {
    /// Short name used in progress output and logs.
    fn name(&self) -> &str;

    /// Send `prompt` and stream back the answer.
    fn generate(&self, prompt: &str) -> Result<FragmentStream<'_>>;
}
