use super::{FragmentStream, LlmClient};
use anyhow::Result;

/// No-op / dummy model client for development with --no-model or model=none.
pub struct NoopClient;

impl LlmClient for NoopClient {
    fn name(&self) -> &str {
        "none"
    }

    fn generate(&self, prompt: &str) -> Result<FragmentStream<'_>> {
        log::debug!("NoopClient ignoring a {}-byte prompt", prompt.len());
        let fragments = vec![Ok("chore: dummy commit message ".to_string()), Ok("(LLM disabled)".to_string())];
        Ok(Box::new(fragments.into_iter()))
    }
}
