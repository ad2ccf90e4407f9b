use crate::cli_args::Provider;
use crate::config::Config;
use crate::error::AppError;
use crate::llm::LlmClient;
use crate::llm::gemini::{self, GeminiClient};
use crate::llm::noop::NoopClient;
use crate::llm::openai::{self, OpenAiClient};
use log::debug;

/// Build the LLM client based on CLI + config.
pub fn build_llm_client(cfg: &Config) -> Result<Box<dyn LlmClient>, AppError> {
    if cfg.no_model {
        debug!("Using NoopClient (no model calls).");
        return Ok(Box::new(NoopClient));
    }

    let key = cfg.api_key.clone().ok_or_else(|| {
        AppError::Configuration(format!("no API key configured for {}", cfg.provider.as_str()))
    })?;

    debug!("Using {} with model: {}", cfg.provider.as_str(), cfg.model);

    let client: anyhow::Result<Box<dyn LlmClient>> = match cfg.provider {
        Provider::Gemini => {
            let base = cfg.api_base_url.as_deref().unwrap_or(gemini::DEFAULT_BASE_URL);
            GeminiClient::new(key, cfg.model.clone(), base)
                .map(|c| Box::new(c) as Box<dyn LlmClient>)
        }
        Provider::Openai => {
            let base = cfg
                .api_base_url
                .clone()
                .unwrap_or_else(|| openai::DEFAULT_BASE_URL.to_string());
            OpenAiClient::new(key, cfg.model.clone(), base)
                .map(|c| Box::new(c) as Box<dyn LlmClient>)
        }
    };

    client.map_err(|e| AppError::Configuration(AppError::chain(&e)))
}
