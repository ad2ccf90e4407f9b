use crate::cli_args::{Cli, Provider};
use crate::error::AppError;
use clap::ValueEnum;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Default prompt size budget, in estimated tokens.
pub const DEFAULT_TOKEN_LIMIT: usize = 1_048_576;

pub const DEFAULT_LANGUAGE: &str = "english";

/// Inputs the commit workflow runs with, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub language: String,
    pub template: Option<String>,
    pub commit_type: Option<String>,
    /// `Some(n)` puts the run in list mode with `n` candidates.
    pub candidate_count: Option<usize>,
    pub force: bool,
    pub token_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            language: DEFAULT_LANGUAGE.to_string(),
            template: None,
            commit_type: None,
            candidate_count: None,
            force: false,
            token_limit: DEFAULT_TOKEN_LIMIT,
        }
    }
}

/// Final resolved configuration for aicommit.
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: Provider,
    pub model: String,
    /// `None` only when model calls are disabled.
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
    pub no_model: bool,
    pub settings: Settings,
}

impl Config {
    /// Build the final config from CLI flags, environment, TOML file, and defaults.
    ///
    /// Precedence:
    ///   1. CLI flags
    ///   2. Environment variables
    ///   3. TOML `~/.config/aicommit.toml`
    ///   4. Hardcoded defaults
    pub fn from_sources(cli: &Cli) -> Result<Self, AppError> {
        let file_cfg = load_file_config().unwrap_or_default();
        Self::resolve(cli, |key| env::var(key).ok(), file_cfg)
    }

    pub fn resolve<E>(cli: &Cli, env_var: E, file_cfg: FileConfig) -> Result<Self, AppError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let provider = match cli.provider {
            Some(p) => p,
            None => match env_var("AI_COMMIT_PROVIDER") {
                Some(raw) => Provider::from_str(&raw, true).map_err(|_| {
                    AppError::Configuration(format!("unknown provider {raw:?} in AI_COMMIT_PROVIDER"))
                })?,
                None => file_cfg.provider.unwrap_or(Provider::Gemini),
            },
        };

        let model = cli
            .model
            .clone()
            .or_else(|| env_var("AI_COMMIT_MODEL"))
            .or(file_cfg.model)
            .unwrap_or_else(|| default_model(provider).to_string());

        let no_model = cli.no_model || model.eq_ignore_ascii_case("none");

        let key_var = api_key_var(provider);
        let api_key = cli
            .api_key
            .clone()
            .or_else(|| env_var(key_var))
            .or(file_cfg.api_key)
            .filter(|k| !k.trim().is_empty());

        if api_key.is_none() && !no_model {
            return Err(AppError::Configuration(format!(
                "please set the {key_var} environment variable (or pass --api-key)"
            )));
        }

        let language = cli
            .language
            .clone()
            .or_else(|| env_var("AI_COMMIT_LANGUAGE"))
            .or(file_cfg.language)
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        let template = cli
            .template
            .clone()
            .or_else(|| env_var("AI_COMMIT_COMMIT_TEMPLATE"))
            .or(file_cfg.template);

        let token_limit = match cli.token_limit {
            Some(limit) => limit,
            None => match env_var("AI_COMMIT_TOKEN_LIMIT") {
                Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                    AppError::Configuration(format!(
                        "AI_COMMIT_TOKEN_LIMIT must be a positive integer, got {raw:?}"
                    ))
                })?,
                None => file_cfg.token_limit.unwrap_or(DEFAULT_TOKEN_LIMIT),
            },
        };

        if cli.list == Some(0) {
            return Err(AppError::Configuration(
                "--list needs at least one candidate".to_string(),
            ));
        }

        let api_base_url = cli
            .api_base_url
            .clone()
            .or(file_cfg.api_base_url);

        Ok(Config {
            provider,
            model,
            api_key: if no_model { None } else { api_key },
            api_base_url,
            no_model,
            settings: Settings {
                language,
                template,
                commit_type: cli.commit_type.clone(),
                candidate_count: cli.list,
                force: cli.force,
                token_limit,
            },
        })
    }
}

/// Environment variable holding the credential for a provider.
pub fn api_key_var(provider: Provider) -> &'static str {
    match provider {
        Provider::Gemini => "GOOGLE_GENERATIVE_AI_API_KEY",
        Provider::Openai => "OPENAI_API_KEY",
    }
}

fn default_model(provider: Provider) -> &'static str {
    match provider {
        Provider::Gemini => "gemini-1.5-flash-latest",
        Provider::Openai => "gpt-4o-mini",
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub provider: Option<Provider>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
    pub language: Option<String>,
    pub template: Option<String>,
    pub token_limit: Option<usize>,
}

/// Return `~/.config/aicommit.toml`
fn config_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("aicommit.toml"))
}

fn load_file_config() -> Option<FileConfig> {
    let path = config_path()?;
    if !path.exists() {
        return None;
    }

    let data = fs::read_to_string(&path).ok()?;
    match toml::from_str::<FileConfig>(&data) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            log::warn!("Ignoring unreadable config file {}: {e}", path.display());
            None
        }
    }
}
