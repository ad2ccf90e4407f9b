use clap::{ArgAction, ArgGroup, Parser, ValueEnum};
use serde::Deserialize;

/// Which hosted model API to talk to.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Gemini,
    Openai,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::Openai => "openai",
        }
    }
}

/// CLI options
#[derive(Parser, Debug)]
#[command(
    name = "aicommit",
    version,
    about = "Generate a conventional commit message for your staged changes with an LLM"
)]
#[command(group(
    ArgGroup::new("model_group")
        .args(["model", "no_model"])
        .multiple(false)
))]
pub struct Cli {
    /// API key for the selected provider (otherwise read from the provider's env var)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Natural language the message is written in (default: english)
    #[arg(long)]
    pub language: Option<String>,

    /// Message template, e.g. "[{GIT_BRANCH}] {COMMIT_MESSAGE}"
    #[arg(long)]
    pub template: Option<String>,

    /// Pin the conventional commit type (feat, fix, chore, ...)
    #[arg(long)]
    pub commit_type: Option<String>,

    /// Offer COUNT candidate messages to pick from (default 5)
    #[arg(long, value_name = "COUNT", num_args = 0..=1, default_missing_value = "5")]
    pub list: Option<usize>,

    /// Commit without asking for confirmation (single-message mode only)
    #[arg(long)]
    pub force: bool,

    /// Largest prompt, in estimated tokens, sent without asking first
    #[arg(long)]
    pub token_limit: Option<usize>,

    /// Model provider
    #[arg(long, value_enum)]
    pub provider: Option<Provider>,

    /// Model name to use. If 'none', acts like --no-model.
    #[arg(long)]
    pub model: Option<String>,

    /// Override the provider's API base URL (OpenAI-compatible servers)
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Disable model calls; return a dummy message instead
    #[arg(long)]
    pub no_model: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
