mod aggregator;
mod app;
mod cli_args;
mod config;
mod error;
mod git;
mod llm;
mod logging;
mod operator;
mod pipeline;
mod selection;
mod setup;
mod sink;
mod template;
mod token_gate;

#[cfg(test)]
mod testing;

use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

use crate::cli_args::Cli;
use crate::config::Config;
use crate::error::AppError;
use crate::git::GitCli;
use crate::operator::TerminalOperator;

fn run(cli: &Cli) -> Result<(), AppError> {
    // Credentials are checked before touching the repository.
    let config = Config::from_sources(cli)?;
    let llm = setup::build_llm_client(&config)?;

    let mut operator = TerminalOperator::new();
    app::commit_staged_changes(&config.settings, &GitCli::default(), llm.as_ref(), &mut operator)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.to_string().red());
            ExitCode::FAILURE
        }
    }
}
