//! textcal CLI entry point.

use std::path::Path;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use textcal_core::tracing::init_tracing;

use textcal_client::cli::{Cli, Command, ConfigAction};
use textcal_client::config::ClientConfig;
use textcal_client::error::{ClientError, ClientResult};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration first: it decides how logs look
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_tracing(config.tracing_config(cli.debug)) {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }

    let command = match cli.into_command() {
        Ok(command) => command,
        Err(msg) => Cli::command().error(ErrorKind::ArgumentConflict, msg).exit(),
    };

    match run(command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> ClientResult<ClientConfig> {
    match path {
        Some(path) => ClientConfig::load_from(path).map_err(ClientError::Config),
        None => ClientConfig::load().map_err(ClientError::Config),
    }
}

fn run(command: Command, config: &ClientConfig) -> ClientResult<()> {
    match command {
        Command::Link(args) => textcal_client::commands::link::run(&args, config),
        Command::Schema => textcal_client::commands::schema::print(config),
        Command::Config { action } => match action {
            ConfigAction::Dump => textcal_client::commands::config::dump(config),
            ConfigAction::Validate => textcal_client::commands::config::validate(config),
            ConfigAction::Path => textcal_client::commands::config::path(),
        },
    }
}
