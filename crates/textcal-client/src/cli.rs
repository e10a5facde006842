//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// textcal - Turn extracted event JSON into a Google Calendar link
#[derive(Debug, Parser)]
#[command(name = "textcal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "TEXTCAL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Options for the default `link` command
    #[command(flatten)]
    pub link: LinkArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Resolves the command to run; no subcommand means `link`.
    ///
    /// Link options given before a subcommand would otherwise be dropped, so
    /// they are an error.
    pub fn into_command(self) -> Result<Command, String> {
        match self.command {
            None => Ok(Command::Link(self.link)),
            Some(command) if self.link == LinkArgs::default() => Ok(command),
            Some(_) => Err(
                "link options must follow the `link` subcommand or be used without a subcommand"
                    .to_string(),
            ),
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate extracted event JSON and print its calendar link (default)
    Link(LinkArgs),

    /// Print the structured-output schema for the extraction service
    Schema,

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Input and output options for building a link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct LinkArgs {
    /// JSON file with the extracted event; reads stdin when absent or `-`
    pub input: Option<PathBuf>,

    /// Print the validated event and link as JSON
    #[arg(long)]
    pub json: bool,

    /// Open the link in the default browser
    #[arg(long)]
    pub open: bool,

    /// Copy the link to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Reject time zones outside the configured allow-list
    #[arg(long)]
    pub enforce_time_zones: bool,
}

impl LinkArgs {
    /// Returns whether any action flag is set.
    pub fn has_action(&self) -> bool {
        self.open || self.copy
    }

    /// Returns the input file, or `None` for stdin.
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|path| path.as_os_str() != "-")
    }
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
