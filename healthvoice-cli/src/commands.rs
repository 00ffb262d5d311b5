use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Voice/text symptom checker backed by an OpenAI-compatible chat endpoint.
#[derive(Debug, Parser)]
#[command(name = "healthvoice", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (default: platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the configured model identifier
    #[arg(long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Override the configured endpoint base URL
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Do not read the result aloud
    #[arg(long, global = true)]
    pub no_speech: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Diagnose one symptom description and exit
    Diagnose {
        /// Symptom description; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        symptoms: Vec<String>,

        /// Treat the input as a speech-to-text transcript
        #[arg(long)]
        transcript: bool,

        /// Print the outcome as JSON instead of status lines
        #[arg(long)]
        json: bool,
    },

    /// Read symptom descriptions line by line from stdin
    Interactive,

    /// Manage the API key stored in the OS keyring
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum KeyAction {
    /// Store a key (reads from stdin when VALUE is omitted)
    Set { value: Option<String> },
    /// Remove the stored key
    Clear,
    /// Report where the key would be taken from
    Status,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the configuration file location
    Path,
    /// Print the effective configuration
    Show,
    /// Write the default configuration if none exists
    Init,
}
