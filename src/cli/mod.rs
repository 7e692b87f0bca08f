//! Command-line interface, parsed with clap.

use clap::{Parser, Subcommand};

/// Drafter - fantasy league server
#[derive(Parser)]
#[command(name = "drafter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the web server (default)
    Serve {
        /// Listen on this port instead of the configured one
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

impl Cli {
    /// The command to run, falling back to `serve`.
    #[must_use]
    pub fn command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Serve { port: None })
    }
}
