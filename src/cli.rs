use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "skycast", version, about = "Terminal weather dashboard")]
pub struct Cli {
    #[arg(long, global = true, help = "Config file (defaults to the user config directory)")]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, help = "Weather API base URL, overrides the config file")]
    pub api_url: Option<String>,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the locations the weather API knows about
    Locations,
    /// Fetch and show the weather for one location
    Show {
        location: String,
        #[arg(long, help = "Print the parsed report as JSON")]
        json: bool,
        #[arg(long, help = "Do not echo the raw report text")]
        no_raw: bool,
    },
    /// Parse a report text from a file or stdin without contacting the API
    Parse {
        #[arg(help = "Report file; reads stdin when omitted")]
        file: Option<PathBuf>,
        #[arg(long, default_value = "Unknown location", help = "Location label used when the report has no header")]
        fallback: String,
        #[arg(long, help = "Print the parsed report as JSON")]
        json: bool,
    },
    /// Interactive dashboard (default)
    Interactive,
    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a default config file
    Init {
        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },
    /// Print the effective configuration
    Show,
    /// Check the configuration and report problems
    Validate,
}
