use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Debug, Parser)]
#[command(name = "brewdeck", version, about = "Browse, install and manage Homebrew packages")]
pub struct Cli {
    /// Homebrew command line to run (e.g. "arch -x86_64 /usr/local/bin/brew")
    #[arg(long, env = "BREWDECK_BREW")]
    pub brew: Option<String>,

    /// Write logs here instead of the default data directory
    #[arg(long, env = "BREWDECK_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Use ASCII symbols instead of Nerd Font glyphs
    #[arg(long)]
    pub ascii: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
