pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "launch-atlas")]
#[command(about = "Upcoming space launches with live countdowns", long_about = None)]
pub struct Cli {
    /// Keep liked launches in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Config file (default: ~/.config/launch-atlas/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct FeedArgs {
    /// Only launches by this agency
    #[arg(short, long)]
    pub agency: Option<String>,

    /// Only liked launches
    #[arg(short, long)]
    pub liked: bool,

    /// Number of pages to load
    #[arg(short, long, default_value_t = 1)]
    pub pages: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List upcoming launches
    List {
        #[command(flatten)]
        feed: FeedArgs,
    },
    /// List agencies present in the loaded launches
    Agencies {
        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: usize,
    },
    /// Like or unlike a launch
    Like {
        /// Launch id
        id: String,
    },
    /// List liked launch ids
    Liked,
    /// Open a launch's stream or info page in the browser
    Open {
        /// Launch id
        id: String,

        /// Number of pages to search
        #[arg(short, long, default_value_t = 1)]
        pages: usize,
    },
    /// Show live countdowns until interrupted
    Watch {
        #[command(flatten)]
        feed: FeedArgs,
    },
}
