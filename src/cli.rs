use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "window-position-saver")]
#[command(about = "Save the positions of open windows and restore them later")]
#[command(version)]
pub struct Cli {
    /// Directory holding settings, layouts and logs.
    #[arg(long, global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the visible windows that a layout would record.
    List,
    /// Record the geometry of every visible window.
    Save {
        /// File name inside the layout directory; defaults to a timestamped name.
        #[arg(long, value_name = "FILE")]
        name: Option<String>,
    },
    /// List saved layout files.
    Layouts,
    /// Print the entries of a saved layout.
    Show {
        #[arg(value_name = "LAYOUT")]
        layout: String,
    },
    /// Move windows back to the positions stored in a layout.
    Restore {
        #[arg(value_name = "LAYOUT")]
        layout: String,
    },
    /// Print or clear the application log.
    Logs {
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        query: Option<String>,
        #[arg(long, conflicts_with_all = ["limit", "query"])]
        clear: bool,
    },
}
