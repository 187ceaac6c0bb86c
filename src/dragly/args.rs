use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dragly")]
#[command(about = "Queue text snippets, then spend them by copying them out", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the queue data (overrides DRAGLY_HOME)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a snippet to the front of the queue
    #[command(alias = "a")]
    Add {
        /// Snippet text (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List queued snippets
    #[command(alias = "ls")]
    List {
        /// Hide used snippets
        #[arg(long)]
        active: bool,
    },

    /// Replace the text of a snippet
    #[command(alias = "e")]
    Edit {
        /// Index of the snippet
        index: String,

        /// New text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Flip snippets between active and used
    #[command(alias = "t")]
    Toggle {
        /// Indexes of the snippets (e.g. 1 3 2-4)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Mark snippets as used
    #[command(alias = "u")]
    Used {
        /// Indexes of the snippets (e.g. 1 3 2-4)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Remove snippets from the queue
    #[command(alias = "rm")]
    Remove {
        /// Indexes of the snippets (e.g. 1 3 2-4)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Copy a snippet to the clipboard and mark it used
    #[command(alias = "c")]
    Copy {
        /// Index of the snippet (defaults to the first active one)
        index: Option<String>,

        /// Print the text instead of using the system clipboard
        #[arg(long)]
        print: bool,
    },

    /// Move a snippet to another position
    #[command(alias = "mv")]
    Move {
        /// Index of the snippet
        index: String,

        /// Target position (1 is the front)
        to: String,
    },

    /// Remove used snippets (or everything with --all)
    Clear {
        /// Remove every snippet, not only used ones
        #[arg(long)]
        all: bool,
    },

    /// Print the path of the queue file
    Path,
}
