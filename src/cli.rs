use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "t9press")]
#[command(about = "t9press - Predictive text suggestions for phone keypad digit sequences.")]
#[command(version = env!("VERSION"))]
pub struct Cli {
    /// Path to one or more config files (merged in order). Built-in defaults
    /// are used if none is given.
    #[arg(long, action = clap::ArgAction::Append)]
    pub config: Vec<PathBuf>,

    /// Word list to load instead of the configured or bundled one.
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    /// Number of suggestions per query.
    #[arg(short, long)]
    pub num: Option<usize>,

    /// Abort loading on the first word that can't be stored.
    #[arg(long)]
    pub strict: bool,

    /// Print results as JSON.
    #[arg(long)]
    pub json: bool,

    /// Extra word to suggest, ranked after every corpus word. Can be repeated.
    #[arg(long, action = clap::ArgAction::Append)]
    pub add: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a sample config file.
    NewConfig {
        /// Output path for config file.
        #[arg(short, long, default_value = "config.toml")]
        path: PathBuf,
    },

    /// Look up the best words for a digit sequence and exit.
    Query {
        /// Key sequence, digits 2-9 (or a word with --letters).
        digits: String,

        /// Treat the argument as letters and encode it first.
        #[arg(long)]
        letters: bool,
    },

    /// Print corpus and trie statistics.
    Stats,

    /// Print the trie in graphviz dot format.
    Graph,
}
