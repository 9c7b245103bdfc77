use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::pipeline::DEFAULT_TOP_WORDS;

/// Public first-name table (`name,classification`) used when none is configured.
pub const DEFAULT_NAME_TABLE: &str =
    "https://raw.githubusercontent.com/amandaventurac/conta_comment_insta/main/nomes.csv";

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Extract, clean and tally comment threads from saved social-media pages", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub names: NameTableArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct NameTableArgs {
    /// URL or local path of the name,classification CSV
    #[arg(long = "name-table", env = "NAME_TABLE_SOURCE", default_value = DEFAULT_NAME_TABLE, global = true)]
    pub name_table: String,

    /// Timeout for fetching the name table (e.g. "10s", "500ms")
    #[arg(long = "name-table-timeout", env = "NAME_TABLE_TIMEOUT", default_value = "10s", value_parser = humantime::parse_duration, global = true)]
    pub name_table_timeout: Duration,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Process a saved HTML page into comment and word tables
    Process {
        /// Saved HTML page
        input: PathBuf,

        /// Directory for comments.csv, words.csv and processing.log
        #[arg(long = "output-dir", env = "OUTPUT_DIR", default_value = "./output")]
        output_dir: PathBuf,
    },
    /// Re-import exported tables, re-clean them and print a summary
    Analyze {
        /// Previously exported comments table
        #[arg(long = "comments")]
        comments: PathBuf,

        /// Previously exported word-frequency table
        #[arg(long = "words")]
        words: Option<PathBuf>,

        /// Number of top words in the summary
        #[arg(long = "top-words", env = "TOP_WORDS", default_value_t = DEFAULT_TOP_WORDS)]
        top_words: usize,

        /// Print the summary as JSON
        #[arg(long = "json")]
        json: bool,
    },
}

impl Cli {
    /// Loads `.env` (if present) and parses the command line.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }
}
