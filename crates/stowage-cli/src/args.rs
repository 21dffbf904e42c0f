use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// stowage - store files in a hash-sharded upload tree
#[derive(Parser, Debug)]
#[command(name = "stowage")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Store settings (JSON). Defaults apply when omitted.
    #[arg(short = 'c', long = "config", env = "STOWAGE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Directory the `@runtime` alias points to
    #[arg(long = "runtime-dir", env = "STOWAGE_RUNTIME_DIR", global = true)]
    pub runtime_dir: Option<PathBuf>,

    /// Override the configured base directory
    #[arg(long = "base-dir", global = true)]
    pub base_dir: Option<String>,

    /// Override the configured shard depth
    #[arg(long = "depth", global = true)]
    pub depth: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print where files with these names would be stored
    PathFor {
        #[arg(required = true)]
        filenames: Vec<String>,
    },

    /// Copy local files into the upload tree, one record per file
    Store {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Form name of the record the files are attached to
        #[arg(long = "form", default_value = "Upload")]
        form: String,

        /// Attribute receiving the file (defaults to the first tracked attribute)
        #[arg(long = "attribute")]
        attribute: Option<String>,

        /// Stored path the record held before; removed once the new file is stored.
        /// Only valid with a single file.
        #[arg(long = "replace")]
        replace: Option<String>,
    },

    /// Remove stored files the way a record delete would
    Remove {
        #[arg(required = true)]
        paths: Vec<String>,

        /// Attribute that held the paths (defaults to the first tracked attribute)
        #[arg(long = "attribute")]
        attribute: Option<String>,
    },
}
