use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::application::data::LogLevel;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Materialize and tear down fixture directory trees")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
    #[clap(long, short, global = true, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the root directory and the tree declared in a YAML file
    Prepare {
        /// Absolute root, or a name placed under the base directory
        root: PathBuf,
        /// YAML file declaring the tree
        #[clap(long, short)]
        tree: Option<PathBuf>,
        #[clap(long, short, default_value = "temp", value_enum)]
        base: BaseKind,
    },
    /// Delete the root directory and everything in it
    Cleanup {
        root: PathBuf,
        #[clap(long, short, default_value = "temp", value_enum)]
        base: BaseKind,
    },
}

/// Where relative roots are placed.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum BaseKind {
    #[default]
    Temp,
    Cwd,
}
