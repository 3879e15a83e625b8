mod cli_config;

pub use cli_config::{BaseKind, Cli, Command};
