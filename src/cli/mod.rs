//! CLI interface

pub mod commands;
pub mod display;
pub mod runner;

pub use commands::{Cli, Commands, ShellLine};
pub use runner::{execute, resolve_id, run_shell, update_config};
