//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! the forwarding loop runner and the subcommand handlers.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod diagnose_cmd;
pub mod pid_file;
pub mod presenter;
pub mod provider_cmd;
pub mod signals;

// Re-export commonly used types
pub use app::{
    run_forwarder, ForwardOptions, ForwarderError, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR,
};
pub use args::{Cli, Commands, ConfigAction};
pub use presenter::Presenter;
