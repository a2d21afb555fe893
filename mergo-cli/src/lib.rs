// mergo-cli/src/lib.rs
//
// Library portion of the Mergo CLI application.
// Contains argument definitions, prompts, and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod prompt;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, MergeArgs};
pub use commands::merge::run_merge_command;
