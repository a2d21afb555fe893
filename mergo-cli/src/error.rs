// mergo-cli/src/error.rs
//
// CLI error handling: the CLI reuses the core error type directly, which
// keeps error display consistent between library and binary.

use mergo_core::CoreResult;

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;
