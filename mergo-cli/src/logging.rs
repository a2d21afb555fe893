// mergo-cli/src/logging.rs
//
// Logging setup for the Mergo CLI. The application uses the standard `log`
// facade with env_logger as the backend, driven by RUST_LOG:
// - RUST_LOG=info (default): normal run output
// - RUST_LOG=debug: ffmpeg commands and per-step details

use std::io::Write;

use env_logger::Env;
use log::Level;

/// Initializes env_logger with a terminal-friendly format.
///
/// Info-level lines are the tool's normal output, so they print bare;
/// warnings and errors keep their level prefix.
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            if record.level() <= Level::Warn {
                writeln!(buf, "{}: {}", record.level(), record.args())
            } else {
                writeln!(buf, "{}", record.args())
            }
        })
        .target(env_logger::Target::Stdout)
        .init();
}
