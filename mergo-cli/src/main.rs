// mergo-cli/src/main.rs
//
// Entry point for the Mergo CLI: parses arguments, initializes logging,
// dispatches the command, and maps the result to the process exit code
// (0 on completion, including no-op and degraded runs; 1 on a propagated
// error, with the error surfaced).

use std::io::IsTerminal;
use std::process;

use clap::Parser;

use mergo_cli::{logging, run_merge_command, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init();

    let result = match cli.command {
        Commands::Merge(args) => {
            // Clear the screen before the first prompt, but only when
            // actually talking to a person.
            if !args.non_interactive && std::io::stdin().is_terminal() {
                let _ = console::Term::stdout().clear_screen();
            }
            run_merge_command(args)
        }
    };

    if let Err(e) = result {
        mergo_core::terminal::print_error("Fatal error", &e.to_string(), None);
        process::exit(1);
    }
}
