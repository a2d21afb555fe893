// mergo-cli/src/prompt.rs
//
// Interactive prompts with input deadlines and exact-token parsing.
//
// All stdin reads go through one detached reader thread feeding a channel,
// so a prompt that times out cannot leave a stale read competing with the
// next prompt for the user's input. Answers are matched against an
// enumerated token set per prompt; unrecognized input re-prompts once and
// then falls back to the documented default rather than best-guessing.

use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use mergo_core::MergePreference;

/// Serves prompt answers from a single background stdin reader.
pub struct Prompter {
    lines: Receiver<String>,
}

impl Prompter {
    /// Spawns the stdin reader thread. The thread is detached for the
    /// lifetime of the process; it parks on stdin between prompts.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("stdin-reader".to_string())
            .spawn(move || {
                let stdin = std::io::stdin();
                for line in stdin.lock().lines() {
                    let Ok(line) = line else { break };
                    if tx.send(line).is_err() {
                        break;
                    }
                }
            })
            .ok();
        Self { lines: rx }
    }

    fn show(prompt: &str) {
        print!("{prompt}");
        let _ = std::io::stdout().flush();
    }

    /// Asks and waits for a line without a deadline. `None` means stdin was
    /// closed.
    pub fn ask(&self, prompt: &str) -> Option<String> {
        Self::show(prompt);
        let answer = self.lines.recv().ok();
        if answer.is_none() {
            println!();
        }
        answer
    }

    /// Asks with a deadline. `None` means the deadline elapsed or stdin was
    /// closed; the caller resolves that with its default.
    pub fn ask_with_deadline(&self, prompt: &str, deadline: Duration) -> Option<String> {
        Self::show(prompt);
        match self.lines.recv_timeout(deadline) {
            Ok(line) => Some(line),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                println!();
                None
            }
        }
    }

    /// Asks a multiple-choice question: parse failures re-prompt once, then
    /// the default applies.
    pub fn ask_choice<T, P>(&self, prompt: &str, parse: P, default: T) -> T
    where
        T: Copy,
        P: Fn(&str) -> Option<T>,
    {
        for attempt in 0..2 {
            let Some(answer) = self.ask(prompt) else {
                return default;
            };
            if let Some(choice) = parse(&answer) {
                return choice;
            }
            if attempt == 0 {
                println!("Unrecognized answer '{}'.", answer.trim());
            }
        }
        log::info!("No recognized answer; using the default.");
        default
    }
}

impl Default for Prompter {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a merge-preference answer. Exact tokens only: `audio`/`a`,
/// `video`/`v`, `both`/`b`.
pub fn parse_preference(input: &str) -> Option<MergePreference> {
    match input.trim().to_ascii_lowercase().as_str() {
        "audio" | "a" => Some(MergePreference::Audio),
        "video" | "v" => Some(MergePreference::Video),
        "both" | "b" => Some(MergePreference::Both),
        _ => None,
    }
}

/// Parses a yes/no answer. Exact tokens only: `yes`/`y`, `no`/`n`.
pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}
