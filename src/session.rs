//! Line-oriented game session over any reader and writer.

use alembic_world::{GameState, Teardown};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{debug, info};

use crate::commands::{execute_command, parse_command, CommandOutput, GameCommand, INVALID};
use crate::config::AlembicConfig;

/// Result of feeding one line to a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The line was handled; print these lines.
    Output(CommandOutput),
    /// The player asked to leave.
    Exit,
}

/// What a finished session did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub lines_read: u64,
    pub invalid_lines: u64,
    /// True when the session ended on `Exit` rather than end of input.
    pub exited: bool,
    pub released: Teardown,
}

pub struct Session {
    state: GameState,
    prompt: Option<String>,
    lines_read: u64,
    invalid_lines: u64,
}

impl Session {
    pub fn new(config: &AlembicConfig) -> Self {
        Self {
            state: GameState::with_capacity(config.initial_capacity.max(1)),
            prompt: config.show_prompt.then(|| config.prompt.clone()),
            lines_read: 0,
            invalid_lines: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Parse and execute one line (without its line terminator).
    pub fn handle_line(&mut self, line: &str) -> Step {
        self.lines_read += 1;
        match parse_command(line) {
            Ok(GameCommand::Exit) => Step::Exit,
            Ok(cmd) => Step::Output(execute_command(&mut self.state, cmd)),
            Err(_) => {
                self.invalid_lines += 1;
                Step::Output(CommandOutput {
                    lines: vec![INVALID.to_string()],
                })
            }
        }
    }

    /// A line that is not UTF-8 can never name anything.
    fn reject_bytes(&mut self) -> Step {
        self.lines_read += 1;
        self.invalid_lines += 1;
        debug!(line = self.lines_read, "rejected non-UTF-8 line");
        Step::Output(CommandOutput {
            lines: vec![INVALID.to_string()],
        })
    }

    /// Run until `Exit` or end of input, then tear the state down.
    pub fn run<R: BufRead, W: Write>(mut self, mut input: R, output: &mut W) -> Result<SessionSummary> {
        let mut exited = false;
        let mut buf = Vec::new();
        loop {
            if let Some(prompt) = &self.prompt {
                output.write_all(prompt.as_bytes())?;
                output.flush().context("Failed to flush prompt")?;
            }
            buf.clear();
            let read = input
                .read_until(b'\n', &mut buf)
                .context("Failed to read command line")?;
            if read == 0 {
                break;
            }
            let step = match std::str::from_utf8(&buf) {
                Ok(text) => self.handle_line(text.trim_end_matches(['\n', '\r'])),
                Err(_) => self.reject_bytes(),
            };
            match step {
                Step::Exit => {
                    exited = true;
                    break;
                }
                Step::Output(out) => {
                    for text in &out.lines {
                        writeln!(output, "{text}")?;
                    }
                }
            }
        }
        output.flush()?;
        debug!(lines = self.lines_read, exited, "session finished");

        let released = self.state.teardown();
        info!(total = released.total(), "released game state");
        Ok(SessionSummary {
            lines_read: self.lines_read,
            invalid_lines: self.invalid_lines,
            exited,
            released,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(config: &AlembicConfig, input: &str) -> (String, SessionSummary) {
        let mut out = Vec::new();
        let summary = Session::new(config)
            .run(input.as_bytes(), &mut out)
            .expect("in-memory session");
        (String::from_utf8(out).expect("utf8 output"), summary)
    }

    #[test]
    fn prompts_before_every_read() {
        let (out, summary) = run(&AlembicConfig::default(), "Geralt loots 2 Rebis\nTotal ingredient ?\n");
        assert_eq!(out, ">> Alchemy ingredients obtained\n>> 2 Rebis\n>> ");
        assert!(!summary.exited);
        assert_eq!(summary.lines_read, 2);
        assert_eq!(summary.released.ingredients, 1);
    }

    #[test]
    fn exit_stops_reading() {
        let config = AlembicConfig {
            show_prompt: false,
            ..AlembicConfig::default()
        };
        let (out, summary) = run(&config, "Geralt loots 1 Rebis\nExit\nGeralt loots 1 Aether\n");
        assert_eq!(out, "Alchemy ingredients obtained\n");
        assert!(summary.exited);
        assert_eq!(summary.released.total(), 1);
    }

    #[test]
    fn bad_lines_print_invalid_and_continue() {
        let config = AlembicConfig {
            show_prompt: false,
            ..AlembicConfig::default()
        };
        let (out, summary) = run(&config, "Geralt dances\r\n\nTotal potion ?\n");
        assert_eq!(out, "INVALID\nINVALID\nNone\n");
        assert_eq!(summary.invalid_lines, 2);
    }

    #[test]
    fn non_utf8_line_is_invalid_and_session_continues() {
        let config = AlembicConfig {
            show_prompt: false,
            ..AlembicConfig::default()
        };
        let input: &[u8] = b"Geralt loots 1 Rebis\nGeralt loots 1 R\xffbis\nTotal ingredient ?\n";
        let mut out = Vec::new();
        let summary = Session::new(&config)
            .run(input, &mut out)
            .expect("bad bytes are not an I/O error");
        assert_eq!(
            String::from_utf8(out).expect("utf8 output"),
            "Alchemy ingredients obtained\nINVALID\n1 Rebis\n"
        );
        assert_eq!(summary.lines_read, 3);
        assert_eq!(summary.invalid_lines, 1);
        assert_eq!(summary.released.ingredients, 1);
    }
}
