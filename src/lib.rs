//! Text front end for the alchemy game: command grammar, rendering and the
//! interactive session.

pub mod commands;
pub mod config;
pub mod session;

pub use commands::{execute_command, parse_command, CommandError, CommandOutput, GameCommand};
pub use config::AlembicConfig;
pub use session::{Session, SessionSummary, Step};
