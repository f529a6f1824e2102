//! Game state and the transactional rules that change it.

mod actions;
mod command;
mod error;
mod queries;
mod snapshot;
mod state;

pub use actions::*;
pub use command::*;
pub use error::*;
pub use queries::*;
pub use snapshot::*;
pub use state::*;
