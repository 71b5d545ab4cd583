//! Worker tasks that back the runtime orchestration.
//!
//! The session worker owns everything that touches the transfer resource,
//! while the ticker drives the periodic tick from inside the runtime.

mod session;
mod ticker;

pub use session::{Command, SessionWorker};
pub use ticker::TickerWorker;
