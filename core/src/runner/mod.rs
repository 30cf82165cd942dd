//! Bounded execution of one external process: spawn, drain both output
//! streams through gobbler tasks, enforce an optional wall-clock timeout,
//! and report a structured result.

mod execute;
mod io_pump;
mod listener;
pub mod types;

pub use execute::{execute, KILL_GRACE};
pub use listener::{ExecutionListener, TailListener};
pub use types::{ExecutionResult, ProcessSpec, StreamRedirect};
