//! The running state machine.
//!
//! - **Machine**: resolves fired events, runs enter/exit actions and follows
//!   enter-action redirects
//! - **Observer**: weakly held receiver of error and timeout notifications
//! - **Timer**: the single per-state timeout, driven by the host

mod error;
mod machine;
mod observer;
mod timer;

pub use error::FireError;
pub use machine::Machine;
pub use observer::MachineObserver;
