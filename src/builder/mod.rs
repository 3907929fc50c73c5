//! Builder API for assembling and validating state machines.
//!
//! This module provides the fluent [`MachineBuilder`], the
//! [`name_enum!`](crate::name_enum) macro for typed names, and the errors a
//! definition can fail with.

pub mod error;
pub mod machine;
pub mod macros;
mod validate;

pub use error::{BuildError, DefinitionError, UnknownName};
pub use machine::MachineBuilder;
