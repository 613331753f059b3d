//! Trait definitions for the scrivano prompt chain library.
//!
//! This crate defines the capability traits backends implement
//! ([`TextGenerator`], [`ResearchProvider`]) and the execution records the
//! chain executor produces.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod execution;
mod traits;

pub use execution::{ChainExecution, ExecutionState, StepExecution};
pub use traits::{ResearchProvider, TextGenerator};
