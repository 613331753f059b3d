//! Core data types for the scrivano prompt chain library.
//!
//! This crate provides the foundation data types shared by every scrivano
//! interface: prompt templates, binding sets, per-step memory logs, and
//! the completion request/response pair.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod binding;
mod memory;
mod request;
mod template;

pub use binding::BindingSet;
pub use memory::{MemoryEntry, MemoryLog};
pub use request::{
    CompletionRequest, CompletionRequestBuilder, CompletionResponse, FinishReason,
};
pub use template::PromptTemplate;
