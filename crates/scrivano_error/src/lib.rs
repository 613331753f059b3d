//! Error types for the scrivano library.
//!
//! This crate provides the foundation error types used throughout the
//! scrivano workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean
//! error handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use scrivano_error::{ScrivanoResult, BackendError};
//!
//! fn fetch_completion() -> ScrivanoResult<String> {
//!     Err(BackendError::timeout("no response after 60s"))?
//! }
//!
//! match fetch_completion() {
//!     Ok(text) => println!("Got: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod builder;
mod chain;
mod config;
mod error;
mod json;

pub use backend::{BackendError, BackendErrorKind};
pub use builder::{BuilderError, BuilderErrorKind};
pub use chain::{ChainError, ChainErrorKind};
pub use config::ConfigError;
pub use error::{ScrivanoError, ScrivanoErrorKind, ScrivanoResult};
pub use json::JsonError;
