//! Core data types for requested packages and supported file dialects.
//!
//! - [`Package`] - A package name and the version it should be pinned to
//! - [`Dialect`] - One of the supported file syntaxes (YAML, HCL, dotenv)

mod dialect;
mod package;

pub use dialect::*;
pub use package::*;
