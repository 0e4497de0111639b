//! Foundation types for fsh.
//!
//! Shared by every crate in the workspace: the error enum whose `Display`
//! doubles as the user-facing message, and the configuration layer that
//! yields the working directory.

pub mod config;
pub mod error;
