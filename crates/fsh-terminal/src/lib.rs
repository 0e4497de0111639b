//! Command interpreter and file operations.
//!
//! The shell reads one line at a time, splits it with a quote-aware
//! tokenizer, and routes the first token to a fixed set of file operations.
//! Every operation answers with a printable string; failures are messages,
//! not errors crossing the loop.

mod catalog;
mod file_commands;
mod interpreter;
mod listing;

/// Usage/description pair shown by `help`.
pub use catalog::CommandDescriptor;
/// The fixed command catalog in display order.
pub use catalog::commands;
/// Format the catalog (optionally filtered to one command).
pub use catalog::render_help;
/// File operations bound to a working directory.
pub use file_commands::FileOps;
/// Outcome of dispatching one line.
pub use interpreter::Flow;
/// The read-eval-print loop.
pub use interpreter::Shell;
/// Quote-aware line splitter.
pub use interpreter::tokenize;
/// Fixed console strings (banner, prompt, farewell).
pub use interpreter::{FAREWELL, PROMPT, WELCOME};
/// One enumerated directory level.
pub use listing::{DirectoryListing, Subdirectory};
