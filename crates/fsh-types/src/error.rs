//! Error types for fsh.
//!
//! Every variant renders as the exact sentence shown to the user, so the
//! shell can turn any failure into its printed result with `to_string()`.

use std::io;

/// Errors produced by fsh.
#[derive(Debug, thiserror::Error)]
pub enum FshError {
    #[error("Missing argument for '{command}'. Usage: {usage}.")]
    MissingArgument { command: String, usage: String },

    #[error("Too many arguments for '{command}'. Usage: {usage}.")]
    TooManyArguments { command: String, usage: String },

    #[error("Invalid arguments for '{command}'. Usage: {usage}.")]
    InvalidUsage { command: String, usage: String },

    #[error("The file name '{name}' contains the invalid character '{ch}'.")]
    InvalidName { name: String, ch: char },

    #[error("The file '{0}' does not exist.")]
    NotFound(String),

    #[error("The directory '{0}' does not exist.")]
    DirectoryNotFound(String),

    #[error("The file '{0}' already exists.")]
    AlreadyExists(String),

    #[error("Cannot move the file: a file named '{0}' already exists at the destination.")]
    DestinationExists(String),

    #[error("The destination directory '{0}' does not exist.")]
    ParentMissing(String),

    #[error(
        "The destination file name must match the source file name. \
         Source '{source_name}', destination '{destination_name}'."
    )]
    NameMismatch {
        source_name: String,
        destination_name: String,
    },

    #[error("The path cannot be empty.")]
    EmptyPath,

    #[error("Unrecognized command. Type 'help' to see the available commands.")]
    UnrecognizedCommand,

    #[error("Could not open the directory: {0}")]
    Launch(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, FshError>;
