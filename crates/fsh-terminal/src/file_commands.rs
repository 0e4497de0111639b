//! File operations: tch, mv, ls, cd.
//!
//! Each public operation takes the whole token list (`args[0]` is the
//! command name as typed) and returns the message to print. The fallible
//! work lives in `try_*` helpers; their errors are rendered at the boundary.

use std::cmp::Ordering;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use fsh_platform::Launcher;
use fsh_types::error::{FshError, Result};

use crate::listing;

/// Characters rejected in file names created by `tch`.
const RESERVED_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// File operations bound to one working directory.
pub struct FileOps {
    working_dir: PathBuf,
    launcher: Box<dyn Launcher>,
}

impl FileOps {
    /// Bind the operations to `working_dir`, opening directories via `launcher`.
    pub fn new(working_dir: impl Into<PathBuf>, launcher: Box<dyn Launcher>) -> Self {
        Self {
            working_dir: working_dir.into(),
            launcher,
        }
    }

    /// The base directory for relative arguments.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// `tch <name>`: create an empty file.
    pub fn create(&self, args: &[&str]) -> String {
        render(self.try_create(args))
    }

    /// `mv <a> <b>`: rename in place, or move into another directory.
    pub fn rename_or_move(&self, args: &[&str]) -> String {
        render(self.try_rename_or_move(args))
    }

    /// `ls` / `ls -R`: list the working directory.
    pub fn list(&self, args: &[&str]) -> String {
        render(self.try_list(args))
    }

    /// `cd <path>`: open a directory in the OS file browser.
    pub fn open_directory(&self, args: &[&str]) -> String {
        render(self.try_open_directory(args))
    }

    fn resolve(&self, arg: &str) -> PathBuf {
        self.working_dir.join(arg)
    }

    fn try_create(&self, args: &[&str]) -> Result<String> {
        let command = command_name(args);
        let usage = format!("{command} [nombre de archivo]");
        check_arity(args, 2, &usage)?;

        let name = args[1];
        if name.is_empty() {
            return Err(FshError::MissingArgument {
                command: command.to_string(),
                usage,
            });
        }
        validate_file_name(name)?;

        let path = self.resolve(name);
        if path.exists() {
            return Err(FshError::AlreadyExists(name.to_string()));
        }
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => FshError::AlreadyExists(name.to_string()),
                _ => FshError::Io(e),
            })?;

        log::debug!("Created {}", path.display());
        Ok(format!("File '{name}' created successfully."))
    }

    fn try_rename_or_move(&self, args: &[&str]) -> Result<String> {
        let command = command_name(args);
        let usage = format!("{command} [archivo1] [archivo2] or {command} [path1] [path2]");
        check_arity(args, 3, &usage)?;

        let (src_arg, dst_arg) = (args[1], args[2]);
        let has_path = contains_separator(src_arg) || contains_separator(dst_arg);
        let source = self.resolve(src_arg);
        let destination = self.resolve(dst_arg);

        if !source.is_file() {
            return Err(FshError::NotFound(src_arg.to_string()));
        }

        if !has_path {
            if destination.exists() {
                return Err(FshError::AlreadyExists(dst_arg.to_string()));
            }
            move_file(&source, &destination)?;
            log::debug!("Renamed {} -> {}", source.display(), destination.display());
            return Ok("File renamed successfully.".to_string());
        }

        let parent = destination.parent().unwrap_or(self.working_dir.as_path());
        if !parent.is_dir() {
            return Err(FshError::ParentMissing(parent.display().to_string()));
        }

        let source_name = file_name(&source);
        let destination_name = file_name(&destination);
        if source_name != destination_name {
            return Err(FshError::NameMismatch {
                source_name,
                destination_name,
            });
        }

        if destination.exists() {
            return Err(FshError::DestinationExists(destination_name));
        }

        move_file(&source, &destination)?;
        log::debug!("Moved {} -> {}", source.display(), destination.display());
        Ok("File moved successfully.".to_string())
    }

    fn try_list(&self, args: &[&str]) -> Result<String> {
        let command = command_name(args);
        let usage = format!("{command} or {command} -R");
        let recursive = match args {
            [] | [_] => false,
            [_, flag] if flag.eq_ignore_ascii_case("-R") => true,
            [_, _] => {
                return Err(FshError::InvalidUsage {
                    command: command.to_string(),
                    usage,
                });
            },
            _ => {
                return Err(FshError::TooManyArguments {
                    command: command.to_string(),
                    usage,
                });
            },
        };
        Ok(listing::render(&self.working_dir, recursive)?)
    }

    fn try_open_directory(&self, args: &[&str]) -> Result<String> {
        let command = command_name(args);
        let usage = format!("{command} [path]");
        check_arity(args, 2, &usage)?;

        let raw = args[1];
        if raw.trim().is_empty() {
            return Err(FshError::EmptyPath);
        }
        let path = self.resolve(raw);
        if !path.is_dir() {
            return Err(FshError::DirectoryNotFound(raw.to_string()));
        }

        self.launcher.open(&path)?;
        Ok(format!("Directory '{}' opened.", path.display()))
    }
}

fn render(result: Result<String>) -> String {
    result.unwrap_or_else(|e| {
        if let FshError::Io(ref io_err) = e {
            log::warn!("Filesystem error: {io_err}");
        }
        e.to_string()
    })
}

fn command_name<'a>(args: &[&'a str]) -> &'a str {
    args.first().copied().unwrap_or_default()
}

/// Require exactly `expected` tokens (command name included).
fn check_arity(args: &[&str], expected: usize, usage: &str) -> Result<()> {
    let command = command_name(args).to_string();
    let usage = usage.to_string();
    match args.len().cmp(&expected) {
        Ordering::Less => Err(FshError::MissingArgument { command, usage }),
        Ordering::Greater => Err(FshError::TooManyArguments { command, usage }),
        Ordering::Equal => Ok(()),
    }
}

/// Report the first reserved or control character in `name`.
fn validate_file_name(name: &str) -> Result<()> {
    match name
        .chars()
        .find(|c| c.is_control() || RESERVED_NAME_CHARS.contains(c))
    {
        Some(ch) => Err(FshError::InvalidName {
            name: name.to_string(),
            ch,
        }),
        None => Ok(()),
    }
}

fn contains_separator(arg: &str) -> bool {
    arg.chars().any(std::path::is_separator)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Rename, falling back to copy + remove across filesystems.
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            fs::copy(from, to)?;
            fs::remove_file(from)
        },
        other => other,
    }
}
