//! The fixed command catalog used by `help`.
//!
//! Routing does not consult this table; the interpreter matches command
//! names directly.

/// A usage string and its one-line description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub usage: &'static str,
    pub description: &'static str,
}

impl CommandDescriptor {
    /// The command word (first word of the usage string).
    pub fn name(&self) -> &'static str {
        self.usage.split(' ').next().unwrap_or(self.usage)
    }
}

const COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor {
        usage: "tch [nombre de archivo]",
        description: "Create a new empty file with the given name and extension",
    },
    CommandDescriptor {
        usage: "mv [archivo1] [archivo2]",
        description: "Rename a file",
    },
    CommandDescriptor {
        usage: "mv [path1] [path2]",
        description: "Move a file to another directory",
    },
    CommandDescriptor {
        usage: "ls",
        description: "Show the files and directories in the working directory",
    },
    CommandDescriptor {
        usage: "ls -R",
        description: "Show the contents of every subdirectory recursively",
    },
    CommandDescriptor {
        usage: "cd [path]",
        description: "Open a directory in the system file browser",
    },
    CommandDescriptor {
        usage: "help",
        description: "Show this list of commands",
    },
    CommandDescriptor {
        usage: "exit",
        description: "Quit the application",
    },
];

/// Printed after the catalog.
pub const QUOTING_HINT: &str =
    "* To use spaces in file names or paths, wrap them in double quotes.";

/// The command catalog in display order.
pub fn commands() -> &'static [CommandDescriptor] {
    COMMANDS
}

/// Render the catalog, or only the entries for `filter` when given.
///
/// A blank filter, or one that names no command, shows the whole catalog.
pub fn render_help(filter: Option<&str>) -> String {
    let matching: Vec<&CommandDescriptor> = match filter.map(str::trim) {
        Some(name) if !name.is_empty() => COMMANDS
            .iter()
            .filter(|c| c.name().eq_ignore_ascii_case(name))
            .collect(),
        _ => Vec::new(),
    };
    let entries = if matching.is_empty() {
        COMMANDS.iter().collect()
    } else {
        matching
    };

    let mut out = String::from("Available commands:\n\n");
    for cmd in entries {
        out.push_str(&format!("- {}: {}\n", cmd.usage, cmd.description));
    }
    out.push('\n');
    out.push_str(QUOTING_HINT);
    out
}
