//! Directory enumeration and `ls` rendering.

use std::fs;
use std::io;
use std::path::Path;

/// A subdirectory and whether it contains anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subdirectory {
    pub name: String,
    pub has_entries: bool,
}

/// One enumerated directory level.
///
/// Files keep the order the filesystem returned them in. Directories do too,
/// except that non-empty ones come before empty ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    pub files: Vec<String>,
    pub directories: Vec<Subdirectory>,
}

impl DirectoryListing {
    /// Enumerate `dir` (one level).
    pub fn read(dir: &Path) -> io::Result<Self> {
        let mut listing = Self::default();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let path = entry.path();
            if path.is_dir() {
                listing.directories.push(Subdirectory {
                    name,
                    has_entries: has_entries(&path),
                });
            } else {
                listing.files.push(name);
            }
        }
        // Stable: ties keep enumeration order.
        listing.directories.sort_by_key(|d| !d.has_entries);
        Ok(listing)
    }

    /// No files and no directories.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty()
    }
}

/// Whether `dir` contains at least one entry. Unreadable counts as empty.
fn has_entries(dir: &Path) -> bool {
    match fs::read_dir(dir) {
        Ok(mut entries) => entries.next().is_some(),
        Err(e) => {
            log::warn!("Cannot read {}: {e}", dir.display());
            false
        },
    }
}

/// Render the listing of `root`, descending into non-empty subdirectories
/// when `recursive` is set.
pub fn render(root: &Path, recursive: bool) -> io::Result<String> {
    let mut lines = Vec::new();
    if recursive {
        render_recursive(root, true, &mut lines)?;
    } else {
        let listing = DirectoryListing::read(root)?;
        render_level(root, &listing, true, &mut lines);
    }
    Ok(lines.join("\n"))
}

fn render_level(path: &Path, listing: &DirectoryListing, top_level: bool, lines: &mut Vec<String>) {
    if listing.is_empty() {
        if top_level {
            lines.push(format!("Nothing found in {}.", path.display()));
        }
        return;
    }

    if !listing.files.is_empty() {
        lines.push(format!("Files in {}:", path.display()));
        for file in &listing.files {
            lines.push(format!("- {file}"));
        }
    }

    if !listing.directories.is_empty() {
        lines.push(format!("Directories in {}:", path.display()));
        for dir in &listing.directories {
            lines.push(format!("- {}", dir.name));
        }
    }
}

fn render_recursive(path: &Path, top_level: bool, lines: &mut Vec<String>) -> io::Result<()> {
    let listing = DirectoryListing::read(path)?;
    render_level(path, &listing, top_level, lines);

    if top_level && listing.directories.is_empty() && !listing.files.is_empty() {
        lines.push("+ No directories.".to_string());
    }

    for dir in listing.directories.iter().filter(|d| d.has_entries) {
        lines.push(String::new());
        render_recursive(&path.join(&dir.name), false, lines)?;
    }
    Ok(())
}
