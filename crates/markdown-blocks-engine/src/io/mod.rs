//! Documents on disk, addressed relative to the notes root.

use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid notes directory: {0}")]
    InvalidNotesDir(String),
}

/// Read a document's raw bytes; text validation happens at the parse boundary.
pub fn read_bytes(relative_path: &RelativePath, notes_root: &Path) -> Result<Vec<u8>, IoError> {
    let absolute_path = relative_path.to_path(notes_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    Ok(fs::read(&absolute_path)?)
}

/// Write content to a markdown file, creating parent directories
pub fn write_file(
    relative_path: &RelativePath,
    notes_root: &Path,
    content: &str,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(notes_root);
    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&absolute_path, content)?;
    log::debug!("wrote {} bytes to {}", content.len(), absolute_path.display());
    Ok(())
}

/// Markdown files under the notes root, relative to it and sorted.
///
/// Hidden directories (`.git`, `.obsidian`, ...) are skipped.
pub fn scan_markdown_files(notes_root: &Path) -> Result<Vec<RelativePathBuf>, IoError> {
    validate_notes_dir(notes_root)?;

    let mut files = Vec::new();
    scan_directory_recursive(notes_root, notes_root, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(
    root: &Path,
    dir: &Path,
    files: &mut Vec<RelativePathBuf>,
) -> Result<(), IoError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let hidden = path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().starts_with('.'));

        if path.is_dir() {
            if !hidden {
                scan_directory_recursive(root, &path, files)?;
            }
        } else if let Some(ext) = path.extension()
            && ext == "md"
            && let Ok(rel) = path.strip_prefix(root)
            && let Ok(rel) = RelativePathBuf::from_path(rel)
        {
            files.push(rel);
        }
    }

    Ok(())
}

pub fn validate_notes_dir(path: &Path) -> Result<(), IoError> {
    if !path.is_dir() {
        return Err(IoError::InvalidNotesDir(format!(
            "notes directory not found: {}",
            path.display()
        )));
    }
    Ok(())
}
