//! Note file I/O.
//!
//! Notes live as Markdown files under a notes root. Loading runs the file
//! through the block parser; saving uses the round-trip storage codec so a
//! load/save cycle preserves structure. Exports use the display-only
//! serializers and write alongside a chosen directory.

use std::fs;
use std::path::{Path, PathBuf};

use relative_path::RelativePath;

use crate::models::Note;
use crate::parsing::markdown_to_blocks;
use crate::serialize::{self, export};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Note not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid notes directory: {0}")]
    InvalidNotesDir(String),
}

/// Read a note file's raw Markdown.
pub fn read_note(relative_path: &RelativePath, notes_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(notes_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Load a note file into the block model. The title comes from the file
/// stem; the body goes through [`markdown_to_blocks`].
pub fn load_note(relative_path: &RelativePath, notes_root: &Path) -> Result<Note, IoError> {
    let markdown = read_note(relative_path, notes_root)?;
    let title = relative_path
        .file_name()
        .map(|name| name.strip_suffix(".md").unwrap_or(name))
        .unwrap_or("Untitled");

    let mut note = Note::new(title);
    note.set_blocks(markdown_to_blocks(&markdown));
    Ok(note)
}

/// Save a note as round-trippable Markdown, creating parent directories as
/// needed.
pub fn save_note(
    note: &Note,
    relative_path: &RelativePath,
    notes_root: &Path,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(notes_root);
    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }
    let markdown = serialize::blocks_to_markdown(&note.blocks);
    fs::write(&absolute_path, markdown).map_err(IoError::Io)
}

/// Scan for note files (`.md`) under the notes root, sorted.
pub fn scan_note_files(notes_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !notes_root.exists() {
        return Err(IoError::InvalidNotesDir(
            "notes directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(notes_root, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "md"
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_notes_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidNotesDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

/// Output formats for note export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    PlainText,
    Html,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::PlainText => "txt",
            ExportFormat::Html => "html",
        }
    }
}

/// Export a note with the display-only serializers and write it to
/// `out_dir`, returning the written path.
pub fn export_note(
    note: &Note,
    format: ExportFormat,
    out_dir: &Path,
) -> Result<PathBuf, IoError> {
    let payload = match format {
        ExportFormat::Markdown => export::blocks_to_markdown(&note.blocks, Some(&note.title)),
        ExportFormat::PlainText => export::blocks_to_plain_text(&note.blocks),
        ExportFormat::Html => export::blocks_to_html(&note.blocks, Some(&note.title)),
    };

    fs::create_dir_all(out_dir).map_err(IoError::Io)?;
    let filename = format!("{}.{}", safe_filename(&note.title), format.extension());
    let path = out_dir.join(filename);
    fs::write(&path, payload).map_err(IoError::Io)?;
    Ok(path)
}

/// Replace path separators and other hostile characters so a note title is
/// usable as a file name.
fn safe_filename(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect();
    if cleaned.trim().is_empty() {
        "untitled".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BlockKind;
    use tempfile::TempDir;

    fn write_note_file(dir: &TempDir, name: &str, content: &str) {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn load_note_parses_blocks_and_title() {
        let dir = TempDir::new().unwrap();
        write_note_file(&dir, "groceries.md", "# List\n\n- milk\n- eggs");

        let note = load_note(RelativePath::new("groceries.md"), dir.path()).unwrap();
        assert_eq!(note.title, "groceries");
        assert_eq!(note.blocks.len(), 3);
        assert_eq!(note.blocks[0].kind, BlockKind::Heading1);
    }

    #[test]
    fn load_missing_note_fails_with_not_found() {
        let dir = TempDir::new().unwrap();
        let result = load_note(RelativePath::new("ghost.md"), dir.path());
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn save_then_load_roundtrips_structure() {
        let dir = TempDir::new().unwrap();
        write_note_file(&dir, "a.md", "# Title\n\n> quoted\n\n- item");
        let note = load_note(RelativePath::new("a.md"), dir.path()).unwrap();

        save_note(&note, RelativePath::new("copy/a.md"), dir.path()).unwrap();
        let reloaded = load_note(RelativePath::new("copy/a.md"), dir.path()).unwrap();

        let kinds = |n: &Note| n.blocks.iter().map(|b| b.kind).collect::<Vec<_>>();
        assert_eq!(kinds(&note), kinds(&reloaded));
    }

    #[test]
    fn scan_finds_only_markdown_files() {
        let dir = TempDir::new().unwrap();
        write_note_file(&dir, "one.md", "# One");
        write_note_file(&dir, "nested/two.md", "# Two");
        write_note_file(&dir, "image.png", "not a note");

        let files = scan_note_files(dir.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension().unwrap() == "md"));
    }

    #[test]
    fn scan_rejects_missing_root() {
        let result = scan_note_files(Path::new("/does/not/exist"));
        assert!(matches!(result, Err(IoError::InvalidNotesDir(_))));
    }

    #[test]
    fn validate_notes_dir_checks_existence() {
        let dir = TempDir::new().unwrap();
        assert!(validate_notes_dir(dir.path()).is_ok());
        assert!(validate_notes_dir(Path::new("/nope")).is_err());
    }

    #[test]
    fn export_writes_expected_extension() {
        let dir = TempDir::new().unwrap();
        let mut note = Note::new("Report");
        note.set_blocks(markdown_to_blocks("# Heading\n\nBody"));

        let out = dir.path().join("exports");
        let md = export_note(&note, ExportFormat::Markdown, &out).unwrap();
        let html = export_note(&note, ExportFormat::Html, &out).unwrap();
        let txt = export_note(&note, ExportFormat::PlainText, &out).unwrap();

        assert_eq!(md.extension().unwrap(), "md");
        assert_eq!(html.extension().unwrap(), "html");
        assert_eq!(txt.extension().unwrap(), "txt");
        assert!(fs::read_to_string(&html).unwrap().starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn export_sanitizes_hostile_titles() {
        let dir = TempDir::new().unwrap();
        let note = Note::new("a/b:c");
        let path = export_note(&note, ExportFormat::PlainText, dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "a_b_c.txt");
    }
}
