use crate::models::{EncodeOptions, Outline};
use relative_path::RelativePath;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of record files picked up when scanning a documents directory.
pub const OUTLINE_EXTENSION: &str = "tsv";

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid documents directory: {0}")]
    InvalidDocumentsDir(String),
}

/// Read a record file and return its content
pub fn read_file(relative_path: &RelativePath, root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Write content to a record file
pub fn write_file(relative_path: &RelativePath, root: &Path, content: &str) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(root);

    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)
}

/// Read and parse a record file into a decoded outline
pub fn load_outline(
    relative_path: &RelativePath,
    root: &Path,
    options: EncodeOptions,
) -> anyhow::Result<Outline> {
    let content = read_file(relative_path, root)?;
    let outline = Outline::parse(&content, options)?;
    log::debug!("loaded {relative_path} ({} lines)", outline.len());
    Ok(outline)
}

/// Serialize an outline's pointer view back to disk
pub fn save_outline(
    relative_path: &RelativePath,
    root: &Path,
    outline: &Outline,
) -> Result<(), IoError> {
    write_file(relative_path, root, &outline.to_text())
}

/// Scan for record files in the documents directory
pub fn scan_outline_files(root: &Path) -> Result<Vec<PathBuf>, IoError> {
    validate_documents_dir(root)?;

    let mut files = Vec::new();
    scan_directory_recursive(root, &mut files)?;
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
            && ext == OUTLINE_EXTENSION
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_documents_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidDocumentsDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}
