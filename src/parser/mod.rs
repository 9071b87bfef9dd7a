pub mod markdown;
pub mod plaintext;

use crate::error::IngestError;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Markdown,
    PlainText,
    Pdf,
    Word,
}

impl FileType {
    /// Detect file type from extension
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "md" | "mdx" | "markdown" => FileType::Markdown,
            "pdf" => FileType::Pdf,
            "doc" | "docx" => FileType::Word,
            _ => FileType::PlainText,
        }
    }

    /// Whether directory walks pick this file up.
    fn is_collected(path: &Path) -> bool {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        matches!(
            ext.to_lowercase().as_str(),
            "txt" | "text" | "md" | "mdx" | "markdown"
        )
    }
}

/// Turn the raw contents of `path` into the plain text that gets checked.
pub fn extract_text(path: &Path, bytes: Vec<u8>) -> Result<String, IngestError> {
    match FileType::from_path(path) {
        FileType::PlainText => plaintext::decode(path, bytes),
        FileType::Markdown => plaintext::decode(path, bytes).map(|s| markdown::extract(&s)),
        FileType::Pdf => Err(IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
            format: "PDF",
        }),
        FileType::Word => Err(IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
            format: "Word",
        }),
    }
}

/// Read and extract a single file, refusing anything over `max_size` bytes.
pub fn read_file(path: &Path, max_size: u64) -> Result<String, IngestError> {
    let io_err = |source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(path).map_err(io_err)?;
    if !metadata.is_file() {
        return Err(IngestError::InvalidFileType {
            path: path.to_path_buf(),
        });
    }
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit: max_size,
        });
    }

    let bytes = fs::read(path).map_err(io_err)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read input file");
    extract_text(path, bytes)
}

/// Expand directories into the text and markdown files beneath them. Plain
/// file arguments are passed through untouched, whatever their extension.
pub fn collect_inputs(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }

        for entry in WalkDir::new(path).sort_by_file_name() {
            match entry {
                Ok(entry) if entry.file_type().is_file() && FileType::is_collected(entry.path()) => {
                    files.push(entry.into_path());
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("skipping unreadable entry: {}", e),
            }
        }
    }

    files
}
