use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PostError;

/// A markdown file found in the content directory, read into memory
pub struct ContentFile {
    pub file_path: PathBuf,
    pub raw_content: String,
}

impl ContentFile {
    pub fn from_file(file_path: &Path) -> Result<ContentFile, PostError> {
        let raw_content = fs::read_to_string(file_path).map_err(|source| PostError::Read {
            path: file_path.to_path_buf(),
            source,
        })?;

        Ok(ContentFile {
            file_path: file_path.to_path_buf(),
            raw_content: normalize_line_endings(raw_content),
        })
    }

    /// File name without extension, used when the post has no title
    pub fn stem(&self) -> String {
        self.file_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

// The renderer works on `\n` lines only
fn normalize_line_endings(text: String) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n")
    } else {
        text
    }
}
