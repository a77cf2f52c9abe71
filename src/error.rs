use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop the whole conversion
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Hugo content directory not found: {}", .0.display())]
    MissingInputDirectory(PathBuf),

    #[error("Error building the WXR document: {0}")]
    Render(#[from] quick_xml::Error),

    #[error("Error writing {}: {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors on a single post. The post is skipped and the batch continues.
#[derive(Debug, Error)]
pub enum PostError {
    #[error("Error reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error scanning content directory: {0}")]
    Walk(#[from] walkdir::Error),
}
