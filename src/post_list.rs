use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::PostError;

const SKIPPED_DIR: &str = "archetypes";
const POST_EXTENSION: &str = "md";

pub struct PostList {
    pub root_dir: PathBuf,
}

impl PostList {
    /// Every markdown file under the root, sorted by name at each level.
    /// Symlinks are followed.
    /// Entries that could not be visited are returned as errors so the
    /// caller can report them and carry on.
    pub fn retrieve_files(&self) -> Vec<Result<PathBuf, PostError>> {
        WalkDir::new(&self.root_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        return None;
                    }
                    let path = entry.into_path();
                    if self.is_post(&path) {
                        Some(Ok(path))
                    } else {
                        None
                    }
                }
                Err(e) => Some(Err(PostError::from(e))),
            })
            .collect()
    }

    fn is_post(&self, path: &Path) -> bool {
        if path.extension().and_then(|ext| ext.to_str()) != Some(POST_EXTENSION) {
            return false;
        }

        let relative = path.strip_prefix(&self.root_dir).unwrap_or(path);
        !relative.components().any(|c| c.as_os_str() == SKIPPED_DIR)
    }
}
