use std::fs;
use std::path::{Path, PathBuf};

use spdlog::{info, warn};

use crate::config::SiteInfo;
use crate::content::content_file::ContentFile;
use crate::error::{ConvertError, PostError};
use crate::post::PostRecord;
use crate::post_list::PostList;
use crate::view::wxr_renderer::WxrDocument;

pub struct ConvertOptions<'a> {
    pub content_dir: &'a Path,
    pub output_file: &'a Path,
    pub site: &'a SiteInfo,
    pub default_author: &'a str,
}

#[derive(Debug)]
pub struct FailedPost {
    pub path: Option<PathBuf>,
    pub error: PostError,
}

#[derive(Debug, Default)]
pub struct ConvertSummary {
    /// Markdown files discovered, after the `archetypes` filter and not
    /// counting directory entries that could not be visited
    pub found: usize,
    pub converted: usize,
    pub failed: Vec<FailedPost>,
}

/// Reads every post under the content directory.
/// A post that fails is recorded in the summary and skipped.
pub fn load_posts(content_dir: &Path, default_author: &str) -> Result<(Vec<PostRecord>, ConvertSummary), ConvertError> {
    if !content_dir.is_dir() {
        return Err(ConvertError::MissingInputDirectory(content_dir.to_path_buf()));
    }

    let post_list = PostList { root_dir: content_dir.to_path_buf() };
    let files = post_list.retrieve_files();

    let mut summary = ConvertSummary {
        found: files.iter().filter(|f| f.is_ok()).count(),
        ..Default::default()
    };
    info!("Found {} markdown files", summary.found);

    let mut posts: Vec<PostRecord> = vec![];
    for file in files {
        let path = match file {
            Ok(path) => path,
            Err(error) => {
                warn!("  ✗ {}", error);
                summary.failed.push(FailedPost { path: None, error });
                continue;
            }
        };

        info!("Processing: {}", path.display());
        match ContentFile::from_file(&path) {
            Ok(content_file) => {
                let id = posts.len() as u32 + 1;
                let post = PostRecord::from_content(&content_file, id, default_author);
                info!("  ✓ Converted: {} (status: {})", post.title, post.status);
                posts.push(post);
            }
            Err(error) => {
                warn!("  ✗ Error processing {}: {}", path.display(), error);
                summary.failed.push(FailedPost { path: Some(path), error });
            }
        }
    }

    summary.converted = posts.len();
    Ok((posts, summary))
}

pub fn write_wxr(output_file: &Path, site: &SiteInfo, posts: &[PostRecord]) -> Result<(), ConvertError> {
    let doc = WxrDocument { site, posts };
    let xml = doc.render()?;
    fs::write(output_file, xml).map_err(|source| ConvertError::WriteOutput {
        path: output_file.to_path_buf(),
        source,
    })
}

pub fn convert(options: &ConvertOptions) -> Result<ConvertSummary, ConvertError> {
    let (posts, summary) = load_posts(options.content_dir, options.default_author)?;
    write_wxr(options.output_file, options.site, &posts)?;
    info!("Successfully converted {} posts to {}", summary.converted, options.output_file.display());
    Ok(summary)
}
