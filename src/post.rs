use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, FixedOffset, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use spdlog::debug;

use crate::content::content_file::ContentFile;
use crate::content::front_matter::{split_front_matter, FrontMatter, FrontValue};
use crate::content::markdown_renderer::render_markdown;
use crate::text_utils::{format_rfc822, format_sql_date, format_sql_date_gmt, parse_date_time, slugify};

const EXCERPT_MAX_CHARS: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostStatus {
    Draft,
    Publish,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Publish => "publish",
        }
    }
}

impl Display for PostStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostRecord {
    pub id: u32,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub date: DateTime<FixedOffset>,
    pub status: PostStatus,
    pub slug: String,
    pub author: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

impl Display for PostRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "id={}, date={}, author={}, status={}\ntitle={}\nslug={}",
               self.id,
               self.post_date(),
               self.author,
               self.status,
               self.title,
               self.slug,
        )
    }
}

impl PostRecord {
    pub fn from_content(content_file: &ContentFile, id: u32, default_author: &str) -> PostRecord {
        let (front_matter, body) = split_front_matter(&content_file.raw_content);
        debug!("{}: {} frontmatter fields", content_file.file_path.display(), front_matter.len());
        Self::assemble(&content_file.stem(), &front_matter, body, id, default_author)
    }

    /// Builds the record of one post out of its frontmatter and markdown body.
    /// `fallback_title` is used when the frontmatter has no title.
    pub fn assemble(fallback_title: &str, front_matter: &FrontMatter, body: &str, id: u32, default_author: &str) -> PostRecord {
        let content = render_markdown(body);
        let excerpt = extract_excerpt(&content);

        let title = front_matter.get_text("title").unwrap_or(fallback_title).to_string();
        let slug = slugify(&title);

        let date = match front_matter.get_text("date").map(parse_date_time) {
            Some(Ok(date)) => date,
            Some(Err(e)) => {
                debug!("{} - using the current time for post {}", e, title);
                Utc::now().fixed_offset()
            }
            None => Utc::now().fixed_offset(),
        };

        let status = match front_matter.get_text("draft") {
            Some(draft) if draft.trim().eq_ignore_ascii_case("true") => PostStatus::Draft,
            _ => PostStatus::Publish,
        };

        let author = front_matter.get_text("author").unwrap_or(default_author).to_string();

        PostRecord {
            id,
            title,
            content,
            excerpt,
            date,
            status,
            slug,
            author,
            categories: extract_terms(front_matter.get("categories")),
            tags: extract_terms(front_matter.get("tags")),
        }
    }

    pub fn post_date(&self) -> String {
        format_sql_date(&self.date)
    }

    pub fn post_date_gmt(&self) -> String {
        format_sql_date_gmt(&self.date)
    }

    pub fn pub_date(&self) -> String {
        format_rfc822(&self.date)
    }
}

/// First paragraph, or the first characters of the HTML when there is none.
/// The cut ignores tags and words.
fn extract_excerpt(html: &str) -> String {
    lazy_static! {
        static ref PARAGRAPH_REGEX: Regex = Regex::new(r"<p>(.*?)</p>").unwrap();
    }

    match PARAGRAPH_REGEX.captures(html).and_then(|cap| cap.get(1)) {
        Some(paragraph) => paragraph.as_str().to_string(),
        None => html.chars().take(EXCERPT_MAX_CHARS).collect(),
    }
}

/// Categories and tags: either a list, or comma separated text.
/// A one-line YAML list (`[a, b]`) is accepted as text as well.
fn extract_terms(value: Option<&FrontValue>) -> Vec<String> {
    let terms: Vec<&str> = match value {
        None => return vec![],
        Some(FrontValue::Text(text)) => {
            let text = text.trim();
            let text = text.strip_prefix('[')
                .and_then(|t| t.strip_suffix(']'))
                .unwrap_or(text);
            text.split(',').collect()
        }
        Some(FrontValue::List(list)) => list.iter().map(|s| s.as_str()).collect(),
    };

    let mut res: Vec<String> = vec![];
    for term in terms.into_iter().map(str::trim).filter(|t| !t.is_empty()) {
        if !res.iter().any(|t| t == term) {
            res.push(term.to_string());
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::test_data::{DRAFT_POST, POST_DATA};

    use super::*;

    fn front_matter(fields: &[(&str, &str)]) -> FrontMatter {
        let mut fm = FrontMatter::new();
        for (k, v) in fields {
            fm.insert(k, FrontValue::Text(v.to_string()));
        }
        fm
    }

    #[test]
    fn test_from_content() {
        let content = ContentFile {
            file_path: PathBuf::from("content/posts/20220402_what_i_learned.md"),
            raw_content: POST_DATA.to_string(),
        };
        let post = PostRecord::from_content(&content, 7, "admin");
        println!("{}", post);

        assert_eq!(post.id, 7);
        assert_eq!(post.title, "What I learned after 20+ years of software development");
        assert_eq!(post.slug, "what-i-learned-after-20-years-of-software-development");
        assert_eq!(post.author, "thiago");
        assert_eq!(post.status, PostStatus::Publish);
        assert_eq!(post.post_date(), "2022-04-02 12:05:00");
        assert_eq!(post.post_date_gmt(), "2022-04-02 12:05:00");
        assert_eq!(post.pub_date(), "Sat, 02 Apr 2022 12:05:00 +0000");
        assert_eq!(post.excerpt, "How to be a great software engineer?");
        assert_eq!(post.tags, ["software", "career"]);
        assert_eq!(post.categories, ["Career"]);
        assert!(post.content.starts_with("<p>How to be a great software engineer?</p>\n"));
        assert!(post.content.contains("<h2>Non technical</h2>"));
    }

    #[test]
    fn test_draft_post() {
        let content = ContentFile {
            file_path: PathBuf::from("wip.md"),
            raw_content: DRAFT_POST.to_string(),
        };
        let before = Utc::now();
        let post = PostRecord::from_content(&content, 1, "admin");

        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.title, "Work in progress");
        assert_eq!(post.author, "admin");
        // invalid date falls back to now
        assert!(post.date.with_timezone(&Utc) >= before - chrono::Duration::seconds(1));
        assert!(post.categories.is_empty());
        assert!(post.tags.is_empty());
    }

    #[test]
    fn test_status() {
        let body = "text";
        let post = PostRecord::assemble("a", &front_matter(&[("draft", "true")]), body, 1, "admin");
        assert_eq!(post.status, PostStatus::Draft);
        let post = PostRecord::assemble("a", &front_matter(&[("draft", "false")]), body, 1, "admin");
        assert_eq!(post.status, PostStatus::Publish);
        let post = PostRecord::assemble("a", &front_matter(&[]), body, 1, "admin");
        assert_eq!(post.status, PostStatus::Publish);
        let post = PostRecord::assemble("a", &front_matter(&[("draft", "yes")]), body, 1, "admin");
        assert_eq!(post.status, PostStatus::Publish);
        assert_eq!(PostStatus::Draft.to_string(), "draft");
    }

    #[test]
    fn test_title_falls_back_to_stem() {
        let post = PostRecord::assemble("my-file-name", &FrontMatter::new(), "", 3, "admin");
        assert_eq!(post.title, "my-file-name");
        assert_eq!(post.slug, "my-file-name");
        assert_eq!(post.content, "");
        assert_eq!(post.excerpt, "");
    }

    #[test]
    fn test_slug_from_title() {
        let post = PostRecord::assemble("x", &front_matter(&[("title", "Hello, World! 2024")]), "", 1, "admin");
        assert_eq!(post.slug, "hello-world-2024");
    }

    #[test]
    fn test_offset_date() {
        let fm = front_matter(&[("date", "2024-03-10T22:15:00-05:00")]);
        let post = PostRecord::assemble("x", &fm, "", 1, "admin");
        assert_eq!(post.post_date(), "2024-03-10 22:15:00");
        assert_eq!(post.post_date_gmt(), "2024-03-11 03:15:00");
        assert_eq!(post.pub_date(), "Mon, 11 Mar 2024 03:15:00 +0000");
    }

    #[test]
    fn test_excerpt_first_paragraph() {
        assert_eq!(extract_excerpt("<h1>T</h1>\n<p>first</p>\n<p>second</p>"), "first");
    }

    #[test]
    fn test_excerpt_fallback_is_150_chars() {
        let body = format!("# {}", "x".repeat(300));
        let post = PostRecord::assemble("x", &FrontMatter::new(), &body, 1, "admin");
        assert!(!post.content.contains("<p>"));
        assert_eq!(post.excerpt.chars().count(), 150);
        assert!(post.excerpt.starts_with("<h1>xxx"));

        let short = extract_excerpt("<h2>short</h2>");
        assert_eq!(short, "<h2>short</h2>");
    }

    #[test]
    fn test_extract_terms() {
        let text = FrontValue::Text("rust, web dev , ,rust".to_string());
        assert_eq!(extract_terms(Some(&text)), ["rust", "web dev"]);

        let yaml_list = FrontValue::Text("[Open Source, Linux]".to_string());
        assert_eq!(extract_terms(Some(&yaml_list)), ["Open Source", "Linux"]);

        let list = FrontValue::List(vec!["one".to_string(), " two ".to_string(), "".to_string()]);
        assert_eq!(extract_terms(Some(&list)), ["one", "two"]);

        assert!(extract_terms(None).is_empty());
        assert!(extract_terms(Some(&FrontValue::Text("".to_string()))).is_empty());
    }

    #[test]
    fn test_list_values_from_callers() {
        let mut fm = FrontMatter::new();
        fm.insert("categories", FrontValue::List(vec!["News".to_string(), "Releases".to_string()]));
        let post = PostRecord::assemble("x", &fm, "", 1, "admin");
        assert_eq!(post.categories, ["News", "Releases"]);
    }
}
