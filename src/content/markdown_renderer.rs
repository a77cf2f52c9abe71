use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref HEADER_REGEX: Regex = Regex::new(r"(?m)^(?P<level>#{1,3}) (?P<text>.*?)$").unwrap();

    static ref BOLD_ITALIC_REGEX: Regex = Regex::new(r"\*\*\*(.*?)\*\*\*").unwrap();
    static ref BOLD_STAR_REGEX: Regex = Regex::new(r"\*\*(.*?)\*\*").unwrap();
    static ref ITALIC_STAR_REGEX: Regex = Regex::new(r"\*(.*?)\*").unwrap();
    static ref BOLD_UNDERSCORE_REGEX: Regex = Regex::new(r"__(.*?)__").unwrap();
    static ref ITALIC_UNDERSCORE_REGEX: Regex = Regex::new(r"_(.*?)_").unwrap();

    static ref IMAGE_REGEX: Regex = Regex::new(r"!\[(.*?)\]\((.*?)\)").unwrap();
    static ref LINK_REGEX: Regex = Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap();

    static ref CODE_BLOCK_REGEX: Regex = Regex::new(r"(?s)```(.*?)\n(.*?)```").unwrap();
    static ref INLINE_CODE_REGEX: Regex = Regex::new(r"`(.*?)`").unwrap();

    static ref UNORDERED_ITEM_REGEX: Regex = Regex::new(r"^[*+\-]\s+(?P<item>.*)$").unwrap();
    static ref ORDERED_ITEM_REGEX: Regex = Regex::new(r"^\d+\.\s+(?P<item>.*)$").unwrap();

    static ref TAG_START_REGEX: Regex = Regex::new(r"^<[^>]+>").unwrap();
}

/// Converts the markdown body of a post into HTML.
///
/// This is a small subset of markdown, applied as a fixed sequence of
/// rewrites. Each pass sees the output of the previous one.
pub fn render_markdown(md_text: &str) -> String {
    let html = render_headers(md_text);
    let html = render_emphasis(&html);
    let html = render_images_and_links(&html);
    let html = render_code(&html);
    let html = render_lists(&html);
    render_paragraphs(&html)
}

fn render_headers(text: &str) -> String {
    HEADER_REGEX.replace_all(text, |caps: &Captures| {
        let level = caps["level"].len();
        format!("<h{}>{}</h{}>", level, &caps["text"], level)
    }).to_string()
}

fn render_emphasis(text: &str) -> String {
    let text = BOLD_ITALIC_REGEX.replace_all(text, "<strong><em>${1}</em></strong>");
    let text = BOLD_STAR_REGEX.replace_all(&text, "<strong>${1}</strong>");
    let text = ITALIC_STAR_REGEX.replace_all(&text, "<em>${1}</em>");
    let text = BOLD_UNDERSCORE_REGEX.replace_all(&text, "<strong>${1}</strong>");
    let text = ITALIC_UNDERSCORE_REGEX.replace_all(&text, "<em>${1}</em>");
    text.to_string()
}

// Images first, otherwise `![alt](url)` would be taken as a link
fn render_images_and_links(text: &str) -> String {
    let text = IMAGE_REGEX.replace_all(text, r#"<img src="${2}" alt="${1}" />"#);
    let text = LINK_REGEX.replace_all(&text, r#"<a href="${2}">${1}</a>"#);
    text.to_string()
}

fn render_code(text: &str) -> String {
    let text = CODE_BLOCK_REGEX.replace_all(text, r#"<pre><code class="language-${1}">${2}</code></pre>"#);
    let text = INLINE_CODE_REGEX.replace_all(&text, "<code>${1}</code>");
    text.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ListState {
    None,
    Unordered,
    Ordered,
}

impl ListState {
    fn open_tag(self) -> Option<&'static str> {
        match self {
            ListState::None => None,
            ListState::Unordered => Some("<ul>"),
            ListState::Ordered => Some("<ol>"),
        }
    }

    fn close_tag(self) -> Option<&'static str> {
        match self {
            ListState::None => None,
            ListState::Unordered => Some("</ul>"),
            ListState::Ordered => Some("</ol>"),
        }
    }
}

/// The state a line moves the list scanner to, plus the item text for list lines
fn classify_line(line: &str) -> (ListState, Option<&str>) {
    if let Some(caps) = UNORDERED_ITEM_REGEX.captures(line) {
        let item = caps.name("item").map(|m| m.as_str()).unwrap_or("");
        return (ListState::Unordered, Some(item));
    }
    if let Some(caps) = ORDERED_ITEM_REGEX.captures(line) {
        let item = caps.name("item").map(|m| m.as_str()).unwrap_or("");
        return (ListState::Ordered, Some(item));
    }
    (ListState::None, None)
}

fn render_lists(text: &str) -> String {
    let mut lines: Vec<String> = vec![];

    let last_state = text.split('\n').fold(ListState::None, |state, line| {
        let (next_state, item) = classify_line(line);

        if next_state != state {
            if let Some(close) = state.close_tag() {
                lines.push(close.to_string());
            }
            if let Some(open) = next_state.open_tag() {
                lines.push(open.to_string());
            }
        }

        match item {
            Some(item) => lines.push(format!("<li>{}</li>", item)),
            None => lines.push(line.to_string()),
        }

        next_state
    });

    if let Some(close) = last_state.close_tag() {
        lines.push(close.to_string());
    }

    lines.join("\n")
}

fn render_paragraphs(text: &str) -> String {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if TAG_START_REGEX.is_match(line) {
                line.to_string()
            } else {
                format!("<p>{}</p>", line)
            }
        })
        .collect::<Vec<String>>()
        .join("\n")
}
