use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

#[derive(Debug, Clone, PartialEq)]
pub enum FrontValue {
    Text(String),
    List(Vec<String>),
}

/// Metadata found between the `---` delimiters of a post
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    fields: HashMap<String, FrontValue>,
}

impl FrontMatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: FrontValue) {
        self.fields.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&FrontValue> {
        self.fields.get(key)
    }

    /// Only scalar values. Lists are not flattened.
    pub fn get_text(&self, key: &str) -> Option<&str> {
        match self.fields.get(key) {
            Some(FrontValue::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

/// Splits a post in its frontmatter and its body.
///
/// Example of post
/// ---
/// title: "What I learned after 20+ years of software development"
/// date: 2022-04-02T12:05:00Z
/// draft: false
/// ---
///
/// How to be a great software engineer?
///
/// When there is no frontmatter block, the text is returned untouched.
pub fn split_front_matter(raw: &str) -> (FrontMatter, &str) {
    lazy_static! {
        static ref FRONT_MATTER_REGEX: Regex = Regex::new(
            r"(?s)\A---[ \t]*\r?\n(?:(?P<header>.*?)\r?\n)?---[ \t]*(?:\r?\n(?P<body>.*))?\z"
        ).unwrap();
    }

    let Some(caps) = FRONT_MATTER_REGEX.captures(raw) else {
        return (FrontMatter::new(), raw);
    };

    let mut front_matter = FrontMatter::new();
    if let Some(header) = caps.name("header") {
        for line in header.as_str().lines() {
            if let Some((key, val)) = extract_key_val(line) {
                front_matter.insert(key, FrontValue::Text(val.to_string()));
            }
        }
    }

    let body = caps.name("body").map(|m| m.as_str().trim()).unwrap_or("");
    (front_matter, body)
}

fn extract_key_val(line: &str) -> Option<(&str, &str)> {
    let (key, val) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, strip_quotes(val.trim())))
}

fn strip_quotes(val: &str) -> &str {
    for quote in ['"', '\''] {
        if val.len() >= 2 && val.starts_with(quote) && val.ends_with(quote) {
            return &val[1..val.len() - 1];
        }
    }
    val
}
