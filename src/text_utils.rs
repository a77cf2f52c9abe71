use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Parses the ISO-8601 flavours Hugo writes in the `date` field.
/// A trailing `Z` means UTC. Values without an offset are taken as UTC.
pub fn parse_date_time(buf: &str) -> Result<DateTime<FixedOffset>, String> {
    let buf = buf.trim();
    let buf = match buf.strip_suffix('Z') {
        Some(rest) => format!("{}+00:00", rest),
        None => buf.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&buf) {
        return Ok(dt);
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&buf, fmt) {
            return Ok(dt);
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&buf, fmt) {
            return Ok(dt.and_utc().fixed_offset());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(&buf, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt.and_utc().fixed_offset());
        }
    }

    Err(format!("Unable to parse date time {}", buf))
}

/// `2024-01-15 10:00:00`, wall clock as written in the post
pub fn format_sql_date(date_time: &DateTime<FixedOffset>) -> String {
    date_time.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// `2024-01-15 10:00:00`, converted to UTC
pub fn format_sql_date_gmt(date_time: &DateTime<FixedOffset>) -> String {
    date_time.with_timezone(&Utc).format("%Y-%m-%d %H:%M:%S").to_string()
}

/// `Mon, 15 Jan 2024 10:00:00 +0000`
pub fn format_rfc822(date_time: &DateTime<FixedOffset>) -> String {
    date_time.with_timezone(&Utc).format("%a, %d %b %Y %H:%M:%S +0000").to_string()
}

pub fn slugify(title: &str) -> String {
    lazy_static! {
        static ref NON_SLUG_REGEX: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
    }

    let lower = title.to_lowercase();
    NON_SLUG_REGEX.replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}

/// WordPress term nicename: lowercase, spaces become hyphens
pub fn nicename(term: &str) -> String {
    term.to_lowercase().replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn test_parse_date_time() {
        let date_time = parse_date_time("2024-01-15T10:00:00Z").unwrap();
        assert_eq!(format_sql_date(&date_time), "2024-01-15 10:00:00");
        assert_eq!(format_rfc822(&date_time), "Mon, 15 Jan 2024 10:00:00 +0000");

        let date_time = parse_date_time("2017-09-10 10:42:32.123").unwrap();
        assert_eq!(format_sql_date(&date_time), "2017-09-10 10:42:32");

        let date_time = parse_date_time("2017-09-10T10:42").unwrap();
        assert_eq!(format_sql_date(&date_time), "2017-09-10 10:42:00");

        let date_time = parse_date_time("2017-09-10").unwrap();
        assert_eq!((date_time.year(), date_time.month(), date_time.day()), (2017, 9, 10));
        assert_eq!(date_time.hour(), 0);

        assert!(parse_date_time("yesterday").is_err());
        assert!(parse_date_time("").is_err());
    }

    #[test]
    fn test_offset_dates() {
        let date_time = parse_date_time("2023-06-01T08:30:00+02:00").unwrap();
        assert_eq!(format_sql_date(&date_time), "2023-06-01 08:30:00");
        assert_eq!(format_sql_date_gmt(&date_time), "2023-06-01 06:30:00");
        assert_eq!(format_rfc822(&date_time), "Thu, 01 Jun 2023 06:30:00 +0000");

        let date_time = parse_date_time("2023-06-01 08:30:00-03:00").unwrap();
        assert_eq!(format_sql_date_gmt(&date_time), "2023-06-01 11:30:00");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World! 2024"), "hello-world-2024");
        assert_eq!(slugify("  --Rust__is  fun--  "), "rust-is-fun");
        assert_eq!(slugify("Café au lait"), "caf-au-lait");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_nicename() {
        assert_eq!(nicename("Open Source"), "open-source");
        assert_eq!(nicename("rust"), "rust");
    }
}
