// src/models/item.rs

//! Display-ready archive item.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A year as published by the manifest: either a number or free text
/// such as `"1990s"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Number(serde_json::Number),
    Text(String),
}

impl Year {
    /// Whether the value counts as missing (`0` or `""`).
    pub fn is_blank(&self) -> bool {
        match self {
            Year::Number(n) => n.as_f64() == Some(0.0),
            Year::Text(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Number(n) => write!(f, "{n}"),
            Year::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Year {
    fn from(value: i64) -> Self {
        Year::Number(value.into())
    }
}

impl From<&str> for Year {
    fn from(value: &str) -> Self {
        Year::Text(value.to_string())
    }
}

/// A normalized record derived from one manifest entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveItem {
    /// Manifest key
    pub id: String,

    /// Absolute URL of the media asset
    pub url: String,

    pub title: String,

    pub year: Year,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl ArchiveItem {
    /// The first `limit` tags, as shown on an archive card.
    pub fn tag_preview(&self, limit: usize) -> &[String] {
        &self.tags[..self.tags.len().min(limit)]
    }

    /// Format item for display using a template.
    ///
    /// Supported placeholders: `{id}`, `{title}`, `{year}`, `{url}`, `{tags}`
    pub fn format(&self, template: &str, tag_limit: usize) -> String {
        let tags = self
            .tag_preview(tag_limit)
            .iter()
            .map(|t| format!("#{t}"))
            .collect::<Vec<_>>()
            .join(" ");

        template
            .replace("{id}", &self.id)
            .replace("{title}", &self.title)
            .replace("{year}", &self.year.to_string())
            .replace("{url}", &self.url)
            .replace("{tags}", &tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> ArchiveItem {
        ArchiveItem {
            id: "a".to_string(),
            url: "https://example.com/y/img1.jpg".to_string(),
            title: "Draft Day".to_string(),
            year: Year::from(2010),
            tags: vec![
                "nba".to_string(),
                "draft".to_string(),
                "press".to_string(),
                "family".to_string(),
            ],
        }
    }

    #[test]
    fn test_year_display() {
        assert_eq!(Year::from(2010).to_string(), "2010");
        assert_eq!(Year::from("1990s").to_string(), "1990s");
    }

    #[test]
    fn test_year_deserializes_number_or_text() {
        let n: Year = serde_json::from_str("2010").unwrap();
        let s: Year = serde_json::from_str("\"Archival\"").unwrap();
        assert_eq!(n, Year::from(2010));
        assert_eq!(s, Year::from("Archival"));
    }

    #[test]
    fn test_year_blank() {
        assert!(Year::from(0).is_blank());
        assert!(Year::from("").is_blank());
        assert!(!Year::from(2010).is_blank());
        assert!(!Year::from("0").is_blank());
    }

    #[test]
    fn test_tag_preview_truncates() {
        let item = sample_item();
        assert_eq!(item.tag_preview(3), &["nba", "draft", "press"]);
        assert_eq!(item.tag_preview(10).len(), 4);
    }

    #[test]
    fn test_format() {
        let item = sample_item();
        let result = item.format("[{year}] {title} {tags}", 2);
        assert_eq!(result, "[2010] Draft Day #nba #draft");
    }
}
