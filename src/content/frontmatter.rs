//! Front-matter parsing

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter data from a post
///
/// Missing optional fields (series, tags) are tolerated and simply do not
/// render downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub date: Option<String>,
    pub topic: Option<String>,
    pub series: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    pub excerpt: Option<String>,
    /// Posts are published by default
    #[serde(default = "default_published")]
    pub published: bool,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

fn default_published() -> bool {
    true
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            title: None,
            subtitle: None,
            date: None,
            topic: None,
            series: None,
            tags: Vec::new(),
            excerpt: None,
            published: true,
            extra: HashMap::new(),
        }
    }
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.trim_start();

        if !content.starts_with("---") {
            // No front-matter block
            return Ok((FrontMatter::default(), content));
        }

        let after_open = &content[3..];
        let close = after_open
            .find("\n---")
            .ok_or_else(|| anyhow!("unterminated front-matter block"))?;

        let yaml = &after_open[..close];
        let body = after_open[close + 4..].trim_start_matches('\n');

        let fm: FrontMatter = serde_yaml::from_str(yaml)?;
        Ok((fm, body))
    }

    /// Parse the date field, accepting `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`
    pub fn parse_date(&self) -> Option<DateTime<Local>> {
        let raw = self.date.as_deref()?.trim();

        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
            return Local.from_local_datetime(&dt).single();
        }

        if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            let dt = d.and_hms_opt(0, 0, 0)?;
            return Local.from_local_datetime(&dt).single();
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let content = r#"---
title: My Post
subtitle: A short subtitle
date: 2024-05-30
topic: Web3
series: Building Blocks
tags:
  - rust
  - wasm
---
Body text here.
"#;
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("My Post"));
        assert_eq!(fm.subtitle.as_deref(), Some("A short subtitle"));
        assert_eq!(fm.topic.as_deref(), Some("Web3"));
        assert_eq!(fm.series.as_deref(), Some("Building Blocks"));
        assert_eq!(fm.tags, vec!["rust", "wasm"]);
        assert!(fm.published);
        assert_eq!(body.trim(), "Body text here.");
    }

    #[test]
    fn test_parse_missing_optionals() {
        let content = "---\ntitle: Sparse\n---\nBody.";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Sparse"));
        assert!(fm.series.is_none());
        assert!(fm.tags.is_empty());
        assert_eq!(body, "Body.");
    }

    #[test]
    fn test_parse_no_front_matter() {
        let (fm, body) = FrontMatter::parse("Just text.").unwrap();
        assert!(fm.title.is_none());
        assert_eq!(body, "Just text.");
    }

    #[test]
    fn test_tags_as_single_string() {
        let content = "---\ntags: rust\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, vec!["rust"]);
    }

    #[test]
    fn test_parse_date_formats() {
        let mut fm = FrontMatter::default();
        fm.date = Some("2024-05-30".to_string());
        assert!(fm.parse_date().is_some());

        fm.date = Some("2024-05-30 18:30:00".to_string());
        assert!(fm.parse_date().is_some());

        fm.date = Some("not a date".to_string());
        assert!(fm.parse_date().is_none());
    }

    #[test]
    fn test_unterminated_block_is_error() {
        assert!(FrontMatter::parse("---\ntitle: Broken\n").is_err());
    }
}
