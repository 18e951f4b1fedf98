//! Post model

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A blog post
///
/// Read-only to the rendering layer: nothing mutates a post after the
/// loader has built it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// URL-safe unique identifier, also the hero image key.
    /// Invariant: non-empty, slugified from the source file stem.
    pub slug: String,

    /// Post title
    pub title: String,

    /// Short subtitle shown under the date
    pub subtitle: String,

    /// Publication date
    pub date: DateTime<Local>,

    /// Topic label
    pub topic: String,

    /// Optional series label; renders only when present
    pub series: Option<String>,

    /// Ordered tags, rendered as badges; may be empty
    pub tags: Vec<String>,

    /// Raw markdown content
    pub raw: String,

    /// Rendered, sanitized HTML content
    pub content: String,

    /// Rendered excerpt (before <!-- more -->)
    pub excerpt: Option<String>,

    /// Source file path (relative to source dir)
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// URL path (without root)
    pub path: String,

    /// Full permalink URL
    pub permalink: String,

    /// Whether the post is published
    pub published: bool,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(title: String, date: DateTime<Local>, source: String) -> Self {
        let slug = slug::slugify(&title);
        Self {
            slug,
            title,
            subtitle: String::new(),
            date,
            topic: String::new(),
            series: None,
            tags: Vec::new(),
            raw: String::new(),
            content: String::new(),
            excerpt: None,
            source: source.clone(),
            full_source: PathBuf::from(&source),
            path: String::new(),
            permalink: String::new(),
            published: true,
            extra: HashMap::new(),
        }
    }

    /// Derived hero image path: `<root>images/posts/<slug>.png`
    pub fn image_path(&self, root: &str, image_dir: &str) -> String {
        format!(
            "{}/{}/{}.png",
            root.trim_end_matches('/'),
            image_dir.trim_matches('/'),
            self.slug
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str) -> Post {
        let mut p = Post::new(slug.to_string(), Local::now(), format!("{}.md", slug));
        p.slug = slug.to_string();
        p
    }

    #[test]
    fn test_slug_from_title() {
        let p = Post::new(
            "Hello World".to_string(),
            Local::now(),
            "hello.md".to_string(),
        );
        assert_eq!(p.slug, "hello-world");
    }

    #[test]
    fn test_image_path() {
        let p = post("hello-world");
        assert_eq!(
            p.image_path("/", "images/posts"),
            "/images/posts/hello-world.png"
        );
    }
}
