//! Content loader - loads posts from the source directory

use anyhow::Result;
use chrono::Local;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{FrontMatter, MarkdownRenderer, Post};
use crate::helpers::url_for;
use crate::Folio;

/// Loads posts from source/_posts
pub struct ContentLoader<'a> {
    folio: &'a Folio,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(folio: &'a Folio) -> Self {
        Self {
            folio,
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Load all posts from source/_posts
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let posts_dir = self.folio.source_dir.join("_posts");
        if !posts_dir.exists() {
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&posts_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match self.load_post(path) {
                    Ok(post) => {
                        if post.published || self.folio.config.render_drafts {
                            posts.push(post);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load post {:?}: {}", path, e);
                    }
                }
            }
        }

        // Sort by date descending (newest first)
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(posts)
    }

    /// Find a single post by slug
    pub fn find_post(&self, slug: &str) -> Result<Option<Post>> {
        Ok(self.load_posts()?.into_iter().find(|p| p.slug == slug))
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path) -> Result<Post> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        // File mtime is the date fallback
        let file_modified = fs::metadata(path)
            .ok()
            .and_then(|m| m.modified().ok())
            .map(chrono::DateTime::<Local>::from);

        let date = fm
            .parse_date()
            .unwrap_or_else(|| file_modified.unwrap_or_else(Local::now));

        let title = fm.title.clone().unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Untitled")
                .to_string()
        });

        let source = path
            .strip_prefix(&self.folio.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        // The slug derives from the file name, slugified so it stays
        // URL-safe. The canonical share link and the image asset both
        // key off it.
        let slug = slug::slugify(
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("untitled"),
        );

        let post_path = url_for(&self.folio.config, &format!("blog/{}/", slug));
        let permalink = format!("{}{}", self.folio.config.origin(), post_path);

        let (excerpt_md, full_md) = MarkdownRenderer::split_excerpt(body);
        let content_html = self.renderer.render(&full_md)?;
        let excerpt_html = match &excerpt_md {
            Some(e) => Some(self.renderer.render(e)?),
            None => None,
        };

        let mut post = Post::new(title, date, source);
        post.raw = body.to_string();
        post.content = content_html;
        post.excerpt = excerpt_html;
        post.subtitle = fm.subtitle.unwrap_or_default();
        post.topic = fm.topic.unwrap_or_default();
        post.series = fm.series;
        post.tags = fm.tags;
        post.full_source = path.to_path_buf();
        post.path = post_path;
        post.permalink = permalink;
        post.published = fm.published;
        post.slug = slug;
        post.extra = fm.extra;

        Ok(post)
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn site_with_post(name: &str, content: &str) -> (tempfile::TempDir, Folio) {
        let dir = tempfile::tempdir().unwrap();
        let posts_dir = dir.path().join("source/_posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(posts_dir.join(name), content).unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        (dir, folio)
    }

    #[test]
    fn test_load_post_fields() {
        let (_dir, folio) = site_with_post(
            "Hello World.md",
            r#"---
title: Hello World
subtitle: First post
date: 2024-05-30
topic: Rust
series: Basics
tags: [rust, blog]
---
Some **content**.
"#,
        );
        let loader = ContentLoader::new(&folio);
        let posts = loader.load_posts().unwrap();
        assert_eq!(posts.len(), 1);

        let post = &posts[0];
        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.title, "Hello World");
        assert_eq!(post.subtitle, "First post");
        assert_eq!(post.topic, "Rust");
        assert_eq!(post.series.as_deref(), Some("Basics"));
        assert_eq!(post.tags, vec!["rust", "blog"]);
        assert!(post.content.contains("<strong>content</strong>"));
        assert_eq!(post.path, "/blog/hello-world/");
    }

    #[test]
    fn test_unpublished_posts_skipped() {
        let (_dir, folio) = site_with_post("draft.md", "---\npublished: false\n---\nhidden");
        let loader = ContentLoader::new(&folio);
        assert!(loader.load_posts().unwrap().is_empty());
    }

    #[test]
    fn test_posts_sorted_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let posts_dir = dir.path().join("source/_posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(posts_dir.join("old.md"), "---\ndate: 2020-01-01\n---\nold").unwrap();
        fs::write(posts_dir.join("new.md"), "---\ndate: 2024-01-01\n---\nnew").unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        let posts = ContentLoader::new(&folio).load_posts().unwrap();
        assert_eq!(posts[0].slug, "new");
        assert_eq!(posts[1].slug, "old");
    }

    #[test]
    fn test_find_post() {
        let (_dir, folio) = site_with_post("findme.md", "---\ntitle: Find Me\n---\nx");
        let loader = ContentLoader::new(&folio);
        assert!(loader.find_post("findme").unwrap().is_some());
        assert!(loader.find_post("missing").unwrap().is_none());
    }

    #[test]
    fn test_missing_posts_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        assert!(ContentLoader::new(&folio).load_posts().unwrap().is_empty());
    }
}
