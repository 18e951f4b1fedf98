//! Generator module - writes the static site to the public directory

use anyhow::Result;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::content::Post;
use crate::helpers::{date_xml, full_url_for, html_escape, strip_html, truncate};
use crate::render::{self, post::ExpandedPost};
use crate::Folio;

/// Static site generator
pub struct Generator {
    folio: Folio,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Self {
        Self {
            folio: folio.clone(),
        }
    }

    /// Generate the entire site
    pub fn generate(&self, posts: &[Post]) -> Result<()> {
        fs::create_dir_all(&self.folio.public_dir)?;

        self.copy_source_assets()?;

        let mut sorted_posts: Vec<_> = posts.to_vec();
        sorted_posts.sort_by(|a, b| b.date.cmp(&a.date));

        self.generate_home_page()?;
        self.generate_blog_index(&sorted_posts)?;
        self.generate_post_pages(&sorted_posts)?;
        self.generate_atom_feed(&sorted_posts)?;

        Ok(())
    }

    /// Write index.html (home page)
    fn generate_home_page(&self) -> Result<()> {
        let config = &self.folio.config;
        let body = render::home::render(config);
        let page = render::page_shell(
            config,
            &config.title,
            &config.description,
            &full_url_for(config, ""),
            None,
            &body,
        );
        self.write_page(Path::new("index.html"), &page)
    }

    /// Write blog/index.html (post list)
    fn generate_blog_index(&self, posts: &[Post]) -> Result<()> {
        let config = &self.folio.config;
        let body = render::blog::render(config, posts);
        let page = render::page_shell(
            config,
            &format!("Blog - {}", config.title),
            &config.description,
            &full_url_for(config, "blog/"),
            None,
            &body,
        );
        self.write_page(Path::new("blog/index.html"), &page)
    }

    /// Write blog/<slug>/index.html for every post
    fn generate_post_pages(&self, posts: &[Post]) -> Result<()> {
        let config = &self.folio.config;

        for post in posts {
            // The content author must supply the hero asset; absence is
            // worth a warning but never fails generation.
            let asset = self
                .folio
                .source_dir
                .join(&config.post_image_dir)
                .join(format!("{}.png", post.slug));
            if !asset.exists() {
                tracing::warn!("Missing hero image for post '{}': {:?}", post.slug, asset);
            }

            let body = ExpandedPost::new(post).render(config);
            let description = post
                .excerpt
                .as_deref()
                .map(strip_html)
                .unwrap_or_else(|| post.subtitle.clone());
            let page = render::page_shell(
                config,
                &format!("{} - {}", post.title, config.title),
                &truncate(&description, 200, None),
                &post.permalink,
                Some(&post.image_path(&config.root, &config.post_image_dir)),
                &body,
            );

            let rel = Path::new("blog").join(&post.slug).join("index.html");
            self.write_page(&rel, &page)?;
        }

        Ok(())
    }

    /// Write atom.xml
    fn generate_atom_feed(&self, posts: &[Post]) -> Result<()> {
        let config = &self.folio.config;
        let updated = posts
            .first()
            .map(|p| date_xml(&p.date))
            .unwrap_or_else(|| date_xml(&chrono::Local::now()));

        let mut feed = format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
<title>{title}</title>
<link href="{origin}/"/>
<link href="{origin}/atom.xml" rel="self"/>
<updated>{updated}</updated>
<id>{origin}/</id>
<author><name>{author}</name></author>
"#,
            title = html_escape(&config.title),
            origin = config.origin(),
            updated = updated,
            author = html_escape(&config.author),
        );

        for post in posts.iter().take(config.per_page) {
            let summary = post
                .excerpt
                .as_deref()
                .map(strip_html)
                .unwrap_or_else(|| post.subtitle.clone());
            feed.push_str(&format!(
                r#"<entry>
<title>{title}</title>
<link href="{permalink}"/>
<id>{permalink}</id>
<updated>{updated}</updated>
<summary>{summary}</summary>
</entry>
"#,
                title = html_escape(&post.title),
                permalink = post.permalink,
                updated = date_xml(&post.date),
                summary = html_escape(&truncate(&summary, 200, None)),
            ));
        }
        feed.push_str("</feed>\n");

        self.write_page(Path::new("atom.xml"), &feed)
    }

    /// Copy non-markdown assets from source/ (images, resume, etc.)
    fn copy_source_assets(&self) -> Result<()> {
        if !self.folio.source_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(&self.folio.source_dir)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            let relative = path.strip_prefix(&self.folio.source_dir).unwrap_or(path);

            // Content directories (underscore-prefixed) are not assets
            if relative
                .components()
                .next()
                .and_then(|c| c.as_os_str().to_str())
                .map(|c| c.starts_with('_'))
                .unwrap_or(false)
            {
                continue;
            }

            if path.is_file() && !is_markdown(path) {
                let dest = self.folio.public_dir.join(relative);
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(path, &dest)?;
                tracing::debug!("Copied asset: {:?}", relative);
            }
        }

        Ok(())
    }

    fn write_page(&self, relative: &Path, content: &str) -> Result<()> {
        let dest = self.folio.public_dir.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&dest, content)?;
        tracing::debug!("Wrote: {:?}", relative);
        Ok(())
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
