//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    /// Public origin for canonical and share links, e.g. "https://balqaasem.xyz".
    /// Always configured here, never hardcoded at the call site.
    pub url: String,
    pub root: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,
    /// Directory under source/ holding per-post hero images, keyed by slug
    pub post_image_dir: String,

    // Writing
    pub new_post_name: String,
    pub render_drafts: bool,

    // Date format (chrono format string)
    pub date_format: String,

    // Blog index
    pub per_page: usize,

    // Home page
    #[serde(default)]
    pub home: HomeConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),
            post_image_dir: "images/posts".to_string(),

            new_post_name: ":title.md".to_string(),
            render_drafts: false,

            date_format: "%Y-%m-%d".to_string(),

            per_page: 10,

            home: HomeConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Public origin with any trailing slash removed
    pub fn origin(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// Home page configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    /// Headline rendered with the animated-text treatment
    pub headline: String,
    /// Introduction paragraph below the headline
    pub bio: String,
    /// Profile image path relative to source/
    pub profile_image: String,
    /// Resume file path relative to source/ (download CTA)
    pub resume: String,
    /// Contact email for the mailto CTA
    pub contact_email: String,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            headline: "If You Can Imagine It, I Can Build It.".to_string(),
            bio: String::new(),
            profile_image: "images/profile/profile.png".to_string(),
            resume: "resume.pdf".to_string(),
            contact_email: String::new(),
        }
    }
}
