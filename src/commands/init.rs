//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Default _config.yml written by init
const DEFAULT_CONFIG: &str = r#"# Folio Configuration

# Site
title: Folio
subtitle: ''
description: ''
author: John Doe
language: en

# URL
## Public origin used for canonical and share links
url: http://example.com
root: /

# Directory
source_dir: source
public_dir: public
post_image_dir: images/posts

# Writing
new_post_name: :title.md
render_drafts: false

# Date format (chrono format string)
date_format: '%Y-%m-%d'

# Blog index
per_page: 10

# Home page
home:
  headline: If You Can Imagine It, I Can Build It.
  bio: ''
  profile_image: images/profile/profile.png
  resume: resume.pdf
  contact_email: ''
"#;

/// Sample post created by init
const SAMPLE_POST: &str = r#"---
title: Hello World
subtitle: Welcome to your new site
date: 2024-01-01
topic: Meta
tags:
  - hello
---
This is your first post. Edit or delete it, then start writing!

```rust
fn main() {
    println!("Hello, world!");
}
```
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("source/_posts"))?;
    fs::create_dir_all(target_dir.join("source/images/posts"))?;
    fs::create_dir_all(target_dir.join("source/images/profile"))?;

    let config_path = target_dir.join("_config.yml");
    if !config_path.exists() {
        fs::write(&config_path, DEFAULT_CONFIG)?;
    }

    let sample_path = target_dir.join("source/_posts/hello-world.md");
    if !sample_path.exists() {
        fs::write(&sample_path, SAMPLE_POST)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Folio;

    #[test]
    fn test_init_creates_structure() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        assert!(dir.path().join("_config.yml").exists());
        assert!(dir.path().join("source/_posts/hello-world.md").exists());
        assert!(dir.path().join("source/images/posts").is_dir());

        // The scaffolded config must parse
        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.config.title, "Folio");
    }

    #[test]
    fn test_init_does_not_clobber_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.yml"), "title: Mine\n").unwrap();
        init_site(dir.path()).unwrap();

        let content = fs::read_to_string(dir.path().join("_config.yml")).unwrap();
        assert_eq!(content, "title: Mine\n");
    }
}
