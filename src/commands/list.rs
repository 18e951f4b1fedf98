//! List site content

use anyhow::Result;
use std::collections::HashMap;

use crate::content::loader::ContentLoader;
use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let loader = ContentLoader::new(folio);
    let posts = loader.load_posts()?;

    match content_type {
        "post" | "posts" => {
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}]",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.slug
                );
            }
        }
        "tag" | "tags" => {
            let mut tags: HashMap<String, usize> = HashMap::new();
            for post in &posts {
                for tag in &post.tags {
                    *tags.entry(tag.clone()).or_insert(0) += 1;
                }
            }
            println!("Tags ({}):", tags.len());
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "topic" | "topics" => {
            let mut topics: HashMap<String, usize> = HashMap::new();
            for post in &posts {
                if !post.topic.is_empty() {
                    *topics.entry(post.topic.clone()).or_insert(0) += 1;
                }
            }
            println!("Topics ({}):", topics.len());
            let mut topics: Vec<_> = topics.into_iter().collect();
            topics.sort_by(|a, b| b.1.cmp(&a.1));
            for (topic, count) in topics {
                println!("  {} ({})", topic, count);
            }
        }
        "series" => {
            let mut series: HashMap<String, usize> = HashMap::new();
            for post in &posts {
                if let Some(s) = &post.series {
                    *series.entry(s.clone()).or_insert(0) += 1;
                }
            }
            println!("Series ({}):", series.len());
            for (name, count) in series {
                println!("  {} ({})", name, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, topic, series",
                content_type
            );
        }
    }

    Ok(())
}
