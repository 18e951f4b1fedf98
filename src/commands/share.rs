//! Print or copy share links for a post

use anyhow::{anyhow, Result};

use crate::content::loader::ContentLoader;
use crate::share::{self, ShareTarget, SystemClipboard};
use crate::Folio;

/// Print the canonical link and platform share URLs for a post.
/// With `copy`, also write the canonical link to the system clipboard
/// and report the outcome.
pub fn run(folio: &Folio, slug: &str, copy: bool) -> Result<()> {
    let loader = ContentLoader::new(folio);
    let post = loader
        .find_post(slug)?
        .ok_or_else(|| anyhow!("No post with slug '{}'", slug))?;

    let link = share::canonical_link(&folio.config, &post.slug);
    println!("{}", link);
    for target in ShareTarget::ALL {
        println!("  {}: {}", target.label(), target.share_url(&link, &post.title));
    }

    if copy {
        let mut clipboard = SystemClipboard::new()?;
        match share::copy_link(&mut clipboard, &link) {
            Ok(()) => println!("Link copied to clipboard."),
            Err(e) => {
                // Failure must be visible, never a silent success
                eprintln!("Could not copy link: {}", e);
                return Err(e.into());
            }
        }
    }

    Ok(())
}
