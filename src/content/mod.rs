//! Content module - handles posts and content processing

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::FrontMatter;
pub use markdown::{CodeStyle, MarkdownRenderer};
pub use post::Post;
