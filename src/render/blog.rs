//! Blog index page - lists posts newest first

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{format_date, html_escape, strip_html, truncate};

/// Render the blog index body
pub fn render(config: &SiteConfig, posts: &[Post]) -> String {
    let items = posts
        .iter()
        .map(|post| {
            let teaser = post
                .excerpt
                .as_deref()
                .map(strip_html)
                .unwrap_or_else(|| post.subtitle.clone());
            format!(
                r#"<li>
<span class="date">{date}</span>
<a href="{path}">{title}</a>
<p>{teaser}</p>
</li>"#,
                date = format_date(&post.date, &config.date_format),
                path = post.path,
                title = html_escape(&post.title),
                teaser = html_escape(&truncate(&teaser, 160, None)),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<h1>Blog</h1>
<ul class="post-list">
{items}
</ul>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    #[test]
    fn test_blog_index_lists_posts() {
        let config = SiteConfig::default();
        let mut post = Post::new("One".to_string(), Local::now(), "one.md".to_string());
        post.path = "/blog/one/".to_string();
        post.subtitle = "teaser".to_string();

        let html = render(&config, &[post]);
        assert!(html.contains(r#"<a href="/blog/one/">One</a>"#));
        assert!(html.contains("teaser"));
    }

    #[test]
    fn test_blog_index_empty() {
        let config = SiteConfig::default();
        let html = render(&config, &[]);
        assert!(html.contains("post-list"));
        assert!(!html.contains("<li>"));
    }
}
