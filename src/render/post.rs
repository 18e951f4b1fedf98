//! Expanded post view
//!
//! Composes metadata, tag badges, the hero image, the share row, and the
//! rendered body into one scrollable container. The view is a pure
//! function of the injected post; the host owns which post (if any) is
//! currently expanded.

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{format_date, html_escape, url_for};
use crate::share::{canonical_link, ShareTarget};

/// A post-detail view with a caller-supplied dismiss action
pub struct ExpandedPost<'a> {
    post: &'a Post,
    dismiss: Option<Box<dyn FnOnce()>>,
}

impl<'a> ExpandedPost<'a> {
    pub fn new(post: &'a Post) -> Self {
        Self {
            post,
            dismiss: None,
        }
    }

    /// Supply the callback fired when the close control is activated
    pub fn on_dismiss(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.dismiss = Some(Box::new(callback));
        self
    }

    /// Signal the host to hide the view
    ///
    /// Fires the callback at most once however many times the close
    /// control is activated.
    pub fn dismiss(&mut self) {
        if let Some(callback) = self.dismiss.take() {
            callback();
        }
    }

    /// Render the view to HTML
    pub fn render(&self, config: &SiteConfig) -> String {
        let post = self.post;
        let link = canonical_link(config, &post.slug);
        let image_path = post.image_path(&config.root, &config.post_image_dir);

        let series = match &post.series {
            Some(series) => format!(
                r#"<p class="series">Series: {}</p>"#,
                html_escape(series)
            ),
            None => String::new(),
        };

        let tags = post
            .tags
            .iter()
            .map(|tag| format!(r#"<span class="tag">{}</span>"#, html_escape(tag)))
            .collect::<Vec<_>>()
            .join("\n");

        let share_links = ShareTarget::ALL
            .iter()
            .map(|target| {
                format!(
                    r#"<a href="{}" target="_blank" rel="noopener" title="Share on {label}">{label}</a>"#,
                    target.share_url(&link, &post.title),
                    label = target.label(),
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<div class="expanded-post">
<a class="close" href="{close_href}" aria-label="Close">&times;</a>
<h2>{title}</h2>
<div class="post-heading">
<p class="date">{date}</p>
<p class="subtitle">{subtitle}</p>
{series}<p class="topic">Topic: {topic}</p>
<div class="post-tags">
{tags}
</div>
</div>
<figure class="post-hero">
<img src="{image}" alt="{title}" width="768" height="400" loading="lazy" fetchpriority="high" sizes="(max-width: 768px) 100vw, 50vw">
</figure>
<div class="share-row">
<p class="share-label">Share with:</p>
{share_links}
<button class="copy-link" data-link="{link}" title="Copy link">Copy link</button>
</div>
<article class="post-content">
{content}
</article>
</div>
"#,
            close_href = url_for(config, "blog/"),
            title = html_escape(&post.title),
            date = format_date(&post.date, &config.date_format),
            subtitle = html_escape(&post.subtitle),
            series = series,
            topic = html_escape(&post.topic),
            tags = tags,
            image = image_path,
            share_links = share_links,
            link = html_escape(&link),
            content = post.content,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use std::cell::Cell;
    use std::rc::Rc;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.url = "https://balqaasem.xyz".to_string();
        config
    }

    fn test_post() -> Post {
        let mut post = Post::new(
            "Hello World".to_string(),
            Local::now(),
            "hello-world.md".to_string(),
        );
        post.subtitle = "A subtitle".to_string();
        post.topic = "Rust".to_string();
        post.content = "<p>body</p>".to_string();
        post
    }

    #[test]
    fn test_no_tags_renders_zero_badges() {
        let config = test_config();
        let html = ExpandedPost::new(&test_post()).render(&config);
        assert!(!html.contains(r#"<span class="tag">"#));
    }

    #[test]
    fn test_tags_render_as_badges() {
        let config = test_config();
        let mut post = test_post();
        post.tags = vec!["rust".to_string(), "wasm".to_string()];
        let html = ExpandedPost::new(&post).render(&config);
        assert_eq!(html.matches(r#"<span class="tag">"#).count(), 2);
    }

    #[test]
    fn test_series_absent_not_rendered() {
        let config = test_config();
        let html = ExpandedPost::new(&test_post()).render(&config);
        assert!(!html.contains("Series:"));
    }

    #[test]
    fn test_series_renders_exactly_once() {
        let config = test_config();
        let mut post = test_post();
        post.series = Some("Deep Dives".to_string());
        let html = ExpandedPost::new(&post).render(&config);
        assert_eq!(html.matches("Series: Deep Dives").count(), 1);
    }

    #[test]
    fn test_hero_image_attributes() {
        let config = test_config();
        let html = ExpandedPost::new(&test_post()).render(&config);
        assert!(html.contains(r#"src="/images/posts/hello-world.png""#));
        assert!(html.contains(r#"width="768" height="400""#));
        assert!(html.contains(r#"loading="lazy""#));
        assert!(html.contains(r#"fetchpriority="high""#));
    }

    #[test]
    fn test_share_row_targets() {
        let config = test_config();
        let html = ExpandedPost::new(&test_post()).render(&config);
        assert!(html.contains("linkedin.com/sharing/share-offsite"));
        assert!(html.contains("t.me/share/url"));
        assert!(html.contains("twitter.com/intent/tweet"));
        assert!(html.contains(r#"data-link="https://balqaasem.xyz/blog?slug=hello-world""#));
    }

    #[test]
    fn test_dismiss_fires_exactly_once() {
        let count = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&count);
        let post = test_post();
        let mut view = ExpandedPost::new(&post).on_dismiss(move || {
            counter.set(counter.get() + 1);
        });

        view.dismiss();
        view.dismiss();
        view.dismiss();

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_dismiss_without_callback_is_noop() {
        let post = test_post();
        let mut view = ExpandedPost::new(&post);
        view.dismiss();
    }
}
