//! Presentation layer - composes pages as HTML strings
//!
//! Pages are pure functions of the loaded content and the site config;
//! nothing here owns navigation or mutable state.

pub mod blog;
pub mod home;
pub mod post;

use crate::config::SiteConfig;
use crate::helpers::{html_escape, meta_generator, open_graph, url_for};

/// Embedded stylesheet for all generated pages
const STYLESHEET: &str = include_str!("folio.css");

/// Inline script wiring copy-link buttons
///
/// The button must report failure distinctly from success; a clipboard
/// write that is denied never shows "Copied!".
const COPY_SCRIPT: &str = r#"<script>
document.addEventListener('click', function (e) {
  var btn = e.target.closest('.copy-link');
  if (!btn) return;
  navigator.clipboard.writeText(btn.dataset.link).then(
    function () { btn.textContent = 'Copied!'; },
    function () { btn.textContent = 'Copy failed'; }
  );
});
</script>"#;

/// Compose a full HTML document around a rendered body
pub fn page_shell(
    config: &SiteConfig,
    title: &str,
    description: &str,
    canonical: &str,
    image: Option<&str>,
    body: &str,
) -> String {
    let og = open_graph(title, description, canonical, image, &config.title);

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta name="description" content="{description}">
<link rel="canonical" href="{canonical}">
{generator}
{og}
<style>
{css}
</style>
</head>
<body>
<header class="site-header">
<a class="site-title" href="{home}">{site_title}</a>
<nav><a href="{blog}">Blog</a></nav>
</header>
<main>
{body}
</main>
<footer class="site-footer">&copy; {author}</footer>
{copy_script}
</body>
</html>
"#,
        lang = config.language,
        title = html_escape(title),
        description = html_escape(description),
        canonical = canonical,
        generator = meta_generator(),
        og = og,
        css = STYLESHEET,
        home = url_for(config, ""),
        site_title = html_escape(&config.title),
        blog = url_for(config, "blog/"),
        body = body,
        author = html_escape(&config.author),
        copy_script = COPY_SCRIPT,
    )
}
