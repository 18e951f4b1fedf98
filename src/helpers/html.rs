//! HTML helper functions

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Strip HTML tags from a string
pub fn strip_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;

    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

/// Truncate a string to a specified length
pub fn truncate(s: &str, length: usize, omission: Option<&str>) -> String {
    let omission = omission.unwrap_or("...");

    if s.chars().count() <= length {
        s.to_string()
    } else {
        let truncated: String = s
            .chars()
            .take(length.saturating_sub(omission.len()))
            .collect();
        format!("{}{}", truncated.trim_end(), omission)
    }
}

/// Generate Open Graph meta tags
pub fn open_graph(
    title: &str,
    description: &str,
    url: &str,
    image: Option<&str>,
    site_name: &str,
) -> String {
    let mut tags = vec![
        r#"<meta property="og:type" content="website">"#.to_string(),
        format!(
            r#"<meta property="og:title" content="{}">"#,
            html_escape(title)
        ),
        format!(r#"<meta property="og:url" content="{}">"#, url),
        format!(
            r#"<meta property="og:site_name" content="{}">"#,
            html_escape(site_name)
        ),
    ];

    if !description.is_empty() {
        tags.push(format!(
            r#"<meta property="og:description" content="{}">"#,
            html_escape(description)
        ));
    }

    if let Some(img) = image {
        tags.push(format!(r#"<meta property="og:image" content="{}">"#, img));
    }

    tags.join("\n")
}

/// Generate meta generator tag
pub fn meta_generator() -> String {
    format!(
        r#"<meta name="generator" content="folio-rs {}">"#,
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hello <b>World</b></p>"), "Hello World");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 8, None), "Hello...");
        assert_eq!(truncate("Hi", 10, None), "Hi");
    }

    #[test]
    fn test_open_graph_escapes_values() {
        let tags = open_graph("A & B", "", "https://x", None, "Site");
        assert!(tags.contains("A &amp; B"));
        assert!(!tags.contains("og:description"));
    }
}
