//! Markdown rendering with HTML sanitization
//!
//! Pipeline: parse markdown (GFM extensions, raw inline HTML passes
//! through), apply the code presentation policy, then clean the whole
//! fragment against an allow-list. The output never contains disallowed
//! tags or attributes, even for hand-authored HTML in the source.

use anyhow::Result;
use lazy_static::lazy_static;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;

lazy_static! {
    /// Fence info strings we accept as a language tag
    static ref LANGUAGE_RE: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_+#.-]*$").unwrap();
}

/// Presentation policy for a code fragment
///
/// Exactly two rendering branches: block code (fenced or indented) gets a
/// scrollable monospace container, inline code gets lighter inline styling.
/// This is not a syntax highlighter; the language tag only ends up as a
/// class on the `<code>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeStyle {
    pub language_tag: Option<String>,
    pub is_block: bool,
}

impl CodeStyle {
    /// Style for a fenced or indented code block
    pub fn block(info: &str) -> Self {
        let info = info.trim();
        // Fence info may already carry the "language-" prefix
        let tag = info.strip_prefix("language-").unwrap_or(info);
        let language_tag = if LANGUAGE_RE.is_match(tag) {
            Some(tag.to_string())
        } else {
            // Unrecognized or missing tag still renders as a block
            None
        };
        Self {
            language_tag,
            is_block: true,
        }
    }

    /// Style for an inline code span
    pub fn inline() -> Self {
        Self {
            language_tag: None,
            is_block: false,
        }
    }

    /// Render a code fragment under this policy
    pub fn render(&self, code: &str) -> String {
        let escaped = html_escape(code);
        if self.is_block {
            match &self.language_tag {
                Some(lang) => format!(
                    r#"<pre class="code-block"><code class="language-{}">{}</code></pre>"#,
                    lang, escaped
                ),
                None => format!(r#"<pre class="code-block"><code>{}</code></pre>"#, escaped),
            }
        } else {
            format!(r#"<code class="code-inline">{}</code>"#, escaped)
        }
    }
}

/// Markdown renderer producing sanitized HTML
pub struct MarkdownRenderer {
    cleaner: ammonia::Builder<'static>,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        let mut cleaner = ammonia::Builder::default();
        cleaner.add_tag_attributes("code", &["class"]);
        cleaner.add_tag_attributes("pre", &["class"]);
        // The class attribute survives only for the enumerated presentation
        // classes; everything else is stripped.
        cleaner.attribute_filter(|element, attribute, value| {
            if attribute != "class" {
                return Some(value.into());
            }
            let keep = match element {
                "pre" => value == "code-block",
                "code" => {
                    value == "code-inline"
                        || value
                            .strip_prefix("language-")
                            .map(|lang| LANGUAGE_RE.is_match(lang))
                            .unwrap_or(false)
                }
                _ => false,
            };
            if keep {
                Some(value.into())
            } else {
                None
            }
        });
        Self { cleaner }
    }

    /// Render markdown to sanitized HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut code_style: Option<CodeStyle> = None;
        let mut code_buf = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    code_style = Some(match kind {
                        CodeBlockKind::Fenced(info) => CodeStyle::block(&info),
                        CodeBlockKind::Indented => CodeStyle::block(""),
                    });
                    code_buf.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(style) = code_style.take() {
                        events.push(Event::Html(CowStr::from(style.render(&code_buf))));
                    }
                }
                Event::Text(text) if code_style.is_some() => {
                    code_buf.push_str(&text);
                }
                Event::Code(text) => {
                    events.push(Event::Html(CowStr::from(CodeStyle::inline().render(&text))));
                }
                other => events.push(other),
            }
        }

        let mut html_output = String::with_capacity(markdown.len() * 2);
        html::push_html(&mut html_output, events.into_iter());

        Ok(self.cleaner.clean(&html_output).to_string())
    }

    /// Parse excerpt from content (split by <!-- more -->)
    pub fn split_excerpt(content: &str) -> (Option<String>, String) {
        if let Some(pos) = content.find("<!-- more -->") {
            let excerpt = content[..pos].trim().to_string();
            let remaining = content[pos + 13..].trim().to_string();
            let full = format!("{}\n\n{}", excerpt, remaining);
            (Some(excerpt), full)
        } else {
            (None, content.to_string())
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple HTML escaping for code fragments
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
