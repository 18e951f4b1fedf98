//! Share-link building and the copy-link action
//!
//! Derives the canonical public URL for a post and formats the outbound
//! share URLs for the three supported platforms. The canonical format
//! `<origin>/blog?slug=<slug>` is shared externally and must stay stable.

use copypasta::{ClipboardContext, ClipboardProvider};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;

use crate::config::SiteConfig;

/// Query-component encoding: everything but alphanumerics and the
/// characters `encodeURIComponent` leaves alone.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Errors from share actions
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("clipboard unavailable: {0}")]
    ClipboardUnavailable(String),
    #[error("clipboard write failed: {0}")]
    ClipboardWrite(String),
}

/// Percent-encode a value for embedding in a query string
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Canonical public link for a post
pub fn canonical_link(config: &SiteConfig, slug: &str) -> String {
    format!("{}/blog?slug={}", config.origin(), slug)
}

/// One of the fixed external platforms a post can be shared to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareTarget {
    ProfessionalNetwork,
    MessagingApp,
    Microblog,
}

impl ShareTarget {
    /// All targets, in display order
    pub const ALL: [ShareTarget; 3] = [
        ShareTarget::ProfessionalNetwork,
        ShareTarget::MessagingApp,
        ShareTarget::Microblog,
    ];

    /// Human-readable platform name
    pub fn label(&self) -> &'static str {
        match self {
            ShareTarget::ProfessionalNetwork => "LinkedIn",
            ShareTarget::MessagingApp => "Telegram",
            ShareTarget::Microblog => "Twitter",
        }
    }

    /// Fully encoded outbound share URL for this platform
    ///
    /// Only the microblog template embeds the post title.
    pub fn share_url(&self, link: &str, title: &str) -> String {
        match self {
            ShareTarget::ProfessionalNetwork => format!(
                "https://www.linkedin.com/sharing/share-offsite/?url={}",
                encode_component(link)
            ),
            ShareTarget::MessagingApp => {
                format!("https://t.me/share/url?url={}", encode_component(link))
            }
            ShareTarget::Microblog => format!(
                "https://twitter.com/intent/tweet?url={}&text={}",
                encode_component(link),
                encode_component(title)
            ),
        }
    }
}

/// Destination for the copy-link action
///
/// A seam over the system clipboard so callers (and tests) can observe
/// the outcome instead of assuming success.
pub trait ClipboardSink {
    fn set_contents(&mut self, contents: String) -> Result<(), ShareError>;
}

/// System clipboard backed by copypasta
pub struct SystemClipboard {
    ctx: ClipboardContext,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ShareError> {
        let ctx = ClipboardContext::new()
            .map_err(|e| ShareError::ClipboardUnavailable(e.to_string()))?;
        Ok(Self { ctx })
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_contents(&mut self, contents: String) -> Result<(), ShareError> {
        self.ctx
            .set_contents(contents)
            .map_err(|e| ShareError::ClipboardWrite(e.to_string()))
    }
}

/// Write the link verbatim to the clipboard
///
/// Returns an explicit result so the caller can surface failure instead
/// of silently reporting success.
pub fn copy_link(sink: &mut dyn ClipboardSink, link: &str) -> Result<(), ShareError> {
    sink.set_contents(link.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeClipboard {
        contents: Option<String>,
        fail: bool,
    }

    impl FakeClipboard {
        fn new() -> Self {
            Self {
                contents: None,
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                contents: None,
                fail: true,
            }
        }
    }

    impl ClipboardSink for FakeClipboard {
        fn set_contents(&mut self, contents: String) -> Result<(), ShareError> {
            if self.fail {
                return Err(ShareError::ClipboardWrite("denied".to_string()));
            }
            self.contents = Some(contents);
            Ok(())
        }
    }

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.url = "https://balqaasem.xyz".to_string();
        config
    }

    #[test]
    fn test_canonical_link() {
        let config = test_config();
        assert_eq!(
            canonical_link(&config, "hello-world"),
            "https://balqaasem.xyz/blog?slug=hello-world"
        );
    }

    #[test]
    fn test_canonical_link_trailing_slash_origin() {
        let mut config = test_config();
        config.url = "https://balqaasem.xyz/".to_string();
        assert_eq!(
            canonical_link(&config, "hello-world"),
            "https://balqaasem.xyz/blog?slug=hello-world"
        );
    }

    #[test]
    fn test_encode_component_matches_uri_component_rules() {
        assert_eq!(
            encode_component("https://balqaasem.xyz/blog?slug=hello-world"),
            "https%3A%2F%2Fbalqaasem.xyz%2Fblog%3Fslug%3Dhello-world"
        );
        // Unreserved marks pass through untouched
        assert_eq!(encode_component("a-b_c.d!e~f"), "a-b_c.d!e~f");
        assert_eq!(encode_component("a b&c"), "a%20b%26c");
    }

    #[test]
    fn test_professional_network_url() {
        let config = test_config();
        let link = canonical_link(&config, "hello-world");
        let url = ShareTarget::ProfessionalNetwork.share_url(&link, "ignored");
        assert!(url.starts_with("https://www.linkedin.com/sharing/share-offsite/?url="));
        assert!(url.contains("https%3A%2F%2Fbalqaasem.xyz%2Fblog%3Fslug%3Dhello-world"));
        assert!(!url.contains("ignored"));
    }

    #[test]
    fn test_messaging_app_url() {
        let config = test_config();
        let link = canonical_link(&config, "hello-world");
        let url = ShareTarget::MessagingApp.share_url(&link, "ignored");
        assert!(url.starts_with("https://t.me/share/url?url="));
        assert!(url.contains("hello-world"));
    }

    #[test]
    fn test_microblog_url_embeds_link_and_title() {
        let config = test_config();
        let link = canonical_link(&config, "hello-world");
        let url = ShareTarget::Microblog.share_url(&link, "My First Post & More");
        assert!(url.starts_with("https://twitter.com/intent/tweet?url="));
        assert!(url.contains("url=https%3A%2F%2Fbalqaasem.xyz%2Fblog%3Fslug%3Dhello-world"));
        assert!(url.contains("text=My%20First%20Post%20%26%20More"));
    }

    #[test]
    fn test_copy_link_success() {
        let mut clipboard = FakeClipboard::new();
        copy_link(&mut clipboard, "https://balqaasem.xyz/blog?slug=x").unwrap();
        assert_eq!(
            clipboard.contents.as_deref(),
            Some("https://balqaasem.xyz/blog?slug=x")
        );
    }

    #[test]
    fn test_copy_link_failure_is_reported() {
        let mut clipboard = FakeClipboard::failing();
        let err = copy_link(&mut clipboard, "link").unwrap_err();
        assert!(matches!(err, ShareError::ClipboardWrite(_)));
    }
}
