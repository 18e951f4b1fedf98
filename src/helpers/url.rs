//! URL helper functions

use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/css/style.css") // -> "/blog/css/style.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/blog/hello/") // -> "https://balqaasem.xyz/blog/hello/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    format!("{}{}", config.origin(), url_for(config, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.url = "https://balqaasem.xyz".to_string();
        config.root = "/".to_string();
        config
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/css/style.css"), "/css/style.css");
        assert_eq!(url_for(&config, "blog/hello/"), "/blog/hello/");
        assert_eq!(url_for(&config, ""), "/");
    }

    #[test]
    fn test_url_for_with_root() {
        let mut config = test_config();
        config.root = "/folio/".to_string();
        assert_eq!(url_for(&config, "/css/style.css"), "/folio/css/style.css");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/blog/hello/"),
            "https://balqaasem.xyz/blog/hello/"
        );
    }
}
