//! Home page - profile image, animated headline, bio, call-to-action links

use crate::config::SiteConfig;
use crate::helpers::{html_escape, url_for};

/// Render the home page body
pub fn render(config: &SiteConfig) -> String {
    let home = &config.home;

    let contact = if home.contact_email.is_empty() {
        String::new()
    } else {
        format!(
            r#"<a class="cta-contact" href="mailto:{email}">Contact</a>"#,
            email = home.contact_email
        )
    };

    format!(
        r#"<div class="hero">
<div class="hero-image">
<img src="{profile}" alt="{author}">
</div>
<div class="hero-text">
<h1 class="animated-text">{headline}</h1>
<p class="bio">{bio}</p>
<div class="cta-row">
<a class="cta-resume" href="{resume}" target="_blank" download>Resume</a>
{contact}
</div>
</div>
</div>
"#,
        profile = url_for(config, &home.profile_image),
        author = html_escape(&config.author),
        headline = html_escape(&home.headline),
        bio = html_escape(&home.bio),
        resume = url_for(config, &home.resume),
        contact = contact,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_renders_headline_and_ctas() {
        let mut config = SiteConfig::default();
        config.home.headline = "Build Things".to_string();
        config.home.contact_email = "me@example.com".to_string();
        let html = render(&config);
        assert!(html.contains("Build Things"));
        assert!(html.contains(r#"class="animated-text""#));
        assert!(html.contains("mailto:me@example.com"));
        assert!(html.contains("Resume"));
    }

    #[test]
    fn test_home_without_contact_email() {
        let config = SiteConfig::default();
        let html = render(&config);
        assert!(!html.contains("mailto:"));
    }
}
