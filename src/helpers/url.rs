//! URL helper functions

use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/posts/ownership/") // -> "/blog/posts/ownership/"
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

/// Expand the configured permalink pattern for a post, relative to the root
pub fn permalink(config: &SiteConfig, slug: &str, date: &NaiveDate) -> String {
    let slug = utf8_percent_encode(slug, SEGMENT).to_string();

    let path = config
        .permalink
        .replace(":year", &date.format("%Y").to_string())
        .replace(":i_month", &date.format("%-m").to_string())
        .replace(":i_day", &date.format("%-d").to_string())
        .replace(":month", &date.format("%m").to_string())
        .replace(":day", &date.format("%d").to_string())
        .replace(":slug", &slug)
        .replace(":title", &slug);

    url_for(config, &path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.url = "https://example.com".to_string();
        config.root = "/blog/".to_string();
        config
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/posts/a/"), "/blog/posts/a/");
        assert_eq!(url_for(&config, ""), "/blog/");
    }

    #[test]
    fn test_permalink_placeholders() {
        let mut config = test_config();
        config.permalink = ":year/:i_month/:day/:slug/".to_string();
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(
            permalink(&config, "ownership", &date),
            "/blog/2024/5/01/ownership/"
        );
    }

    #[test]
    fn test_permalink_encodes_slug() {
        let config = test_config();
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(
            permalink(&config, "what is rust?", &date),
            "/blog/posts/what%20is%20rust%3F/"
        );
    }
}
