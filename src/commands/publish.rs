//! Publish a draft

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Clear the draft flag of a post and rewrite its file. Returns the file path.
pub fn run(site: &Site, slug: &str) -> Result<PathBuf> {
    let mut posts = site.load_posts()?;
    let post = posts.publish(slug)?;

    let path = post.full_source().to_path_buf();
    let document = post.to_document()?;
    fs::write(&path, document).with_context(|| format!("Failed to write {:?}", path))?;

    tracing::info!("Published {} ({})", slug, post.source());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn site_with(file: &str, content: &str) -> (tempfile::TempDir, Site) {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("content/posts");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file), content).unwrap();
        let site = Site::new(tmp.path()).unwrap();
        (tmp, site)
    }

    #[test]
    fn test_publish_rewrites_file() {
        let (_tmp, site) = site_with(
            "iterators.md",
            "---\ntitle: Iterators\ndate: 2024-11-20 09:00:00\ndraft: true\ntags:\n- rust\n---\n\nLazy by default.\n",
        );

        let path = run(&site, "iterators").unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Lazy by default."));
        assert!(content.contains("2024-11-20 09:00:00"));

        let posts = site.load_posts().unwrap();
        let post = posts.get("iterators").unwrap();
        assert!(!post.is_draft());
        assert_eq!(post.body(), "Lazy by default.\n");
        assert_eq!(post.front_matter().extra["tags"], serde_json::json!(["rust"]));
        assert_eq!(posts.list(false).len(), 1);
    }

    #[test]
    fn test_publish_twice_fails() {
        let (_tmp, site) = site_with(
            "traits.md",
            "+++\ntitle = \"Traits\"\ndate = 2024-07-15\ndraft = true\n+++\nBody\n",
        );
        run(&site, "traits").unwrap();

        let err = run(&site, "traits").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::AlreadyPublished(_))
        ));
    }

    #[test]
    fn test_publish_keeps_toml_strings() {
        let (_tmp, site) = site_with(
            "release.md",
            "+++\ntitle = \"2024-01-01\"\ndate = 2024-01-01\ndraft = true\nversion = \"1979-05-27\"\n+++\nNotes.\n",
        );

        let path = run(&site, "release").unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let block = content
            .strip_prefix("+++\n")
            .and_then(|rest| rest.split("+++\n").next())
            .unwrap();
        let table: toml::Table = toml::from_str(block).unwrap();

        assert_eq!(table["title"], toml::Value::String("2024-01-01".into()));
        assert_eq!(table["version"], toml::Value::String("1979-05-27".into()));
        assert!(table["date"].is_datetime());
        assert_eq!(table["draft"], toml::Value::Boolean(false));
    }

    #[test]
    fn test_publish_unknown_slug() {
        let (_tmp, site) = site_with("a.md", "---\ntitle: A\ndate: 2024-01-01\n---\n");
        let err = run(&site, "b").unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::NotFound(_))));
    }
}
