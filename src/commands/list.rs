//! List posts

use anyhow::Result;
use serde::Serialize;
use std::fmt::Write;

use crate::content::Post;
use crate::helpers::format_date;
use crate::Site;

/// One row of `list --json`
#[derive(Debug, Serialize)]
pub struct PostSummary<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub date: String,
    pub draft: bool,
    pub source: &'a str,
    pub permalink: String,
}

impl<'a> PostSummary<'a> {
    pub fn new(site: &Site, post: &'a Post) -> Self {
        Self {
            slug: post.slug(),
            title: post.title(),
            date: post.publish_date().format("%Y-%m-%d").to_string(),
            draft: post.is_draft(),
            source: post.source(),
            permalink: site.permalink(post),
        }
    }
}

/// Human-readable listing, newest first
pub fn format_listing(site: &Site, posts: &[&Post]) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "Posts ({}):", posts.len())?;
    for post in posts {
        writeln!(
            out,
            "  {} - {}{} [{}]",
            format_date(&post.publish_date(), &site.config.date_format),
            post.title(),
            if post.is_draft() { " (draft)" } else { "" },
            post.slug()
        )?;
    }
    Ok(out)
}

/// List posts, drafts included only when asked
pub fn run(site: &Site, include_drafts: bool, json: bool) -> Result<()> {
    let posts = site.load_posts()?;
    let listing = posts.list(include_drafts);

    if json {
        let rows: Vec<_> = listing.iter().map(|p| PostSummary::new(site, p)).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", format_listing(site, &listing)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostCollection;
    use std::fs;

    fn sample_site() -> (tempfile::TempDir, Site, PostCollection) {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("content/posts");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("ownership.md"),
            "---\ntitle: Ownership\ndate: 2024-05-21\n---\n",
        )
        .unwrap();
        fs::write(
            dir.join("traits.md"),
            "---\ntitle: Traits\ndate: 2024-07-15\ndraft: false\n---\n",
        )
        .unwrap();
        fs::write(
            dir.join("iterators.md"),
            "---\ntitle: Iterators\ndate: 2024-11-20\ndraft: true\n---\n",
        )
        .unwrap();
        let site = Site::new(tmp.path()).unwrap();
        let posts = site.load_posts().unwrap();
        (tmp, site, posts)
    }

    #[test]
    fn test_format_public_listing() {
        let (_tmp, site, posts) = sample_site();
        let text = format_listing(&site, &posts.list(false)).unwrap();
        assert_eq!(
            text,
            "Posts (2):\n  2024-07-15 - Traits [traits]\n  2024-05-21 - Ownership [ownership]\n"
        );
    }

    #[test]
    fn test_format_listing_marks_drafts() {
        let (_tmp, site, posts) = sample_site();
        let text = format_listing(&site, &posts.list(true)).unwrap();
        assert!(text.starts_with("Posts (3):\n  2024-11-20 - Iterators (draft) [iterators]\n"));
    }

    #[test]
    fn test_summary_json() {
        let (_tmp, site, posts) = sample_site();
        let post = posts.get("traits").unwrap();
        let value = serde_json::to_value(PostSummary::new(&site, post)).unwrap();
        assert_eq!(value["date"], "2024-07-15");
        assert_eq!(value["draft"], false);
        assert_eq!(value["permalink"], "/posts/traits/");
        assert_eq!(value["source"], "content/posts/traits.md");
    }
}
