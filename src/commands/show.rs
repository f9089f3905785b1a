//! Show a single post

use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::fmt::Write;

use crate::content::PostCollection;
use crate::helpers::{format_date, relative_date};
use crate::Site;

/// Length of the summary line
const SUMMARY_CHARS: usize = 160;

/// Describe one post: metadata, location, neighbours and summary
pub fn describe(
    site: &Site,
    posts: &PostCollection,
    slug: &str,
    today: NaiveDate,
) -> Result<String> {
    let post = posts.get(slug)?;
    let (newer, older) = posts.neighbors(slug)?;
    let date = post.publish_date();

    let mut out = String::new();
    writeln!(out, "{}", post.title())?;
    writeln!(out, "  slug:      {}", post.slug())?;
    writeln!(
        out,
        "  date:      {} ({})",
        format_date(&date, &site.config.date_format),
        relative_date(&date, &today)
    )?;
    writeln!(out, "  status:    {}", if post.is_draft() { "draft" } else { "published" })?;
    writeln!(out, "  source:    {}", post.source())?;
    writeln!(out, "  permalink: {}", site.full_permalink(post))?;
    writeln!(
        out,
        "  length:    {} words, {} min read",
        post.word_count(),
        post.reading_minutes(site.config.words_per_minute)
    )?;
    for (key, value) in &post.front_matter().extra {
        writeln!(out, "  {}: {}", key, value)?;
    }
    if let Some(newer) = newer {
        writeln!(out, "  newer:     {}", newer.slug())?;
    }
    if let Some(older) = older {
        writeln!(out, "  older:     {}", older.slug())?;
    }

    let summary = post.summary(SUMMARY_CHARS);
    if !summary.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", summary)?;
    }

    Ok(out)
}

/// Print one post
pub fn run(site: &Site, slug: &str) -> Result<()> {
    let posts = site.load_posts()?;
    let today = Local::now().date_naive();
    print!("{}", describe(site, &posts, slug, today)?);
    Ok(())
}
