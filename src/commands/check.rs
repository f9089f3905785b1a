//! Validate every post in the content directory

use anyhow::Result;
use std::fmt::Write;

use crate::content::LoadReport;
use crate::Site;

/// Summary of a scan, one line per problem
pub fn format_report(site: &Site, report: &LoadReport) -> Result<String> {
    let mut out = String::new();
    for failure in &report.failures {
        let path = failure
            .path
            .strip_prefix(&site.base_dir)
            .unwrap_or(failure.path.as_path());
        writeln!(out, "  {}: {}", path.display(), failure.error)?;
    }

    let drafts = report.collection.iter().filter(|p| p.is_draft()).count();
    writeln!(
        out,
        "{} posts ok ({} drafts), {} with problems",
        report.collection.len(),
        drafts,
        report.failures.len()
    )?;
    Ok(out)
}

/// Check every post. Fails if any file could not be loaded.
pub fn run(site: &Site) -> Result<()> {
    let report = site.scan_posts()?;
    print!("{}", format_report(site, &report)?);

    if !report.is_clean() {
        anyhow::bail!("{} post(s) could not be loaded", report.failures.len());
    }
    Ok(())
}
