//! The `skillradar report`, `remote-report` and `render` commands.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use skillradar_core::report::{build_remote_report, CandidateReport};
use skillradar_report::write_html_report;

use super::Context;

pub fn local(
    ctx: &Context,
    candidate_id: &str,
    output: Option<PathBuf>,
    format: &str,
) -> Result<()> {
    let store = ctx.store()?;
    let Some(candidate) = store.get_candidate(candidate_id)? else {
        bail!("candidate '{candidate_id}' not found");
    };
    let report = CandidateReport::from_candidate(&candidate);
    write(&report, output, format)
}

pub async fn remote(
    ctx: &Context,
    candidate_id: &str,
    output: Option<PathBuf>,
    format: &str,
) -> Result<()> {
    let client = ctx.config()?.api_client()?;
    let report = build_remote_report(&client, candidate_id).await?;
    write(&report, output, format)
}

/// Re-render a saved JSON report.
pub fn render(input: &Path, output: Option<PathBuf>, format: &str) -> Result<()> {
    let report = CandidateReport::load_json(input)?;
    write(&report, output, format)
}

fn write(report: &CandidateReport, output: Option<PathBuf>, format: &str) -> Result<()> {
    let ext = match format {
        "html" => "html",
        "json" => "json",
        other => bail!("unknown format '{other}' (expected html or json)"),
    };
    let path = output.unwrap_or_else(|| PathBuf::from(format!("{}.{ext}", report.id)));

    if ext == "html" {
        write_html_report(report, &path)?;
    } else {
        report.save_json(&path)?;
    }
    print_written(report, &path);
    Ok(())
}

fn print_written(report: &CandidateReport, path: &Path) {
    println!(
        "Report for {} ({} skills) written to {}",
        report.name,
        report.scores.len(),
        path.display()
    );
}
