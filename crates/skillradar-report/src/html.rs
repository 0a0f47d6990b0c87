//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined, laid out for
//! printing (A4, no interactive elements).

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;

use skillradar_core::report::CandidateReport;

/// Number of skills shown in the highlights row.
const HIGHLIGHT_COUNT: usize = 3;
const MISSING: &str = "—";

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report, stamped with the current time.
pub fn generate_html(report: &CandidateReport) -> String {
    generate_html_at(report, Utc::now())
}

/// Generate an HTML report stamped with `generated_at`.
pub fn generate_html_at(report: &CandidateReport, generated_at: DateTime<Utc>) -> String {
    let mut html = String::new();
    let name = html_escape(&report.name);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>Candidate Report — {name}</title>\n"));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<p class=\"brand\">sensai</p>\n");
    html.push_str(&format!("<h1>Candidate Report — {name}</h1>\n"));
    let role = report
        .role
        .as_deref()
        .map(|r| format!("{} • ", html_escape(r)))
        .unwrap_or_default();
    html.push_str(&format!(
        "<p class=\"meta\">{}Generated: {}</p>\n",
        role,
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Highlights
    html.push_str("<section class=\"highlights\">\n");
    html.push_str("<h2>Highlights</h2>\n");
    let top = report.highlights(HIGHLIGHT_COUNT);
    if top.is_empty() {
        html.push_str("<p class=\"meta\">No completed assessments yet.</p>\n");
    } else {
        html.push_str("<div class=\"chips\">\n");
        for s in top {
            html.push_str(&format!(
                "<span class=\"chip\">{}: {:.1}/10</span>\n",
                html_escape(&s.skill),
                s.score
            ));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</section>\n");

    // Scores table
    html.push_str("<section class=\"scores\">\n");
    html.push_str("<h2>Skill Scores</h2>\n");
    html.push_str("<table>\n");
    html.push_str("<thead><tr><th>Skill</th><th>Score</th><th>Trend</th>");
    html.push_str("<th>Evidence (summary)</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for s in &report.scores {
        let detail = report.detail(&s.skill);
        let trend = detail
            .map(|d| d.trend.as_str())
            .filter(|t| !t.is_empty())
            .unwrap_or(MISSING);
        let evidence = detail
            .map(|d| d.evidence.as_str())
            .filter(|e| !e.is_empty())
            .unwrap_or(MISSING);
        html.push_str(&format!(
            "<tr><td>{}</td><td>{:.1}</td><td>{}</td><td>{}</td></tr>\n",
            html_escape(&s.skill),
            s.score,
            html_escape(trend),
            html_escape(evidence),
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str(
        "<footer>This document summarizes skill signals derived from SensAI assessments \
         and artifacts. For full evidence, use the web drill-downs.</footer>\n",
    );

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &CandidateReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

const CSS: &str = r#"
@page { size: A4; margin: 28px; }
body { font-family: Helvetica, Arial, sans-serif; font-size: 11pt; margin: 0; padding: 2rem; color: #0f0f0f; background: #fff; }
header { margin-bottom: 14px; padding-bottom: 10px; border-bottom: 1px solid #e5e7eb; }
.brand { font-size: 18pt; color: #7c3aed; margin: 0 0 2px; }
h1 { font-size: 16pt; margin: 4px 0; }
h2 { font-size: 13pt; margin: 16px 0 6px; }
.meta { font-size: 10pt; color: #6b7280; }
.chips { display: flex; flex-wrap: wrap; gap: 6px; }
.chip { border: 1px solid #e5e7eb; border-radius: 4px; padding: 4px 8px; }
table { border-collapse: collapse; width: 100%; border: 1px solid #e5e7eb; }
th, td { border: 1px solid #e5e7eb; padding: 8px; text-align: left; vertical-align: top; }
th { background: #f9fafb; }
pre { overflow-x: auto; padding: 1rem; background: #f9fafb; border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
footer { margin-top: 16px; font-size: 9pt; color: #6b7280; }
@media print { .raw-data { display: none; } body { padding: 0; } }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use skillradar_core::traits::{SkillDetail, SkillScore};
    use std::collections::BTreeMap;

    fn make_test_report() -> CandidateReport {
        let mut details_by_skill = BTreeMap::new();
        details_by_skill.insert(
            "SQL".to_string(),
            Some(SkillDetail {
                score: 7.8,
                evidence: "Added an index <fast>".into(),
                trend: "Improved".into(),
            }),
        );
        details_by_skill.insert("Debugging".to_string(), None);

        CandidateReport {
            id: "candidate_1".into(),
            name: "Alice & Co".into(),
            role: Some("Backend".into()),
            scores: vec![
                SkillScore {
                    skill: "Algorithms".into(),
                    score: 8.5,
                },
                SkillScore {
                    skill: "SQL".into(),
                    score: 7.8,
                },
                SkillScore {
                    skill: "Debugging".into(),
                    score: 9.2,
                },
                SkillScore {
                    skill: "System Design".into(),
                    score: 6.0,
                },
            ],
            details_by_skill,
        }
    }

    #[test]
    fn html_report_contains_required_elements() {
        let report = make_test_report();
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let html = generate_html_at(&report, at);

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Candidate Report — Alice &amp; Co"));
        assert!(html.contains("Backend • Generated: 2025-01-02 03:04:05 UTC"));
        assert!(html.contains("<td>System Design</td><td>6.0</td>"));
    }

    #[test]
    fn highlights_show_top_three() {
        let html = generate_html_at(&make_test_report(), Utc::now());
        assert!(html.contains("Debugging: 9.2/10"));
        assert!(html.contains("Algorithms: 8.5/10"));
        assert!(html.contains("SQL: 7.8/10"));
        assert!(!html.contains("System Design: 6.0/10"));
    }

    #[test]
    fn missing_details_render_placeholder() {
        let html = generate_html_at(&make_test_report(), Utc::now());
        assert!(html.contains("<td>Debugging</td><td>9.2</td><td>—</td><td>—</td>"));
        assert!(html.contains("<td>Improved</td><td>Added an index &lt;fast&gt;</td>"));
    }

    #[test]
    fn empty_report_has_placeholder_highlights() {
        let report = CandidateReport {
            id: "cand_1".into(),
            name: "Ada".into(),
            role: None,
            scores: vec![],
            details_by_skill: BTreeMap::new(),
        };
        let html = generate_html(&report);
        assert!(html.contains("No completed assessments yet."));
        assert!(html.contains("<p class=\"meta\">Generated: "));
    }

    #[test]
    fn html_report_write_to_file() {
        let report = make_test_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.html");

        write_html_report(&report, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
