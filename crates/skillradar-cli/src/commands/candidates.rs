//! The `skillradar candidates` and `skillradar remote-candidates` commands.

use anyhow::Result;
use comfy_table::{Cell, Table};

use skillradar_core::traits::RemoteDirectory;
use skillradar_core::{Candidate, Skill};

use super::Context;

pub fn execute(ctx: &Context, json: bool) -> Result<()> {
    let store = ctx.store()?;
    let candidates = store.candidates_or_empty();

    if json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
        return Ok(());
    }

    if candidates.is_empty() {
        println!("No candidates yet. Run `skillradar register` to add one.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Skills", "Scores", "Registered"]);
    for c in &candidates {
        table.add_row(vec![
            Cell::new(&c.id),
            Cell::new(&c.name),
            Cell::new(
                c.skills
                    .iter()
                    .map(Skill::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            Cell::new(score_summary(c)),
            Cell::new(c.created_at.format("%Y-%m-%d %H:%M")),
        ]);
    }
    println!("{table}");

    Ok(())
}

pub async fn remote(ctx: &Context) -> Result<()> {
    let client = ctx.config()?.api_client()?;
    let candidates = client.list_candidates().await?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name"]);
    for c in &candidates {
        table.add_row(vec![Cell::new(&c.id), Cell::new(&c.name)]);
    }
    println!("{table}");

    Ok(())
}

fn score_summary(candidate: &Candidate) -> String {
    match candidate.results() {
        None => "pending".to_string(),
        Some(r) => r
            .scores
            .iter()
            .map(|(skill, score)| format!("{skill} {score:.1}"))
            .collect::<Vec<_>>()
            .join(", "),
    }
}
