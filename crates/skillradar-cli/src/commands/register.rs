//! The `skillradar register` command.

use anyhow::{anyhow, Result};

use skillradar_core::{register, Skill};

use super::Context;

pub fn execute(ctx: &Context, name: &str, email: Option<&str>, skills: &str) -> Result<()> {
    let skills = parse_skills(skills)?;
    let store = ctx.store()?;

    let reg = register(&store, name, email, &skills)?;

    println!("Candidate: {}", reg.candidate.id);
    println!("Test: {}", reg.test.id);
    println!(
        "{} questions across {}",
        reg.test.questions.len(),
        reg.candidate
            .skills
            .iter()
            .map(Skill::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "\nNext: skillradar take --test-id {} --candidate-id {} --answer <question>=<option> ...",
        reg.test.id, reg.candidate.id
    );

    Ok(())
}

/// Parse a comma-separated skill list. Blank entries are skipped.
fn parse_skills(list: &str) -> Result<Vec<Skill>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Skill>().map_err(|e| anyhow!(e)))
        .collect()
}
