//! The `skillradar show-test` and `skillradar take` commands.

use anyhow::{anyhow, bail, Context as _, Result};
use comfy_table::{Cell, Table};

use skillradar_core::{SessionError, TestSession};

use super::Context;

pub fn show(ctx: &Context, test_id: &str) -> Result<()> {
    let store = ctx.store()?;
    let test = store
        .get_local_test(test_id)?
        .ok_or(SessionError::InvalidOrMissingTest)?;

    println!("Test {} for candidate {}", test.id, test.candidate_id);
    for q in &test.questions {
        println!("\n[{}] {}", q.id, q.skill);
        println!("  {}", q.text);
        for (i, option) in q.options.iter().enumerate() {
            println!("    {i}) {option}");
        }
    }

    Ok(())
}

pub fn execute(
    ctx: &Context,
    test_id: &str,
    candidate_id: &str,
    answers: &[String],
) -> Result<()> {
    let store = ctx.store()?;
    let mut session = TestSession::open(&store, test_id, candidate_id)?;

    for raw in answers {
        let (question_id, option) = parse_answer(raw)?;
        session.select(question_id, option)?;
    }

    if !session.can_submit() {
        bail!(
            "answer every question before submitting (unanswered: {})",
            session.unanswered().join(", ")
        );
    }

    let result = session.submit(&store)?;

    let mut table = Table::new();
    table.set_header(vec!["Skill", "Score"]);
    for (skill, score) in &result.per_skill {
        table.add_row(vec![Cell::new(skill), Cell::new(format!("{score:.1}/10"))]);
    }
    println!("{table}");
    println!("Overall: {:.1}/10", result.overall);

    Ok(())
}

/// Parse `QUESTION=OPTION`.
fn parse_answer(raw: &str) -> Result<(&str, usize)> {
    let (question_id, option) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("invalid answer '{raw}', expected QUESTION=OPTION"))?;
    let option = option
        .trim()
        .parse::<usize>()
        .with_context(|| format!("invalid option in answer '{raw}'"))?;
    Ok((question_id.trim(), option))
}
