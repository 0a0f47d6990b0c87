//! Multiple-choice scoring.
//!
//! Converts a question list plus the selected answers into a 0–10 score
//! per skill and an overall score. Pure and infallible: missing or stale
//! answers count as wrong.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{AnswerMap, Question, Skill};

/// Output of [`score_answers`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Score out of 10 for every skill that had at least one question.
    pub per_skill: BTreeMap<Skill, f64>,
    /// Mean of `per_skill`, or 0 when it is empty.
    pub overall: f64,
}

/// Round half-up to one decimal place.
///
/// Scores are never negative, so `f64::round` (half away from zero) is
/// half-up here.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Score `answers` against `questions`.
///
/// Each skill's score is rounded on its own, then the overall mean is
/// rounded again. Answers for questions not in `questions` are ignored.
pub fn score_answers(questions: &[Question], answers: &AnswerMap) -> ScoreResult {
    let mut totals = [0u32; Skill::ALL.len()];
    let mut correct = [0u32; Skill::ALL.len()];

    for q in questions {
        let slot = q.skill.index();
        totals[slot] += 1;
        if answers.get(&q.id) == Some(&q.answer) {
            correct[slot] += 1;
        }
    }

    let per_skill: BTreeMap<Skill, f64> = Skill::ALL
        .iter()
        .filter(|s| totals[s.index()] > 0)
        .map(|&s| {
            let ratio = correct[s.index()] as f64 / totals[s.index()] as f64;
            (s, round1(ratio * 10.0))
        })
        .collect();

    let overall = if per_skill.is_empty() {
        0.0
    } else {
        round1(per_skill.values().sum::<f64>() / per_skill.len() as f64)
    };

    ScoreResult { per_skill, overall }
}
