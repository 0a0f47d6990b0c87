//! Core data model types for skillradar.
//!
//! These are the records the local test store persists: candidates, the
//! questions they are asked, and the tests that group those questions.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::ScoreResult;

/// The closed set of skills a candidate can be assessed on.
///
/// Declaration order is the canonical order used whenever skills are
/// iterated (scoring output, reports).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Skill {
    #[serde(rename = "C/C++")]
    Cpp,
    Java,
    Python,
    #[serde(rename = "SQL")]
    Sql,
}

impl Skill {
    /// Every skill, in canonical order.
    pub const ALL: [Skill; 4] = [Skill::Cpp, Skill::Java, Skill::Python, Skill::Sql];

    /// Display label, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Skill::Cpp => "C/C++",
            Skill::Java => "Java",
            Skill::Python => "Python",
            Skill::Sql => "SQL",
        }
    }

    /// Position of this skill in [`Skill::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Skill::Cpp => 0,
            Skill::Java => 1,
            Skill::Python => 2,
            Skill::Sql => 3,
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Skill {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "c/c++" | "c++" | "cpp" | "c" => Ok(Skill::Cpp),
            "java" => Ok(Skill::Java),
            "python" | "py" => Ok(Skill::Python),
            "sql" => Ok(Skill::Sql),
            other => Err(format!("unknown skill: {other}")),
        }
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier (e.g. "s1").
    pub id: String,
    /// The skill this question tests.
    pub skill: Skill,
    /// Question text.
    #[serde(rename = "q")]
    pub text: String,
    /// Answer options, in display order.
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub answer: usize,
}

/// A generated test: the questions assigned to one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Test {
    #[serde(rename = "test_id")]
    pub id: String,
    pub candidate_id: String,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
}

/// Selected option index per question id, for one test-taking session.
pub type AnswerMap = HashMap<String, usize>;

/// How a skill score moved relative to the previous attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    #[serde(rename = "First attempt.")]
    FirstAttempt,
    Improved,
    Dropped,
    Stable,
}

impl Trend {
    /// Classify a new score against the previous one, if any.
    pub fn between(previous: Option<f64>, current: f64) -> Self {
        match previous {
            None => Trend::FirstAttempt,
            Some(prev) if current > prev => Trend::Improved,
            Some(prev) if current < prev => Trend::Dropped,
            Some(_) => Trend::Stable,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Trend::FirstAttempt => "First attempt.",
            Trend::Improved => "Improved",
            Trend::Dropped => "Dropped",
            Trend::Stable => "Stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-skill results recorded on a candidate after a completed test.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillScores {
    /// Score out of 10, one decimal place.
    #[serde(default)]
    pub scores: BTreeMap<Skill, f64>,
    /// Short summary of what the score is based on.
    #[serde(default)]
    pub evidence: BTreeMap<Skill, String>,
    #[serde(default)]
    pub trend: BTreeMap<Skill, Trend>,
}

/// Whether a candidate has completed a test yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Assessment {
    /// Registered, no completed test.
    #[default]
    Pending,
    /// At least one test has been scored.
    Scored(SkillScores),
}

/// A locally registered candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredCandidate")]
pub struct Candidate {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Selected skills, in selection order.
    pub skills: Vec<Skill>,
    pub assessment: Assessment,
    pub created_at: DateTime<Utc>,
}

/// Candidate as found on disk. Older records carry `scores`, `evidence`
/// and `trend` at the top level instead of an `assessment`.
#[derive(Deserialize)]
struct StoredCandidate {
    id: String,
    name: String,
    #[serde(default)]
    email: Option<String>,
    skills: Vec<Skill>,
    #[serde(default)]
    assessment: Option<Assessment>,
    #[serde(default)]
    scores: BTreeMap<Skill, f64>,
    #[serde(default)]
    evidence: BTreeMap<Skill, String>,
    #[serde(default)]
    trend: BTreeMap<Skill, Trend>,
    created_at: DateTime<Utc>,
}

impl From<StoredCandidate> for Candidate {
    fn from(raw: StoredCandidate) -> Self {
        let assessment = match raw.assessment {
            Some(assessment) => assessment,
            None if raw.scores.is_empty() => Assessment::Pending,
            None => Assessment::Scored(SkillScores {
                scores: raw.scores,
                evidence: raw.evidence,
                trend: raw.trend,
            }),
        };
        Self {
            id: raw.id,
            name: raw.name,
            email: raw.email.filter(|e| !e.is_empty()),
            skills: raw.skills,
            assessment,
            created_at: raw.created_at,
        }
    }
}

impl Candidate {
    /// Create a candidate that has not taken a test yet.
    pub fn pending(id: String, name: String, email: Option<String>, skills: Vec<Skill>) -> Self {
        Self {
            id,
            name,
            email,
            skills,
            assessment: Assessment::Pending,
            created_at: Utc::now(),
        }
    }

    /// Recorded results, or `None` while the candidate is pending.
    pub fn results(&self) -> Option<&SkillScores> {
        match &self.assessment {
            Assessment::Pending => None,
            Assessment::Scored(scores) => Some(scores),
        }
    }

    pub fn score(&self, skill: Skill) -> Option<f64> {
        self.results().and_then(|r| r.scores.get(&skill).copied())
    }

    /// Overwrite per-skill score, evidence and trend from a scored test.
    ///
    /// Only skills in the candidate's skill set are recorded. Returns the
    /// skills that were updated.
    pub fn record_result(&mut self, result: &ScoreResult, questions: &[Question]) -> Vec<Skill> {
        let mut updated = Vec::new();
        let mut recorded = match std::mem::take(&mut self.assessment) {
            Assessment::Pending => SkillScores::default(),
            Assessment::Scored(scores) => scores,
        };

        for (&skill, &score) in &result.per_skill {
            if !self.skills.contains(&skill) {
                tracing::warn!(
                    candidate = %self.id,
                    %skill,
                    "ignoring score for a skill the candidate did not select"
                );
                continue;
            }
            let asked = questions.iter().filter(|q| q.skill == skill).count();
            let previous = recorded.scores.insert(skill, score);
            recorded
                .evidence
                .insert(skill, format!("Auto-scored {asked} MCQs."));
            recorded.trend.insert(skill, Trend::between(previous, score));
            updated.push(skill);
        }

        self.assessment = if recorded.scores.is_empty() {
            Assessment::Pending
        } else {
            Assessment::Scored(recorded)
        };
        updated
    }
}
