//! The remote candidate directory seam.
//!
//! The recruiter dashboard reads candidates from an external HTTP API.
//! `skillradar-api` implements [`RemoteDirectory`] over that API; tests use
//! an in-memory implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Trait for sources of remotely assessed candidates.
#[async_trait]
pub trait RemoteDirectory: Send + Sync {
    /// Human-readable source name (e.g. "http").
    fn name(&self) -> &str;

    /// All candidates known to the directory.
    async fn list_candidates(&self) -> anyhow::Result<Vec<CandidateSummary>>;

    /// Per-skill scores for one candidate.
    async fn candidate_skills(&self, candidate_id: &str) -> anyhow::Result<SkillSummary>;

    /// Evidence drill-down for one skill of one candidate.
    async fn skill_details(&self, candidate_id: &str, skill: &str) -> anyhow::Result<SkillDetail>;
}

/// Entry in the candidate list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub id: String,
    pub name: String,
}

/// Score of a single skill. Skill names are free text here: remote
/// candidates are assessed on skills outside the local bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillScore {
    pub skill: String,
    pub score: f64,
}

/// All skill scores for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSummary {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub scores: Vec<SkillScore>,
}

/// Drill-down record for one skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDetail {
    pub score: f64,
    #[serde(default)]
    pub evidence: String,
    #[serde(default)]
    pub trend: String,
}
