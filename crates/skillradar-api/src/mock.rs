//! In-memory candidate directory for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use skillradar_core::traits::{
    CandidateSummary, RemoteDirectory, SkillDetail, SkillScore, SkillSummary,
};

use crate::error::ApiError;

#[derive(Debug, Clone)]
struct MockCandidate {
    name: String,
    skills: Vec<(SkillScore, Option<SkillDetail>)>,
}

/// A mock directory for exercising report building without a server.
///
/// Candidates are returned in insertion order. Skills added without a
/// detail answer `skill_details` with [`ApiError::NotFound`].
#[derive(Debug, Default)]
pub struct MockDirectory {
    order: Vec<String>,
    candidates: HashMap<String, MockCandidate>,
    detail_calls: AtomicU32,
}

impl MockDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a candidate with no skills.
    pub fn with_candidate(mut self, id: &str, name: &str) -> Self {
        if !self.candidates.contains_key(id) {
            self.order.push(id.to_string());
        }
        self.candidates.insert(
            id.to_string(),
            MockCandidate {
                name: name.to_string(),
                skills: Vec::new(),
            },
        );
        self
    }

    /// Add a skill to an existing candidate. Unknown candidate ids are ignored.
    pub fn with_skill(
        mut self,
        candidate_id: &str,
        skill: &str,
        score: f64,
        detail: Option<(&str, &str)>,
    ) -> Self {
        if let Some(c) = self.candidates.get_mut(candidate_id) {
            c.skills.push((
                SkillScore {
                    skill: skill.to_string(),
                    score,
                },
                detail.map(|(evidence, trend)| SkillDetail {
                    score,
                    evidence: evidence.to_string(),
                    trend: trend.to_string(),
                }),
            ));
        }
        self
    }

    /// Two sample candidates mirroring the demo API data.
    pub fn sample() -> Self {
        Self::new()
            .with_candidate("candidate_1", "Alice Johnson")
            .with_skill(
                "candidate_1",
                "Algorithms",
                8.5,
                Some((
                    "Solved the 'Knapsack Problem' with a dynamic programming approach.",
                    "Improved from score 6.0 in first attempt.",
                )),
            )
            .with_skill(
                "candidate_1",
                "SQL",
                7.8,
                Some((
                    "Optimized a N-1 JOIN query by adding an index.",
                    "Score has been consistent across two attempts.",
                )),
            )
            .with_skill(
                "candidate_1",
                "System Design",
                6.5,
                Some((
                    "Provided a scalable architecture for a video streaming service.",
                    "N/A - Only one attempt.",
                )),
            )
            .with_skill(
                "candidate_1",
                "Debugging",
                9.2,
                Some((
                    "Fixed a deadlock issue in a multithreaded application in under 5 minutes.",
                    "Perfect score on both attempts.",
                )),
            )
            .with_candidate("candidate_2", "Bob Williams")
            .with_skill("candidate_2", "Algorithms", 7.1, None)
            .with_skill("candidate_2", "SQL", 9.1, None)
            .with_skill("candidate_2", "System Design", 8.0, None)
            .with_skill("candidate_2", "Debugging", 7.5, None)
    }

    /// Number of `skill_details` calls made so far.
    pub fn detail_calls(&self) -> u32 {
        self.detail_calls.load(Ordering::Relaxed)
    }

    fn candidate(&self, id: &str) -> Result<&MockCandidate, ApiError> {
        self.candidates
            .get(id)
            .ok_or_else(|| ApiError::NotFound(format!("candidate '{id}'")))
    }
}

#[async_trait]
impl RemoteDirectory for MockDirectory {
    fn name(&self) -> &str {
        "mock"
    }

    async fn list_candidates(&self) -> anyhow::Result<Vec<CandidateSummary>> {
        Ok(self
            .order
            .iter()
            .filter_map(|id| {
                self.candidates.get(id).map(|c| CandidateSummary {
                    id: id.clone(),
                    name: c.name.clone(),
                })
            })
            .collect())
    }

    async fn candidate_skills(&self, candidate_id: &str) -> anyhow::Result<SkillSummary> {
        let c = self.candidate(candidate_id)?;
        Ok(SkillSummary {
            name: c.name.clone(),
            scores: c.skills.iter().map(|(s, _)| s.clone()).collect(),
        })
    }

    async fn skill_details(&self, candidate_id: &str, skill: &str) -> anyhow::Result<SkillDetail> {
        self.detail_calls.fetch_add(1, Ordering::Relaxed);
        let c = self.candidate(candidate_id)?;
        c.skills
            .iter()
            .find(|(s, _)| s.skill == skill)
            .and_then(|(_, d)| d.clone())
            .ok_or_else(|| ApiError::NotFound(format!("skill '{skill}'")).into())
    }
}
