//! Candidate report payload with JSON persistence.
//!
//! A report is built either from a locally registered [`Candidate`] or
//! from a [`RemoteDirectory`]; renderers (see `skillradar-report`) only
//! ever see this shape.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::Candidate;
use crate::traits::{RemoteDirectory, SkillDetail, SkillScore};

/// Everything needed to render a printable candidate report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateReport {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub scores: Vec<SkillScore>,
    /// Detail per skill name; `None` when the detail could not be loaded.
    #[serde(default)]
    pub details_by_skill: BTreeMap<String, Option<SkillDetail>>,
}

impl CandidateReport {
    /// Build a report from a local candidate. Pending candidates produce a
    /// report with no scores.
    pub fn from_candidate(candidate: &Candidate) -> Self {
        let mut scores = Vec::new();
        let mut details_by_skill = BTreeMap::new();

        if let Some(results) = candidate.results() {
            for (skill, &score) in &results.scores {
                scores.push(SkillScore {
                    skill: skill.to_string(),
                    score,
                });
                details_by_skill.insert(
                    skill.to_string(),
                    Some(SkillDetail {
                        score,
                        evidence: results.evidence.get(skill).cloned().unwrap_or_default(),
                        trend: results
                            .trend
                            .get(skill)
                            .map(|t| t.to_string())
                            .unwrap_or_default(),
                    }),
                );
            }
        }

        Self {
            id: candidate.id.clone(),
            name: candidate.name.clone(),
            role: None,
            scores,
            details_by_skill,
        }
    }

    /// The `n` highest scores, best first. Ties keep their input order.
    pub fn highlights(&self, n: usize) -> Vec<&SkillScore> {
        let mut sorted: Vec<&SkillScore> = self.scores.iter().collect();
        sorted.sort_by(|a, b| b.score.total_cmp(&a.score));
        sorted.truncate(n);
        sorted
    }

    /// Detail for `skill`, if one was loaded.
    pub fn detail(&self, skill: &str) -> Option<&SkillDetail> {
        self.details_by_skill.get(skill).and_then(|d| d.as_ref())
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: CandidateReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

/// Build a report for a remotely assessed candidate.
///
/// Skill scores are required; the per-skill details are fetched
/// concurrently and any that fail are recorded as missing.
pub async fn build_remote_report(
    directory: &dyn RemoteDirectory,
    candidate_id: &str,
) -> Result<CandidateReport> {
    let summary = directory
        .candidate_skills(candidate_id)
        .await
        .with_context(|| format!("failed to load skills for candidate '{candidate_id}'"))?;

    let fetches = summary.scores.iter().map(|s| async move {
        match directory.skill_details(candidate_id, &s.skill).await {
            Ok(detail) => (s.skill.clone(), Some(detail)),
            Err(e) => {
                tracing::warn!(
                    candidate = candidate_id,
                    skill = %s.skill,
                    "skill details unavailable: {e:#}"
                );
                (s.skill.clone(), None)
            }
        }
    });
    let details_by_skill = futures::future::join_all(fetches)
        .await
        .into_iter()
        .collect();

    let name = if summary.name.trim().is_empty() {
        "Candidate".to_string()
    } else {
        summary.name
    };

    Ok(CandidateReport {
        id: candidate_id.to_string(),
        name,
        role: None,
        scores: summary.scores,
        details_by_skill,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Skill;
    use crate::scoring::ScoreResult;
    use crate::traits::{CandidateSummary, SkillSummary};
    use async_trait::async_trait;

    fn score(skill: &str, score: f64) -> SkillScore {
        SkillScore {
            skill: skill.into(),
            score,
        }
    }

    fn report(scores: Vec<SkillScore>) -> CandidateReport {
        CandidateReport {
            id: "c".into(),
            name: "n".into(),
            role: None,
            scores,
            details_by_skill: BTreeMap::new(),
        }
    }

    #[test]
    fn highlights_top_three_stable() {
        let r = report(vec![
            score("A", 5.0),
            score("B", 9.0),
            score("C", 7.0),
            score("D", 9.0),
        ]);
        let top = r.highlights(3);
        let names: Vec<&str> = top.iter().map(|s| s.skill.as_str()).collect();
        assert_eq!(names, ["B", "D", "C"]);
        assert!(report(vec![]).highlights(3).is_empty());
    }

    #[test]
    fn from_pending_candidate() {
        let c = Candidate::pending("cand_1".into(), "Ada".into(), None, vec![Skill::Sql]);
        let r = CandidateReport::from_candidate(&c);
        assert_eq!(r.name, "Ada");
        assert!(r.scores.is_empty());
        assert!(r.details_by_skill.is_empty());
    }

    #[test]
    fn from_scored_candidate() {
        let mut c = Candidate::pending(
            "cand_1".into(),
            "Ada".into(),
            None,
            vec![Skill::Sql, Skill::Java],
        );
        let questions = crate::bank::draw_questions(&[Skill::Sql, Skill::Java]);
        let result = ScoreResult {
            per_skill: [(Skill::Java, 10.0), (Skill::Sql, 5.0)].into_iter().collect(),
            overall: 7.5,
        };
        c.record_result(&result, &questions);

        let r = CandidateReport::from_candidate(&c);
        let skills: Vec<&str> = r.scores.iter().map(|s| s.skill.as_str()).collect();
        assert_eq!(skills, ["Java", "SQL"]);
        let sql = r.detail("SQL").unwrap();
        assert_eq!(sql.evidence, "Auto-scored 2 MCQs.");
        assert_eq!(sql.trend, "First attempt.");
    }

    #[test]
    fn json_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");
        let mut r = report(vec![score("SQL", 7.8)]);
        r.details_by_skill.insert("SQL".into(), None);

        r.save_json(&path).unwrap();
        assert_eq!(CandidateReport::load_json(&path).unwrap(), r);
        assert!(CandidateReport::load_json(&dir.path().join("missing.json")).is_err());
    }

    struct FlakyDirectory;

    #[async_trait]
    impl RemoteDirectory for FlakyDirectory {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn list_candidates(&self) -> anyhow::Result<Vec<CandidateSummary>> {
            Ok(vec![])
        }

        async fn candidate_skills(&self, candidate_id: &str) -> anyhow::Result<SkillSummary> {
            anyhow::ensure!(candidate_id == "candidate_1", "candidate not found");
            Ok(SkillSummary {
                name: String::new(),
                scores: vec![score("SQL", 7.8), score("Debugging", 9.2)],
            })
        }

        async fn skill_details(&self, _: &str, skill: &str) -> anyhow::Result<SkillDetail> {
            anyhow::ensure!(skill == "SQL", "skill details not found");
            Ok(SkillDetail {
                score: 7.8,
                evidence: "Optimized a join".into(),
                trend: "Consistent".into(),
            })
        }
    }

    #[tokio::test]
    async fn remote_report_tolerates_missing_details() {
        let r = build_remote_report(&FlakyDirectory, "candidate_1").await.unwrap();
        assert_eq!(r.name, "Candidate");
        assert_eq!(r.scores.len(), 2);
        assert_eq!(r.detail("SQL").unwrap().evidence, "Optimized a join");
        assert_eq!(r.details_by_skill.get("Debugging"), Some(&None));
    }

    #[tokio::test]
    async fn remote_report_requires_scores() {
        let err = build_remote_report(&FlakyDirectory, "nobody").await.unwrap_err();
        assert!(format!("{err:#}").contains("candidate not found"));
    }
}
