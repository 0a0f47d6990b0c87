//! Candidate self-registration and test taking.
//!
//! Registration creates a pending candidate plus a generated test. A
//! [`TestSession`] collects answers for that test, scores them, and writes
//! the result back into the candidate record.

use crate::error::{RegistrationError, SessionError};
use crate::ids::generate_id;
use crate::model::{AnswerMap, Candidate, Question, Skill, Test};
use crate::scoring::{score_answers, ScoreResult};
use crate::store::LocalTestStore;

/// Output of [`register`].
#[derive(Debug, Clone)]
pub struct Registration {
    pub candidate: Candidate,
    pub test: Test,
}

/// Register a candidate and generate their test.
///
/// The name must be non-blank and at least one skill selected. Repeated
/// skills are collapsed to their first occurrence.
pub fn register(
    store: &LocalTestStore,
    name: &str,
    email: Option<&str>,
    skills: &[Skill],
) -> Result<Registration, RegistrationError> {
    let name = name.trim();
    if name.is_empty() || skills.is_empty() {
        return Err(RegistrationError::MissingFields);
    }

    let mut selected: Vec<Skill> = Vec::with_capacity(skills.len());
    for &skill in skills {
        if !selected.contains(&skill) {
            selected.push(skill);
        }
    }

    let email = email.map(str::trim).filter(|e| !e.is_empty()).map(String::from);
    let candidate = Candidate::pending(generate_id("cand"), name.to_string(), email, selected);
    store.upsert_candidate(&candidate)?;
    let test = store.create_local_test(&candidate.id, &candidate.skills)?;

    tracing::info!(candidate = %candidate.id, test = %test.id, "candidate registered");
    Ok(Registration { candidate, test })
}

/// One in-progress attempt at a test.
///
/// Answers live only in this value and are discarded with it.
#[derive(Debug, Clone)]
pub struct TestSession {
    test: Test,
    answers: AnswerMap,
}

impl TestSession {
    /// Load `test_id` for `candidate_id`.
    ///
    /// A missing test, or one generated for a different candidate, is
    /// [`SessionError::InvalidOrMissingTest`].
    pub fn open(
        store: &LocalTestStore,
        test_id: &str,
        candidate_id: &str,
    ) -> Result<Self, SessionError> {
        match store.get_local_test(test_id)? {
            Some(test) if test.candidate_id == candidate_id => Ok(Self::new(test)),
            _ => Err(SessionError::InvalidOrMissingTest),
        }
    }

    pub fn new(test: Test) -> Self {
        Self {
            test,
            answers: AnswerMap::new(),
        }
    }

    pub fn test(&self) -> &Test {
        &self.test
    }

    pub fn questions(&self) -> &[Question] {
        &self.test.questions
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    /// Record (or change) the selected option for a question.
    pub fn select(&mut self, question_id: &str, option: usize) -> Result<(), SessionError> {
        let question = self
            .test
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .ok_or_else(|| SessionError::UnknownQuestion(question_id.to_string()))?;
        if option >= question.options.len() {
            return Err(SessionError::OptionOutOfRange {
                question_id: question_id.to_string(),
                option,
                options: question.options.len(),
            });
        }
        self.answers.insert(question_id.to_string(), option);
        Ok(())
    }

    /// Ids of questions with no selected option, in test order.
    pub fn unanswered(&self) -> Vec<&str> {
        self.test
            .questions
            .iter()
            .filter(|q| !self.answers.contains_key(&q.id))
            .map(|q| q.id.as_str())
            .collect()
    }

    /// A test can be submitted once it has questions and all are answered.
    pub fn can_submit(&self) -> bool {
        !self.test.questions.is_empty() && self.unanswered().is_empty()
    }

    /// Score the answers and record the result on the candidate.
    ///
    /// If the candidate record no longer exists the result is still
    /// returned, but nothing is written.
    pub fn submit(&self, store: &LocalTestStore) -> Result<ScoreResult, SessionError> {
        if !self.can_submit() {
            return Err(SessionError::Incomplete {
                unanswered: self.unanswered().len(),
            });
        }

        let result = score_answers(&self.test.questions, &self.answers);

        match store.get_candidate(&self.test.candidate_id)? {
            Some(mut candidate) => {
                let updated = candidate.record_result(&result, &self.test.questions);
                store.upsert_candidate(&candidate)?;
                tracing::info!(
                    candidate = %candidate.id,
                    test = %self.test.id,
                    skills = updated.len(),
                    overall = result.overall,
                    "test submitted"
                );
            }
            None => {
                tracing::warn!(
                    candidate = %self.test.candidate_id,
                    test = %self.test.id,
                    "candidate not found, result not recorded"
                );
            }
        }

        Ok(result)
    }
}
