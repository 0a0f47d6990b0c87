//! skillradar-core — Local skill tests, scoring, and candidate records.
//!
//! This crate defines the data model, the built-in question bank, the
//! local test store and the scoring engine that the rest of skillradar
//! builds on.

pub mod bank;
pub mod error;
pub mod ids;
pub mod model;
pub mod report;
pub mod scoring;
pub mod session;
pub mod store;
pub mod traits;

pub use error::{RegistrationError, SessionError, StoreError};
pub use model::{AnswerMap, Assessment, Candidate, Question, Skill, SkillScores, Test, Trend};
pub use scoring::{score_answers, ScoreResult};
pub use session::{register, Registration, TestSession};
pub use store::{FileBackend, LocalTestStore, MemoryBackend, StorageBackend};
