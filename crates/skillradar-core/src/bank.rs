//! The built-in question bank: two multiple-choice questions per skill.

use crate::model::{Question, Skill};

/// A question as stored in the static bank.
#[derive(Debug, Clone, Copy)]
pub struct BankQuestion {
    pub id: &'static str,
    pub skill: Skill,
    pub text: &'static str,
    pub options: &'static [&'static str],
    pub answer: usize,
}

impl BankQuestion {
    pub fn to_question(&self) -> Question {
        Question {
            id: self.id.to_string(),
            skill: self.skill,
            text: self.text.to_string(),
            options: self.options.iter().map(|o| o.to_string()).collect(),
            answer: self.answer,
        }
    }
}

/// Questions drawn per skill when generating a test.
pub const QUESTIONS_PER_SKILL: usize = 2;

pub const QUESTION_BANK: &[BankQuestion] = &[
    BankQuestion {
        id: "c1",
        skill: Skill::Cpp,
        text: "Time complexity of binary search?",
        options: &["O(n)", "O(log n)", "O(n log n)", "O(1)"],
        answer: 1,
    },
    BankQuestion {
        id: "c2",
        skill: Skill::Cpp,
        text: "Keyword that allocates memory in C++?",
        options: &["malloc", "calloc", "new", "alloc"],
        answer: 2,
    },
    BankQuestion {
        id: "j1",
        skill: Skill::Java,
        text: "Which collection is ordered & allows duplicates?",
        options: &["Set", "Map", "List", "Queue"],
        answer: 2,
    },
    BankQuestion {
        id: "j2",
        skill: Skill::Java,
        text: "JVM stands for?",
        options: &[
            "Java Virtual Machine",
            "Java Verified Module",
            "Joint VM",
            "JIT VM",
        ],
        answer: 0,
    },
    BankQuestion {
        id: "p1",
        skill: Skill::Python,
        text: "List comprehension returns a…",
        options: &["dict", "set", "list", "tuple"],
        answer: 2,
    },
    BankQuestion {
        id: "p2",
        skill: Skill::Python,
        text: "Which is NOT a Python type?",
        options: &["int", "char", "list", "dict"],
        answer: 1,
    },
    BankQuestion {
        id: "s1",
        skill: Skill::Sql,
        text: "Which clause filters rows?",
        options: &["ORDER BY", "WHERE", "GROUP BY", "LIMIT"],
        answer: 1,
    },
    BankQuestion {
        id: "s2",
        skill: Skill::Sql,
        text: "Which improves SELECT speed?",
        options: &["Primary key", "Foreign key", "Index", "Constraint"],
        answer: 2,
    },
];

/// Bank entries for `skill`, in bank order.
pub fn bank_for(skill: Skill) -> impl Iterator<Item = &'static BankQuestion> {
    QUESTION_BANK.iter().filter(move |q| q.skill == skill)
}

/// Build the question list for a test: the first [`QUESTIONS_PER_SKILL`]
/// bank questions of each skill, following the order of `skills`.
///
/// A skill with fewer bank entries contributes whatever exists.
pub fn draw_questions(skills: &[Skill]) -> Vec<Question> {
    skills
        .iter()
        .flat_map(|&skill| bank_for(skill).take(QUESTIONS_PER_SKILL))
        .map(BankQuestion::to_question)
        .collect()
}
