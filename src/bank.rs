//! The question catalogue — immutable, validated configuration.
//!
//! A [`QuestionBank`] is loaded once at process start and never mutated. It
//! is passed *by reference* into sessions and the sorting calculation rather
//! than living in module-level state, so independent quizzes can run against
//! different banks in the same process.
//!
//! Validation happens at construction: a bank that violates its data
//! integrity rules ([`BankError`]) is rejected outright rather than
//! producing silently wrong percentages later. A defective bank is fatal to
//! that bank only, never to the process.
//!
//! # Invariants
//!
//! - **SH-003**: question ids are unique within a bank.
//! - **SH-004**: every question weight is finite and strictly positive
//!   (default 1.0), so a non-empty response sequence always has positive
//!   total weight.
//! - **SH-005**: trait contributions are in [0, 10]; traits omitted from an
//!   answer contribute 0.

use hashbrown::HashMap;

use crate::house::{House, Trait};

// ─── Errors ─────────────────────────────────────────────────────────────────

/// Data-integrity defect found while constructing a [`QuestionBank`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BankError {
    /// Two questions share the same id (SH-003).
    #[error("duplicate question id {0}")]
    DuplicateQuestionId(u32),

    /// A question's weight is non-finite or not strictly positive (SH-004).
    #[error("question {question_id} has invalid weight {weight}")]
    InvalidWeight {
        /// Id of the offending question.
        question_id: u32,
        /// The rejected weight value.
        weight: f64,
    },

    /// An answer option's trait contribution exceeds the 0–10 scale (SH-005).
    #[error("question {question_id}: {trait_kind:?} contribution {value} exceeds the 0-10 scale")]
    TraitValueOutOfRange {
        /// Id of the offending question.
        question_id: u32,
        /// The trait whose contribution is out of range.
        trait_kind: Trait,
        /// The rejected contribution value.
        value: u8,
    },

    /// A question has no answer options at all.
    #[error("question {0} has no answer options")]
    EmptyAnswerList(u32),
}

// ─── Question model ─────────────────────────────────────────────────────────

/// Thematic grouping of a question. Display metadata only — the scoring
/// calculation never reads it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuestionCategory {
    /// What the participant holds important.
    Values,
    /// How the participant sees themselves.
    Personality,
    /// How the participant acts under pressure.
    Situations,
    /// What the participant is drawn to.
    Preferences,
}

/// One answer option of a question.
///
/// Maps to exactly one [`House`] and carries a partial trait vector: traits
/// not listed contribute 0 (SH-005).
#[derive(Clone, Debug, PartialEq)]
pub struct AnswerOption {
    /// Answer text shown to the participant.
    pub text: String,
    /// The house this answer counts toward.
    pub house: House,
    /// Partial (trait, contribution) mapping, contributions in [0, 10].
    pub traits: Vec<(Trait, u8)>,
}

/// One quiz question: a prompt, a weight and its fixed answer options.
#[derive(Clone, Debug, PartialEq)]
pub struct Question {
    /// Unique, stable question id (SH-003).
    pub id: u32,
    /// Question text shown to the participant.
    pub prompt: String,
    /// Thematic grouping (display only).
    pub category: QuestionCategory,
    /// Multiplier amplifying this question's influence on both house and
    /// trait accumulation. Finite and strictly positive (SH-004).
    pub weight: f64,
    /// Ordered answer options, typically four per question.
    pub answers: Vec<AnswerOption>,
}

// ─── QuestionBank ───────────────────────────────────────────────────────────

/// Immutable catalogue of questions, keyed by id, validated at construction.
#[derive(Clone, Debug)]
pub struct QuestionBank {
    /// Questions in presentation order.
    questions: Vec<Question>,
    /// Id → position in `questions`.
    by_id: HashMap<u32, usize>,
}

impl QuestionBank {
    /// Build a bank from a question list, validating every integrity rule.
    ///
    /// Questions keep the order they were given in — that order is the
    /// presentation order reported by [`QuestionBank::iter`].
    pub fn new(questions: Vec<Question>) -> Result<Self, BankError> {
        let mut by_id = HashMap::with_capacity(questions.len());
        for (pos, q) in questions.iter().enumerate() {
            if by_id.insert(q.id, pos).is_some() {
                return Err(BankError::DuplicateQuestionId(q.id));
            }
            if !q.weight.is_finite() || q.weight <= 0.0 {
                return Err(BankError::InvalidWeight { question_id: q.id, weight: q.weight });
            }
            if q.answers.is_empty() {
                return Err(BankError::EmptyAnswerList(q.id));
            }
            for answer in &q.answers {
                for &(trait_kind, value) in &answer.traits {
                    if value > 10 {
                        return Err(BankError::TraitValueOutOfRange {
                            question_id: q.id,
                            trait_kind,
                            value,
                        });
                    }
                }
            }
        }
        log::debug!("question bank validated: {} questions", questions.len());
        Ok(Self { questions, by_id })
    }

    /// Number of questions in the bank.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// `true` if the bank holds no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Look up a question by id.
    pub fn question(&self, id: u32) -> Option<&Question> {
        self.by_id.get(&id).map(|&pos| &self.questions[pos])
    }

    /// Look up one answer option of a question.
    pub fn answer(&self, question_id: u32, answer_index: usize) -> Option<&AnswerOption> {
        self.question(question_id)
            .and_then(|q| q.answers.get(answer_index))
    }

    /// Iterate questions in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// Question ids in presentation order.
    pub fn question_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.questions.iter().map(|q| q.id)
    }
}

// ─── The standard eight-question bank ───────────────────────────────────────

fn answer(text: &str, house: House, traits: &[(Trait, u8)]) -> AnswerOption {
    AnswerOption {
        text: text.into(),
        house,
        traits: traits.to_vec(),
    }
}

fn question(
    id: u32,
    prompt: &str,
    category: QuestionCategory,
    weight: f64,
    answers: Vec<AnswerOption>,
) -> Question {
    Question { id, prompt: prompt.into(), category, weight, answers }
}

impl QuestionBank {
    /// The standard eight-question sorting ceremony bank.
    ///
    /// One answer per house on every question; weights range 1.0–1.4 so the
    /// situational and self-image questions count slightly more than the
    /// preference ones.
    pub fn standard() -> Self {
        use House::*;
        use QuestionCategory::*;
        use Trait::*;

        let questions = vec![
            question(
                1,
                "You're walking through a dark forest and come to a fork in the path. \
                 Which way do you choose?",
                Situations,
                1.2,
                vec![
                    answer(
                        "The well-lit path that leads toward what sounds like laughter",
                        Hufflepuff,
                        &[(Loyalty, 8), (Courage, 3), (Intelligence, 2), (Ambition, 1)],
                    ),
                    answer(
                        "The narrow, dark path that you can hear strange, haunting music \
                         coming from",
                        Slytherin,
                        &[(Ambition, 9), (Intelligence, 6), (Courage, 4), (Loyalty, 2)],
                    ),
                    answer(
                        "The wide, bright path that leads toward what sounds like \
                         fast-running water",
                        Ravenclaw,
                        &[(Intelligence, 9), (Creativity, 7), (Ambition, 3), (Courage, 4)],
                    ),
                    answer(
                        "The path through the trees that you can see light ahead, but \
                         can't identify the source",
                        Gryffindor,
                        &[(Courage, 10), (Ambition, 5), (Intelligence, 4), (Loyalty, 6)],
                    ),
                ],
            ),
            question(
                2,
                "What magical creature would you most like to study?",
                Preferences,
                1.0,
                vec![
                    answer(
                        "Dragons - powerful and fierce",
                        Gryffindor,
                        &[(Courage, 9), (Ambition, 6), (Leadership, 7), (Loyalty, 4)],
                    ),
                    answer(
                        "Unicorns - pure and gentle",
                        Hufflepuff,
                        &[(Loyalty, 10), (Courage, 5), (Intelligence, 6), (Ambition, 2)],
                    ),
                    answer(
                        "Phoenix - mysterious and wise",
                        Ravenclaw,
                        &[(Intelligence, 10), (Creativity, 8), (Ambition, 4), (Courage, 6)],
                    ),
                    answer(
                        "Basilisk - dangerous and cunning",
                        Slytherin,
                        &[(Ambition, 9), (Intelligence, 7), (Leadership, 8), (Courage, 6)],
                    ),
                ],
            ),
            question(
                3,
                "Which magical artifact calls to you most?",
                Values,
                1.1,
                vec![
                    answer(
                        "A glowing sword that has never failed in battle",
                        Gryffindor,
                        &[(Courage, 10), (Leadership, 7), (Ambition, 5), (Loyalty, 6)],
                    ),
                    answer(
                        "An ancient book containing lost knowledge",
                        Ravenclaw,
                        &[(Intelligence, 10), (Creativity, 8), (Ambition, 4), (Courage, 3)],
                    ),
                    answer(
                        "A locket that can store your happiest memories",
                        Hufflepuff,
                        &[(Loyalty, 9), (Courage, 4), (Intelligence, 5), (Ambition, 2)],
                    ),
                    answer(
                        "A ring that makes you invisible to your enemies",
                        Slytherin,
                        &[(Ambition, 9), (Intelligence, 6), (Leadership, 8), (Courage, 5)],
                    ),
                ],
            ),
            question(
                4,
                "You're in a magical duel. What's your strategy?",
                Situations,
                1.3,
                vec![
                    answer(
                        "Attack head-on with powerful spells",
                        Gryffindor,
                        &[(Courage, 10), (Leadership, 6), (Ambition, 4), (Loyalty, 5)],
                    ),
                    answer(
                        "Use clever tactics and misdirection",
                        Slytherin,
                        &[(Intelligence, 8), (Ambition, 9), (Leadership, 7), (Courage, 5)],
                    ),
                    answer(
                        "Rely on your extensive knowledge of defensive magic",
                        Ravenclaw,
                        &[(Intelligence, 10), (Creativity, 6), (Courage, 4), (Loyalty, 3)],
                    ),
                    answer(
                        "Try to find a peaceful resolution first",
                        Hufflepuff,
                        &[(Loyalty, 10), (Courage, 3), (Intelligence, 5), (Ambition, 1)],
                    ),
                ],
            ),
            question(
                5,
                "What would you see in the Mirror of Erised?",
                Personality,
                1.4,
                vec![
                    answer(
                        "Yourself as the greatest wizard of all time",
                        Slytherin,
                        &[(Ambition, 10), (Leadership, 9), (Intelligence, 6), (Courage, 5)],
                    ),
                    answer(
                        "Yourself surrounded by loved ones, all happy and safe",
                        Hufflepuff,
                        &[(Loyalty, 10), (Courage, 4), (Intelligence, 3), (Ambition, 1)],
                    ),
                    answer(
                        "Yourself having solved the greatest mysteries of magic",
                        Ravenclaw,
                        &[(Intelligence, 10), (Creativity, 9), (Ambition, 5), (Courage, 3)],
                    ),
                    answer(
                        "Yourself as a brave hero, celebrated for great deeds",
                        Gryffindor,
                        &[(Courage, 10), (Leadership, 8), (Ambition, 6), (Loyalty, 7)],
                    ),
                ],
            ),
            question(
                6,
                "Which magical subject interests you most?",
                Preferences,
                1.0,
                vec![
                    answer(
                        "Defense Against the Dark Arts",
                        Gryffindor,
                        &[(Courage, 9), (Leadership, 6), (Ambition, 5), (Loyalty, 4)],
                    ),
                    answer(
                        "Ancient Runes",
                        Ravenclaw,
                        &[(Intelligence, 10), (Creativity, 7), (Ambition, 3), (Courage, 2)],
                    ),
                    answer(
                        "Herbology",
                        Hufflepuff,
                        &[(Loyalty, 8), (Courage, 3), (Intelligence, 6), (Ambition, 2)],
                    ),
                    answer(
                        "Potions",
                        Slytherin,
                        &[(Intelligence, 8), (Ambition, 7), (Leadership, 5), (Courage, 4)],
                    ),
                ],
            ),
            question(
                7,
                "What's your greatest fear?",
                Personality,
                1.2,
                vec![
                    answer(
                        "Being ordinary and forgotten",
                        Slytherin,
                        &[(Ambition, 10), (Leadership, 8), (Intelligence, 5), (Courage, 6)],
                    ),
                    answer(
                        "Letting down the people you care about",
                        Hufflepuff,
                        &[(Loyalty, 10), (Courage, 5), (Intelligence, 4), (Ambition, 2)],
                    ),
                    answer(
                        "Ignorance and closed-mindedness",
                        Ravenclaw,
                        &[(Intelligence, 10), (Creativity, 8), (Ambition, 4), (Courage, 3)],
                    ),
                    answer(
                        "Being seen as weak or cowardly",
                        Gryffindor,
                        &[(Courage, 10), (Leadership, 7), (Ambition, 6), (Loyalty, 5)],
                    ),
                ],
            ),
            question(
                8,
                "If you could possess one magical ability, what would it be?",
                Values,
                1.1,
                vec![
                    answer(
                        "The ability to read minds",
                        Slytherin,
                        &[(Intelligence, 8), (Ambition, 9), (Leadership, 7), (Courage, 4)],
                    ),
                    answer(
                        "The ability to heal any wound or illness",
                        Hufflepuff,
                        &[(Loyalty, 10), (Courage, 5), (Intelligence, 6), (Ambition, 2)],
                    ),
                    answer(
                        "The ability to see into the future",
                        Ravenclaw,
                        &[(Intelligence, 10), (Creativity, 9), (Ambition, 4), (Courage, 3)],
                    ),
                    answer(
                        "The ability to become invisible at will",
                        Gryffindor,
                        &[(Courage, 8), (Intelligence, 6), (Ambition, 5), (Loyalty, 4)],
                    ),
                ],
            ),
        ];

        // The catalogue above is fixed data that the constructor's own tests
        // keep valid; a rejection here is a programming error, not input.
        Self::new(questions).expect("standard bank satisfies its integrity rules")
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
