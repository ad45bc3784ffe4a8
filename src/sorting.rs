//! The sorting calculation — a complete response sequence in, one immutable
//! [`SortingResult`] out.
//!
//! The calculation is synchronous, single-threaded and side-effect-free: it
//! reads its input once and returns a value. Two identical response
//! sequences always yield bit-identical results.
//!
//! # Algorithm
//!
//! 1. For each response, add the question's weight to the chosen house's
//!    accumulator and `value × weight / 10` to each listed trait's
//!    accumulator, tracking the total weight.
//! 2. House percentage = `house / total_weight × 100`.
//! 3. Stable-sort houses descending by percentage; ties keep
//!    [`House::ALL`] declaration order. The first entry is the top house and
//!    every house records its distance from it.
//! 4. Borderline iff the runner-up is strictly within
//!    [`BORDERLINE_GAP`] points of the top.
//! 5. Trait scores normalise against the strongest trait (all zero when
//!    nothing contributed — never NaN), then stable-sort descending.
//! 6. The personality label is `"<Top>-<Second> Hybrid"` when borderline,
//!    `"Pure <Top>"` when the top exceeds [`PURE_THRESHOLD`], otherwise
//!    `"Balanced Wizard"`.
//!
//! # Invariants
//!
//! - **SH-006**: percentages are non-negative and sum to 100 (±1e-9).
//! - **SH-007**: exactly one standing carries `is_top`, always the first;
//!   its `difference` is 0, and ties resolve by declaration order.
//! - **SH-008**: trait scores are in [0, 100]; an all-zero trait field
//!   yields all-zero scores, never a division by zero.
//! - **SH-009**: malformed input fails with [`SortingError`] before any
//!   arithmetic — NaN percentages cannot escape.

use hashbrown::HashSet;

use crate::bank::QuestionBank;
use crate::house::{House, Trait};

// ─── Thresholds ─────────────────────────────────────────────────────────────

/// Gap (percentage points) between the top two houses below which a result
/// counts as borderline. Strict: a gap of exactly 15.0 is *not* borderline.
pub const BORDERLINE_GAP: f64 = 15.0;

/// Top-house percentage above which a non-borderline result is labelled
/// `"Pure <House>"`. Strict: exactly 60.0 stays `"Balanced Wizard"`.
pub const PURE_THRESHOLD: f64 = 60.0;

/// Divisor normalising raw 0–10 trait contributions into a comparable
/// per-response unit. A fixed scaling constant, not configurable.
const TRAIT_SCALE: f64 = 10.0;

// ─── Errors ─────────────────────────────────────────────────────────────────

/// Invalid response input, recoverable by the caller (re-prompt or reject
/// the session). The calculation refuses to run rather than produce NaN.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortingError {
    /// The response sequence is empty.
    #[error("response sequence is empty")]
    EmptyResponses,

    /// A response references a question id the bank does not contain.
    #[error("unknown question id {0}")]
    UnknownQuestion(u32),

    /// A response references an answer option the question does not have.
    #[error("question {question_id} has no answer option at index {answer_index}")]
    UnknownAnswer {
        /// Id of the referenced question.
        question_id: u32,
        /// The out-of-range answer index.
        answer_index: usize,
    },

    /// The sequence holds more than one response for the same question.
    #[error("more than one response for question {0}")]
    DuplicateResponse(u32),

    /// A session was finished before every question had a response.
    #[error("session incomplete: {missing} question(s) unanswered")]
    Incomplete {
        /// Number of questions still lacking a response.
        missing: usize,
    },
}

// ─── Input / output model ───────────────────────────────────────────────────

/// One recorded choice: a question and the index of the chosen answer
/// option, in the order questions were presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Response {
    /// Id of the answered question.
    pub question_id: u32,
    /// Index of the chosen answer option within that question.
    pub answer_index: usize,
}

/// One house's position in the ranking.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HouseStanding {
    /// The house.
    pub house: House,
    /// Share of the total weight won by this house, in [0, 100].
    pub percentage: f64,
    /// `true` for the first (highest) entry only (SH-007).
    pub is_top: bool,
    /// `top_percentage - percentage`; 0 for the top house itself.
    pub difference: f64,
}

/// One trait's normalised score with its fixed display metadata.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TraitScore {
    /// The trait.
    pub trait_kind: Trait,
    /// Score in [0, 100], relative to the strongest trait (SH-008).
    pub score: f64,
    /// Fixed human-readable description (static lookup).
    pub description: &'static str,
    /// Fixed display color, hex (static lookup).
    pub color: &'static str,
}

/// The immutable outcome of a sorting calculation.
///
/// A pure function of the response sequence and the question bank. Never
/// mutated after construction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SortingResult {
    /// The winning house — always `standings[0].house`.
    pub primary_house: House,
    /// All four houses, ranked descending by percentage.
    pub standings: Vec<HouseStanding>,
    /// All six traits, ranked descending by score.
    pub trait_scores: Vec<TraitScore>,
    /// `true` iff the runner-up is strictly within [`BORDERLINE_GAP`]
    /// points of the top.
    pub is_borderline: bool,
    /// Human-readable personality label.
    pub personality_type: String,
}

// ─── The calculation ────────────────────────────────────────────────────────

/// Transform a complete response sequence into a [`SortingResult`].
///
/// Input contract: a non-empty sequence with at most one response per
/// question, each referencing a valid question and answer option in `bank`.
/// Violations return [`SortingError`] — the calculation never produces NaN
/// or partial output (SH-009). Completeness against the *full* bank is the
/// session's concern, not checked here: a valid subset of questions sorts
/// fine, which is what keeps synthetic test banks cheap.
pub fn sort(bank: &QuestionBank, responses: &[Response]) -> Result<SortingResult, SortingError> {
    if responses.is_empty() {
        return Err(SortingError::EmptyResponses);
    }

    // ── Accumulation ──────────────────────────────────────────────────────
    let mut house_acc = [0.0_f64; 4];
    let mut trait_acc = [0.0_f64; 6];
    let mut total_weight = 0.0_f64;
    let mut seen: HashSet<u32> = HashSet::with_capacity(responses.len());

    for response in responses {
        let question = bank
            .question(response.question_id)
            .ok_or(SortingError::UnknownQuestion(response.question_id))?;
        let answer = question.answers.get(response.answer_index).ok_or(
            SortingError::UnknownAnswer {
                question_id: response.question_id,
                answer_index: response.answer_index,
            },
        )?;
        if !seen.insert(response.question_id) {
            return Err(SortingError::DuplicateResponse(response.question_id));
        }

        let weight = question.weight;
        total_weight += weight;
        house_acc[answer.house.index()] += weight;
        for &(trait_kind, value) in &answer.traits {
            trait_acc[trait_kind.index()] += f64::from(value) * weight / TRAIT_SCALE;
        }
    }
    // Bank validation guarantees positive weights, so total_weight > 0 here.

    // ── House ranking ─────────────────────────────────────────────────────
    let mut standings: Vec<HouseStanding> = House::ALL
        .iter()
        .map(|&house| HouseStanding {
            house,
            percentage: house_acc[house.index()] / total_weight * 100.0,
            is_top: false,
            difference: 0.0,
        })
        .collect();
    // Stable: equal percentages keep House::ALL declaration order (SH-001).
    standings.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));

    standings[0].is_top = true;
    let top = standings[0].percentage;
    for standing in &mut standings {
        standing.difference = top - standing.percentage;
    }
    let second = standings[1].percentage;
    let is_borderline = second > top - BORDERLINE_GAP;

    // ── Trait normalisation ───────────────────────────────────────────────
    let max_trait = trait_acc.iter().fold(0.0_f64, |m, &v| m.max(v));
    let mut trait_scores: Vec<TraitScore> = Trait::ALL
        .iter()
        .map(|&trait_kind| TraitScore {
            trait_kind,
            score: if max_trait > 0.0 {
                trait_acc[trait_kind.index()] / max_trait * 100.0
            } else {
                0.0
            },
            description: trait_kind.description(),
            color: trait_kind.color(),
        })
        .collect();
    // Stable: equal scores keep Trait::ALL declaration order (SH-001).
    trait_scores.sort_by(|a, b| b.score.total_cmp(&a.score));

    // ── Personality label ─────────────────────────────────────────────────
    let personality_type = if is_borderline {
        format!(
            "{}-{} Hybrid",
            standings[0].house.display_name(),
            standings[1].house.display_name()
        )
    } else if top > PURE_THRESHOLD {
        format!("Pure {}", standings[0].house.display_name())
    } else {
        "Balanced Wizard".to_string()
    };

    Ok(SortingResult {
        primary_house: standings[0].house,
        standings,
        trait_scores,
        is_borderline,
        personality_type,
    })
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{AnswerOption, Question, QuestionCategory};

    // ── Helpers ───────────────────────────────────────────────────────────

    /// A question whose four answers map straight onto the four houses, with
    /// the given trait vector attached to every answer.
    fn four_way_question(id: u32, weight: f64, traits: &[(Trait, u8)]) -> Question {
        Question {
            id,
            prompt: format!("question {}", id),
            category: QuestionCategory::Situations,
            weight,
            answers: House::ALL
                .iter()
                .map(|&house| AnswerOption {
                    text: house.display_name().into(),
                    house,
                    traits: traits.to_vec(),
                })
                .collect(),
        }
    }

    /// Bank of `n` identical four-way questions, ids 1..=n, weight 1.0.
    fn uniform_bank(n: u32) -> QuestionBank {
        QuestionBank::new((1..=n).map(|id| four_way_question(id, 1.0, &[])).collect())
            .unwrap()
    }

    fn respond_all(n: u32, answer_index: usize) -> Vec<Response> {
        (1..=n)
            .map(|question_id| Response { question_id, answer_index })
            .collect()
    }

    // ── Validation tests ──────────────────────────────────────────────────

    #[test]
    fn test_empty_responses_rejected() {
        let bank = uniform_bank(4);
        assert_eq!(sort(&bank, &[]).unwrap_err(), SortingError::EmptyResponses);
    }

    #[test]
    fn test_unknown_question_rejected() {
        let bank = uniform_bank(4);
        let err = sort(&bank, &[Response { question_id: 99, answer_index: 0 }]).unwrap_err();
        assert_eq!(err, SortingError::UnknownQuestion(99));
    }

    #[test]
    fn test_unknown_answer_rejected() {
        let bank = uniform_bank(4);
        let err = sort(&bank, &[Response { question_id: 1, answer_index: 4 }]).unwrap_err();
        assert_eq!(
            err,
            SortingError::UnknownAnswer { question_id: 1, answer_index: 4 }
        );
    }

    #[test]
    fn test_duplicate_response_rejected() {
        let bank = uniform_bank(4);
        let responses = [
            Response { question_id: 1, answer_index: 0 },
            Response { question_id: 1, answer_index: 1 },
        ];
        assert_eq!(
            sort(&bank, &responses).unwrap_err(),
            SortingError::DuplicateResponse(1)
        );
    }

    // ── Percentage and ranking tests ──────────────────────────────────────

    #[test]
    fn test_unanimous_answers_give_one_hundred_percent() {
        let bank = uniform_bank(8);
        // Index 0 in a four-way question is always Gryffindor.
        let result = sort(&bank, &respond_all(8, 0)).unwrap();

        assert_eq!(result.primary_house, House::Gryffindor);
        assert!((result.standings[0].percentage - 100.0).abs() < 1e-12);
        for standing in &result.standings[1..] {
            assert_eq!(standing.percentage, 0.0, "{:?}", standing.house);
        }
        assert!(!result.is_borderline);
        assert_eq!(result.personality_type, "Pure Gryffindor");
    }

    #[test]
    fn test_percentages_sum_to_one_hundred() {
        let bank = QuestionBank::standard();
        let responses: Vec<Response> = bank
            .question_ids()
            .enumerate()
            .map(|(i, question_id)| Response { question_id, answer_index: i % 4 })
            .collect();
        let result = sort(&bank, &responses).unwrap();
        let sum: f64 = result.standings.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9, "sum={}", sum);
    }

    #[test]
    fn test_exactly_one_top_house() {
        let bank = uniform_bank(8);
        // Clear winner: five answers to one house, one each to the rest.
        let responses: Vec<Response> = (1..=8)
            .map(|question_id| Response {
                question_id,
                answer_index: if question_id <= 5 { 3 } else { question_id as usize - 6 },
            })
            .collect();
        let result = sort(&bank, &responses).unwrap();

        assert_eq!(result.standings.iter().filter(|s| s.is_top).count(), 1);
        let zero_diffs = result
            .standings
            .iter()
            .filter(|s| s.difference == 0.0)
            .count();
        assert_eq!(zero_diffs, 1);
        assert_eq!(result.primary_house, House::Hufflepuff);
        assert!(result.standings[0].is_top);
    }

    #[test]
    fn test_four_way_tie_resolves_to_first_declared_house() {
        let bank = uniform_bank(8);
        // Every house gets two answers — a four-way tie at 25% each.
        let responses: Vec<Response> = (1..=8)
            .map(|question_id| Response {
                question_id,
                answer_index: (question_id as usize - 1) % 4,
            })
            .collect();
        let result = sort(&bank, &responses).unwrap();

        // is_top stays unique even when the percentages all tie.
        assert_eq!(result.standings.iter().filter(|s| s.is_top).count(), 1);
        assert_eq!(result.primary_house, House::Gryffindor);
        let order: Vec<House> = result.standings.iter().map(|s| s.house).collect();
        assert_eq!(order, House::ALL.to_vec(), "ties keep declaration order");
    }

    #[test]
    fn test_differences_measured_from_top() {
        let bank = uniform_bank(4);
        let responses = [
            Response { question_id: 1, answer_index: 0 },
            Response { question_id: 2, answer_index: 0 },
            Response { question_id: 3, answer_index: 0 },
            Response { question_id: 4, answer_index: 1 },
        ];
        let result = sort(&bank, &responses).unwrap();
        assert_eq!(result.standings[0].difference, 0.0);
        assert!((result.standings[1].difference - 50.0).abs() < 1e-12); // 75 - 25
        assert!((result.standings[2].difference - 75.0).abs() < 1e-12);
        assert!((result.standings[3].difference - 75.0).abs() < 1e-12);
    }

    // ── Borderline tests ──────────────────────────────────────────────────

    /// Three-question bank whose weights are the house shares in percent
    /// (they sum to 100), letting a test dial in the top-two gap exactly.
    fn gap_bank(weights: [f64; 3]) -> QuestionBank {
        QuestionBank::new(
            weights
                .iter()
                .enumerate()
                .map(|(i, &w)| four_way_question(i as u32 + 1, w, &[]))
                .collect(),
        )
        .unwrap()
    }

    fn gap_responses() -> [Response; 3] {
        [
            Response { question_id: 1, answer_index: 0 }, // Gryffindor
            Response { question_id: 2, answer_index: 1 }, // Slytherin
            Response { question_id: 3, answer_index: 2 }, // Ravenclaw
        ]
    }

    #[test]
    fn test_gap_of_exactly_fifteen_is_not_borderline() {
        // 50% / 35% / 15%: second == top - 15 exactly, and the comparison
        // is strict. The 50% top share is exactly representable, so the
        // boundary really is hit, not approximated.
        let result = sort(&gap_bank([50.0, 35.0, 15.0]), &gap_responses()).unwrap();
        assert!((result.standings[0].percentage - 50.0).abs() < 1e-12);
        assert!((result.standings[1].percentage - 35.0).abs() < 1e-12);
        assert!(!result.is_borderline);
        assert_eq!(result.personality_type, "Balanced Wizard");
    }

    #[test]
    fn test_gap_just_under_fifteen_is_borderline() {
        // 50% / 35.001% / 14.999%: gap = 14.999.
        let result = sort(&gap_bank([50.0, 35.001, 14.999]), &gap_responses()).unwrap();
        assert!(result.is_borderline);
        assert_eq!(result.personality_type, "Gryffindor-Slytherin Hybrid");
    }

    #[test]
    fn test_even_split_is_borderline_hybrid() {
        let bank = uniform_bank(8);
        let responses: Vec<Response> = (1..=8)
            .map(|question_id| Response {
                question_id,
                answer_index: if question_id <= 4 { 0 } else { 1 },
            })
            .collect();
        let result = sort(&bank, &responses).unwrap();

        assert!((result.standings[0].percentage - 50.0).abs() < 1e-12);
        assert!((result.standings[1].percentage - 50.0).abs() < 1e-12);
        assert!(result.is_borderline);
        assert_eq!(result.personality_type, "Gryffindor-Slytherin Hybrid");
    }

    // ── Label tests ───────────────────────────────────────────────────────

    #[test]
    fn test_exactly_sixty_percent_is_not_pure() {
        // 60% vs 25% vs 15%: not borderline (gap 35), top == 60.0 exactly,
        // and the pure comparison is strict.
        let bank = QuestionBank::new(vec![
            four_way_question(1, 60.0, &[]),
            four_way_question(2, 25.0, &[]),
            four_way_question(3, 15.0, &[]),
        ])
        .unwrap();
        let responses = [
            Response { question_id: 1, answer_index: 0 },
            Response { question_id: 2, answer_index: 1 },
            Response { question_id: 3, answer_index: 2 },
        ];
        let result = sort(&bank, &responses).unwrap();
        assert!((result.standings[0].percentage - 60.0).abs() < 1e-12);
        assert!(!result.is_borderline);
        assert_eq!(result.personality_type, "Balanced Wizard");
    }

    // ── Trait tests ───────────────────────────────────────────────────────

    #[test]
    fn test_single_weighted_response_traits() {
        // One response, weight 2.0, choosing Ravenclaw with a single
        // intelligence contribution: intelligence is the max and scores 100.
        let bank = QuestionBank::new(vec![four_way_question(
            1,
            2.0,
            &[(Trait::Intelligence, 10)],
        )])
        .unwrap();
        let result = sort(&bank, &[Response { question_id: 1, answer_index: 2 }]).unwrap();

        assert_eq!(result.primary_house, House::Ravenclaw);
        assert!((result.standings[0].percentage - 100.0).abs() < 1e-12);
        assert_eq!(result.trait_scores[0].trait_kind, Trait::Intelligence);
        assert!((result.trait_scores[0].score - 100.0).abs() < 1e-12);
        for trait_score in &result.trait_scores[1..] {
            assert_eq!(trait_score.score, 0.0, "{:?}", trait_score.trait_kind);
        }
    }

    #[test]
    fn test_all_zero_traits_give_all_zero_scores() {
        let bank = uniform_bank(3);
        let result = sort(&bank, &respond_all(3, 0)).unwrap();
        for trait_score in &result.trait_scores {
            assert_eq!(trait_score.score, 0.0, "{:?}", trait_score.trait_kind);
        }
        // Zero-score ties keep declaration order.
        let order: Vec<Trait> = result.trait_scores.iter().map(|t| t.trait_kind).collect();
        assert_eq!(order, Trait::ALL.to_vec());
    }

    #[test]
    fn test_trait_scores_bounded_and_carry_metadata() {
        let bank = QuestionBank::standard();
        let responses: Vec<Response> = bank
            .question_ids()
            .map(|question_id| Response { question_id, answer_index: 0 })
            .collect();
        let result = sort(&bank, &responses).unwrap();
        for trait_score in &result.trait_scores {
            assert!(
                (0.0..=100.0).contains(&trait_score.score),
                "{:?} = {}",
                trait_score.trait_kind,
                trait_score.score
            );
            assert_eq!(trait_score.description, trait_score.trait_kind.description());
            assert_eq!(trait_score.color, trait_score.trait_kind.color());
        }
        assert!((result.trait_scores[0].score - 100.0).abs() < 1e-12);
    }

    // ── Determinism tests ─────────────────────────────────────────────────

    #[test]
    fn test_identical_input_gives_bit_identical_output() {
        let bank = QuestionBank::standard();
        let responses: Vec<Response> = bank
            .question_ids()
            .enumerate()
            .map(|(i, question_id)| Response { question_id, answer_index: (i + 1) % 4 })
            .collect();

        let first = sort(&bank, &responses).unwrap();
        let second = sort(&bank, &responses).unwrap();

        assert_eq!(first, second);
        for (a, b) in first.standings.iter().zip(second.standings.iter()) {
            assert_eq!(a.percentage.to_bits(), b.percentage.to_bits());
            assert_eq!(a.difference.to_bits(), b.difference.to_bits());
        }
        for (a, b) in first.trait_scores.iter().zip(second.trait_scores.iter()) {
            assert_eq!(a.score.to_bits(), b.score.to_bits());
        }
    }
}
