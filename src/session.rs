//! Incremental response lifecycle: one answer per question, in presentation
//! order, then a single computation.
//!
//! A [`QuizSession`] borrows its question bank and owns nothing shared — any
//! number of sessions can run concurrently against the same bank. Responses
//! are validated *at record time* so the UI can re-prompt immediately, and
//! completeness is checked at [`QuizSession::finish`], which is where the
//! session guarantees the calculator's input contract (exactly one response
//! per question in the bank).

use hashbrown::HashSet;

use crate::bank::QuestionBank;
use crate::sorting::{self, Response, SortingError, SortingResult};

/// An in-progress quiz run against one [`QuestionBank`].
#[derive(Clone, Debug)]
pub struct QuizSession<'bank> {
    bank: &'bank QuestionBank,
    /// Responses in the order they were recorded.
    responses: Vec<Response>,
    /// Question ids already answered, for O(1) duplicate rejection.
    answered: HashSet<u32>,
}

impl<'bank> QuizSession<'bank> {
    /// Start an empty session against `bank`.
    pub fn new(bank: &'bank QuestionBank) -> Self {
        Self {
            bank,
            responses: Vec::with_capacity(bank.len()),
            answered: HashSet::with_capacity(bank.len()),
        }
    }

    /// Record the participant's choice for one question.
    ///
    /// Rejects unknown questions, out-of-range answer indices and second
    /// answers to an already-answered question, leaving the session
    /// unchanged in every error case.
    pub fn record(&mut self, question_id: u32, answer_index: usize) -> Result<(), SortingError> {
        let question = self
            .bank
            .question(question_id)
            .ok_or(SortingError::UnknownQuestion(question_id))?;
        if answer_index >= question.answers.len() {
            return Err(SortingError::UnknownAnswer { question_id, answer_index });
        }
        if !self.answered.insert(question_id) {
            return Err(SortingError::DuplicateResponse(question_id));
        }
        self.responses.push(Response { question_id, answer_index });
        Ok(())
    }

    /// Number of questions answered so far.
    pub fn answered(&self) -> usize {
        self.responses.len()
    }

    /// Number of questions still waiting for an answer.
    pub fn remaining(&self) -> usize {
        self.bank.len() - self.responses.len()
    }

    /// `true` once every question in the bank has a response.
    pub fn is_complete(&self) -> bool {
        self.responses.len() == self.bank.len()
    }

    /// The responses recorded so far, in recording order.
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    /// Compute the sorting result from the completed session.
    ///
    /// Fails with [`SortingError::Incomplete`] if any question lacks a
    /// response. The session itself is untouched — `finish` can be called
    /// again after the missing answers are recorded.
    pub fn finish(&self) -> Result<SortingResult, SortingError> {
        let missing = self.remaining();
        if missing > 0 {
            return Err(SortingError::Incomplete { missing });
        }
        log::debug!(
            "session complete: {} responses, computing result",
            self.responses.len()
        );
        sorting::sort(self.bank, &self.responses)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
