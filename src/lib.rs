//! # sorting-hat
//!
//! Deterministic house-sorting engine for a four-house personality quiz.
//!
//! ---
//!
//! ## This is not a web framework. It is the calculation behind one.
//!
//! A participant answers a fixed catalogue of weighted multiple-choice
//! questions. Every answer option maps to exactly one house and carries a
//! partial vector of trait contributions on a 0–10 scale. From a complete
//! response sequence the engine derives a single immutable result:
//!
//! - per-house percentages (always summing to 100),
//! - the top house and every house's distance from it,
//! - a normalised per-trait profile (0–100, relative to the strongest trait),
//! - a *borderline* flag when the runner-up house is within 15 percentage
//!   points of the top,
//! - a human-readable personality label.
//!
//! The calculation is a pure function of the response sequence and the
//! question bank: no randomness, no I/O, no shared state. It is safe to run
//! concurrently from any number of independent sessions.
//!
//! ## The pipeline
//!
//! ```text
//! Responses → QuizSession → sort() → SortingResult → ResultSnapshot
//!                 ↑            ↑                          ↓
//!           QuestionBank   House / Trait           session storage
//!                          vocabularies
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`house`] | [`house::House`], [`house::Trait`] | The two closed vocabularies: four houses, six traits |
//! | [`bank`] | [`bank::Question`], [`bank::QuestionBank`] | Immutable, validated question catalogue |
//! | [`sorting`] | [`sorting::SortingResult`], [`sorting::sort`] | The weighted scoring calculation |
//! | [`session`] | [`session::QuizSession`] | Incremental response recording, one answer per question |
//! | [`registry`] | [`registry::ParticipantRegistry`] | In-memory participant store with per-house capacity |
//! | [`auth`] | [`auth::AdminAuth`] | Password check issuing a signed, time-limited admin token |
//! | [`snapshot`] | [`snapshot::ResultSnapshot`] | Serialisable result record (requires `serde` feature) |
//!
//! ## Quick start
//!
//! ```rust
//! use sorting_hat::bank::QuestionBank;
//! use sorting_hat::session::QuizSession;
//!
//! let bank = QuestionBank::standard();
//! let mut session = QuizSession::new(&bank);
//! for id in bank.question_ids() {
//!     session.record(id, 0).unwrap();
//! }
//! let result = session.finish().unwrap();
//! println!("{} — {}", result.primary_house.display_name(), result.personality_type);
//! ```
//!
//! ## Determinism
//!
//! All sorts are stable and all tie-breaks fall back to declaration order of
//! the [`house::House::ALL`] and [`house::Trait::ALL`] constants, so two
//! identical response sequences always produce bit-identical results.

#![deny(unsafe_code)]
#![deny(missing_docs)]

pub mod house;    // House + Trait closed vocabularies
pub mod bank;     // Question catalogue (validated, immutable)
pub mod sorting;  // The sorting calculation
pub mod session;  // Incremental response lifecycle
pub mod registry; // Participant store + house capacity
pub mod auth;     // Admin login token
#[cfg(feature = "serde")]
pub mod snapshot; // Serialisable result record
