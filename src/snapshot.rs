//! Portable snapshot of a [`SortingResult`] for session storage and
//! transport.
//!
//! The live result types borrow static display metadata and are only
//! serialisable one way; the snapshot owns everything, carries a format
//! version and a timestamp, and round-trips losslessly through JSON. The
//! presentation layer reads the snapshot — it never touches the live
//! calculation types.
//!
//! Requires the `serde` feature.
//!
//! [`SortingResult`]: crate::sorting::SortingResult

use crate::sorting::SortingResult;

/// Current snapshot format version.
pub const RESULT_SNAPSHOT_VERSION: u16 = 1;

/// A serialisable record of one participant's sorting result.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct ResultSnapshot {
    /// Format version — always [`RESULT_SNAPSHOT_VERSION`] for newly
    /// created snapshots.
    pub version: u16,
    /// Unix timestamp (seconds) when the result was computed. 0 if unknown.
    pub created_at: i64,
    /// Name the participant registered under.
    pub participant_name: String,
    /// Display name of the winning house.
    pub primary_house: String,
    /// Human-readable personality label.
    pub personality_type: String,
    /// `true` when the top two houses were within the borderline gap.
    pub is_borderline: bool,
    /// All four houses in ranked order.
    pub standings: Vec<StandingRecord>,
    /// All six traits in ranked order.
    pub traits: Vec<TraitRecord>,
}

/// Serialisable representation of one house's ranking entry.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct StandingRecord {
    /// House display name.
    pub house: String,
    /// Share of total weight, in [0, 100].
    pub percentage: f64,
    /// `true` for the first entry only.
    pub is_top: bool,
    /// Distance from the top house's percentage.
    pub difference: f64,
}

/// Serialisable representation of one trait score.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct TraitRecord {
    /// Trait display name.
    pub trait_name: String,
    /// Normalised score in [0, 100].
    pub score: f64,
    /// Fixed human-readable description.
    pub description: String,
    /// Fixed display color, hex.
    pub color: String,
}

impl ResultSnapshot {
    /// Capture a computed result for `participant_name`.
    ///
    /// `created_at` is a unix-seconds timestamp supplied by the caller
    /// (0 if unknown). Ranking order is preserved exactly.
    pub fn from_result(
        result: &SortingResult,
        participant_name: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            version: RESULT_SNAPSHOT_VERSION,
            created_at,
            participant_name: participant_name.into(),
            primary_house: result.primary_house.display_name().to_string(),
            personality_type: result.personality_type.clone(),
            is_borderline: result.is_borderline,
            standings: result
                .standings
                .iter()
                .map(|s| StandingRecord {
                    house: s.house.display_name().to_string(),
                    percentage: s.percentage,
                    is_top: s.is_top,
                    difference: s.difference,
                })
                .collect(),
            traits: result
                .trait_scores
                .iter()
                .map(|t| TraitRecord {
                    trait_name: t.trait_kind.display_name().to_string(),
                    score: t.score,
                    description: t.description.to_string(),
                    color: t.color.to_string(),
                })
                .collect(),
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
