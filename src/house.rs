//! The two closed vocabularies of the sorting engine: houses and traits.
//!
//! Both enumerations are fixed and not user-extensible. Modelling them as
//! closed variants (rather than open strings) gives compile-time
//! exhaustiveness over the four houses and six traits everywhere they are
//! matched — an accumulator array can never be the wrong length and a
//! display lookup can never miss a key.
//!
//! # Invariants
//!
//! - **SH-001**: [`House::ALL`] and [`Trait::ALL`] fix the declaration order
//!   used for accumulator indexing and for stable tie-breaking in the
//!   sorting calculation. Reordering them changes tie-break results.
//! - **SH-002**: Trait descriptions and colors are static lookups, never
//!   computed.

// ─── House ──────────────────────────────────────────────────────────────────

/// One of the four mutually exclusive sorting outcomes.
///
/// Declaration order matters: ties in the sorting calculation resolve to the
/// first-declared house among those tied (SH-001).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum House {
    /// Bravery, daring, nerve.
    Gryffindor,
    /// Ambition, cunning, resourcefulness.
    Slytherin,
    /// Intelligence, wit, love of learning.
    Ravenclaw,
    /// Loyalty, patience, fair play.
    Hufflepuff,
}

impl House {
    /// Every house, in declaration order (SH-001).
    pub const ALL: [House; 4] = [
        House::Gryffindor,
        House::Slytherin,
        House::Ravenclaw,
        House::Hufflepuff,
    ];

    /// Position of this house in [`House::ALL`]. Used to index accumulator
    /// arrays in the sorting calculation.
    pub fn index(self) -> usize {
        match self {
            House::Gryffindor => 0,
            House::Slytherin  => 1,
            House::Ravenclaw  => 2,
            House::Hufflepuff => 3,
        }
    }

    /// Capitalised display name, as rendered on the results page.
    pub fn display_name(self) -> &'static str {
        match self {
            House::Gryffindor => "Gryffindor",
            House::Slytherin  => "Slytherin",
            House::Ravenclaw  => "Ravenclaw",
            House::Hufflepuff => "Hufflepuff",
        }
    }
}

// ─── Trait ──────────────────────────────────────────────────────────────────

/// One of the six personality dimensions scored independently of house.
///
/// Declaration order matters: trait scores that tie keep this order after
/// the stable sort in the sorting calculation (SH-001).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Trait {
    /// Willingness to face danger.
    Courage,
    /// Drive to achieve goals.
    Ambition,
    /// Analytical thinking.
    Intelligence,
    /// Faithfulness to friends.
    Loyalty,
    /// Innovative thinking.
    Creativity,
    /// Ability to inspire others.
    Leadership,
}

impl Trait {
    /// Every trait, in declaration order (SH-001).
    pub const ALL: [Trait; 6] = [
        Trait::Courage,
        Trait::Ambition,
        Trait::Intelligence,
        Trait::Loyalty,
        Trait::Creativity,
        Trait::Leadership,
    ];

    /// Position of this trait in [`Trait::ALL`]. Used to index accumulator
    /// arrays in the sorting calculation.
    pub fn index(self) -> usize {
        match self {
            Trait::Courage      => 0,
            Trait::Ambition     => 1,
            Trait::Intelligence => 2,
            Trait::Loyalty      => 3,
            Trait::Creativity   => 4,
            Trait::Leadership   => 5,
        }
    }

    /// Capitalised display name, as rendered on the trait radar.
    pub fn display_name(self) -> &'static str {
        match self {
            Trait::Courage      => "Courage",
            Trait::Ambition     => "Ambition",
            Trait::Intelligence => "Intelligence",
            Trait::Loyalty      => "Loyalty",
            Trait::Creativity   => "Creativity",
            Trait::Leadership   => "Leadership",
        }
    }

    /// Fixed human-readable description attached to result trait scores (SH-002).
    pub fn description(self) -> &'static str {
        match self {
            Trait::Courage => "Willingness to face danger and stand up for what's right",
            Trait::Ambition => "Drive to achieve goals and pursue greatness",
            Trait::Intelligence => "Analytical thinking and thirst for knowledge",
            Trait::Loyalty => "Faithfulness to friends and unwavering dedication",
            Trait::Creativity => "Innovative thinking and artistic expression",
            Trait::Leadership => "Ability to inspire and guide others",
        }
    }

    /// Fixed display color (hex) attached to result trait scores (SH-002).
    pub fn color(self) -> &'static str {
        match self {
            Trait::Courage      => "#dc2626", // Red
            Trait::Ambition     => "#16a34a", // Green
            Trait::Intelligence => "#2563eb", // Blue
            Trait::Loyalty      => "#f59e0b", // Yellow
            Trait::Creativity   => "#7c3aed", // Purple
            Trait::Leadership   => "#ea580c", // Orange
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
