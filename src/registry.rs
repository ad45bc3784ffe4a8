//! In-memory participant store with per-house capacity.
//!
//! The registry is an explicit store object passed to whatever surface needs
//! it — never module-level state. All mutation goes through a single
//! [`parking_lot::RwLock`], so the admin dashboard can list participants
//! while registrations continue, and the sorting calculation itself stays
//! completely free of shared state.
//!
//! Capacity is tracked per house (default 30 seats each); a registration
//! into a full house is rejected so the ceremony cannot oversubscribe a
//! common room.

use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::house::House;

/// Default number of seats per house.
pub const DEFAULT_CAPACITY: u32 = 30;

// ─── Errors ─────────────────────────────────────────────────────────────────

/// Registry operation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The target house has no free seats.
    #[error("{} is full ({capacity} seats)", .house.display_name())]
    HouseFull {
        /// The full house.
        house: House,
        /// Its configured capacity.
        capacity: u32,
    },

    /// No participant with the given id.
    #[error("no participant with id {0}")]
    NotFound(u64),
}

// ─── Participant model ──────────────────────────────────────────────────────

/// Registration details supplied by the participant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewParticipant {
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// The house the participant was sorted into.
    pub house: House,
    /// Department or year group, free-form.
    pub department: String,
}

/// A stored participant with its registry-assigned id.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Participant {
    /// Registry-assigned id, unique for the lifetime of the registry.
    pub id: u64,
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// The house the participant was sorted into.
    pub house: House,
    /// Department or year group, free-form.
    pub department: String,
}

// ─── Registry ───────────────────────────────────────────────────────────────

struct Inner {
    /// Participants in registration order.
    participants: Vec<Participant>,
    /// Id → position in `participants`.
    by_id: HashMap<u64, usize>,
    /// Monotonic id source; ids are never reused.
    next_id: u64,
    /// Seats per house, indexed by `House::index()`.
    capacity: [u32; 4],
}

/// Thread-safe in-memory participant store.
pub struct ParticipantRegistry {
    inner: RwLock<Inner>,
}

impl ParticipantRegistry {
    /// An empty registry with [`DEFAULT_CAPACITY`] seats per house.
    pub fn new() -> Self {
        Self::with_capacity_per_house(DEFAULT_CAPACITY)
    }

    /// An empty registry with `seats` per house.
    pub fn with_capacity_per_house(seats: u32) -> Self {
        Self {
            inner: RwLock::new(Inner {
                participants: Vec::new(),
                by_id: HashMap::new(),
                next_id: 1,
                capacity: [seats; 4],
            }),
        }
    }

    // ── CRUD ──────────────────────────────────────────────────────────────

    /// Register a participant, assigning the next id.
    ///
    /// Fails with [`RegistryError::HouseFull`] when the target house has no
    /// free seats.
    pub fn add(&self, new: NewParticipant) -> Result<Participant, RegistryError> {
        let mut inner = self.inner.write();
        inner.check_seat(new.house, None)?;

        let id = inner.next_id;
        inner.next_id += 1;
        let participant = Participant {
            id,
            name: new.name,
            email: new.email,
            house: new.house,
            department: new.department,
        };
        let pos = inner.participants.len();
        inner.participants.push(participant.clone());
        inner.by_id.insert(id, pos);
        log::debug!(
            "registered participant {} into {}",
            id,
            participant.house.display_name()
        );
        Ok(participant)
    }

    /// All participants, in registration order.
    pub fn list(&self) -> Vec<Participant> {
        self.inner.read().participants.clone()
    }

    /// Look up one participant by id.
    pub fn get(&self, id: u64) -> Option<Participant> {
        let inner = self.inner.read();
        inner.by_id.get(&id).map(|&pos| inner.participants[pos].clone())
    }

    /// Replace a participant's details, keeping its id.
    ///
    /// Moving a participant into a different, full house fails with
    /// [`RegistryError::HouseFull`] and leaves the record unchanged.
    pub fn update(&self, id: u64, new: NewParticipant) -> Result<Participant, RegistryError> {
        let mut inner = self.inner.write();
        let pos = *inner.by_id.get(&id).ok_or(RegistryError::NotFound(id))?;
        if new.house != inner.participants[pos].house {
            inner.check_seat(new.house, Some(id))?;
        }
        let record = &mut inner.participants[pos];
        record.name = new.name;
        record.email = new.email;
        record.house = new.house;
        record.department = new.department;
        Ok(record.clone())
    }

    /// Remove a participant, freeing its seat.
    pub fn remove(&self, id: u64) -> Result<Participant, RegistryError> {
        let mut guard = self.inner.write();
        let inner = &mut *guard;
        let pos = inner.by_id.remove(&id).ok_or(RegistryError::NotFound(id))?;
        let removed = inner.participants.remove(pos);
        // Positions after the removed entry shift down by one.
        for later in &inner.participants[pos..] {
            if let Some(stored) = inner.by_id.get_mut(&later.id) {
                *stored -= 1;
            }
        }
        log::debug!("removed participant {}", id);
        Ok(removed)
    }

    // ── Capacity ──────────────────────────────────────────────────────────

    /// Configured seats for a house.
    pub fn capacity(&self, house: House) -> u32 {
        self.inner.read().capacity[house.index()]
    }

    /// Set the seats for a house.
    ///
    /// Lowering the capacity below the current occupancy does not evict
    /// anyone; it only blocks further registrations into that house.
    pub fn set_capacity(&self, house: House, seats: u32) {
        self.inner.write().capacity[house.index()] = seats;
    }

    /// Number of participants currently sorted into a house.
    pub fn occupancy(&self, house: House) -> u32 {
        self.inner.read().occupancy(house)
    }

    /// Occupancy of every house, in declaration order.
    pub fn house_counts(&self) -> [(House, u32); 4] {
        let inner = self.inner.read();
        House::ALL.map(|house| (house, inner.occupancy(house)))
    }

    // ── Export ────────────────────────────────────────────────────────────

    /// Render the participant list as CSV with a
    /// `Name,Email,House,Department` header.
    ///
    /// Fields containing commas, quotes or newlines are quoted.
    pub fn export_csv(&self) -> String {
        let inner = self.inner.read();
        let mut out = String::from("Name,Email,House,Department\n");
        for p in &inner.participants {
            out.push_str(&csv_field(&p.name));
            out.push(',');
            out.push_str(&csv_field(&p.email));
            out.push(',');
            out.push_str(p.house.display_name());
            out.push(',');
            out.push_str(&csv_field(&p.department));
            out.push('\n');
        }
        out
    }
}

impl Default for ParticipantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Inner {
    fn occupancy(&self, house: House) -> u32 {
        self.participants.iter().filter(|p| p.house == house).count() as u32
    }

    /// Reject the registration when `house` is at capacity. `moving_id`
    /// excludes a participant being moved between houses from the count of
    /// its destination (it cannot occupy a seat there yet).
    fn check_seat(&self, house: House, moving_id: Option<u64>) -> Result<(), RegistryError> {
        let capacity = self.capacity[house.index()];
        let occupied = self
            .participants
            .iter()
            .filter(|p| p.house == house && Some(p.id) != moving_id)
            .count() as u32;
        if occupied >= capacity {
            log::warn!("{} is full ({} seats)", house.display_name(), capacity);
            return Err(RegistryError::HouseFull { house, capacity });
        }
        Ok(())
    }
}

/// Quote a CSV field when it contains a comma, quote or newline.
fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
