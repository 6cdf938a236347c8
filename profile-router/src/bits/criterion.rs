//! Optimization criteria packed into 64 bits.
//!
//! Layout, high to low:
//!
//! | bits  | field      | encoding                                  |
//! |-------|------------|-------------------------------------------|
//! | 63    | unused     | always 0                                  |
//! | 62–51 | departure  | `4095 - (minutes + 240)`, 0 = no departure |
//! | 50–39 | arrival    | `minutes + 240`                           |
//! | 38–32 | changes    | 0..=127                                   |
//! | 31–0  | payload    | opaque                                    |
//!
//! Smaller is better in every field once the departure is complemented, so
//! one criterion dominates another exactly when each of its fields is
//! numerically less than or equal to the other's. Sorting by the raw value
//! with the payload masked off therefore never places a dominated tuple
//! ahead of one that dominates it.

use std::fmt;

use super::BitsError;

const PAYLOAD_BITS: u32 = 32;
const CHANGES_SHIFT: u32 = 32;
const CHANGES_BITS: u32 = 7;
const ARRIVAL_SHIFT: u32 = 39;
const DEPARTURE_SHIFT: u32 = 51;
const MINUTES_BITS: u32 = 12;

const PAYLOAD_MASK: u64 = (1 << PAYLOAD_BITS) - 1;
const CHANGES_MASK: u64 = (1 << CHANGES_BITS) - 1;
const MINUTES_MASK: u64 = (1 << MINUTES_BITS) - 1;

const MINUTES_OFFSET: i32 = 240;

/// Earliest representable minute of day (4 hours before midnight).
pub const MIN_MINUTES: i32 = -MINUTES_OFFSET;

/// Exclusive upper bound on representable minutes (48 hours).
pub const MAX_MINUTES: i32 = 2880;

/// Largest representable change count.
pub const MAX_CHANGES: u32 = CHANGES_MASK as u32;

/// An (optional departure, arrival, changes, payload) tuple in one word.
///
/// # Examples
///
/// ```
/// use profile_router::bits::PackedCriterion;
///
/// let c = PackedCriterion::pack(540, 2, 0).unwrap();
/// assert_eq!(c.arrival(), 540);
/// assert_eq!(c.changes(), 2);
/// assert!(!c.has_departure());
///
/// let c = c.with_departure(480).unwrap();
/// assert_eq!(c.departure().unwrap(), 480);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackedCriterion(u64);

impl PackedCriterion {
    /// Pack an arrival time, change count and payload without a departure.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `arrival` lies outside `[-240, 2880)` or `changes`
    /// exceeds 127.
    pub fn pack(arrival: i32, changes: u32, payload: u32) -> Result<Self, BitsError> {
        let arrival = encode_minutes("arrival", arrival)?;
        if changes > MAX_CHANGES {
            return Err(BitsError::ChangesOutOfRange(changes));
        }
        Ok(Self(
            (arrival << ARRIVAL_SHIFT)
                | (u64::from(changes) << CHANGES_SHIFT)
                | u64::from(payload),
        ))
    }

    /// Returns true if `minutes` can be stored in a time field.
    pub fn minutes_in_range(minutes: i32) -> bool {
        (MIN_MINUTES..MAX_MINUTES).contains(&minutes)
    }

    /// Reinterpret a raw word.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw word.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns true if a departure time is recorded.
    pub fn has_departure(self) -> bool {
        self.departure_field() != 0
    }

    /// Departure minute of day.
    ///
    /// # Errors
    ///
    /// Returns [`BitsError::MissingDeparture`] if none is recorded.
    pub fn departure(self) -> Result<i32, BitsError> {
        match self.departure_field() {
            0 => Err(BitsError::MissingDeparture),
            field => Ok((MINUTES_MASK - field) as i32 - MINUTES_OFFSET),
        }
    }

    /// Arrival minute of day.
    pub fn arrival(self) -> i32 {
        ((self.0 >> ARRIVAL_SHIFT) & MINUTES_MASK) as i32 - MINUTES_OFFSET
    }

    /// Number of vehicle changes.
    pub fn changes(self) -> u32 {
        ((self.0 >> CHANGES_SHIFT) & CHANGES_MASK) as u32
    }

    /// Opaque payload.
    pub fn payload(self) -> u32 {
        (self.0 & PAYLOAD_MASK) as u32
    }

    /// Returns true if `self` is at least as good as `other` on every
    /// criterion. The payload is ignored.
    ///
    /// # Panics
    ///
    /// Panics if exactly one of the two operands carries a departure time.
    pub fn dominates_or_equal(self, other: Self) -> bool {
        assert_eq!(
            self.has_departure(),
            other.has_departure(),
            "dominance needs both or neither criterion to carry a departure"
        );
        self.departure_field() <= other.departure_field()
            && self.arrival_field() <= other.arrival_field()
            && self.changes() <= other.changes()
    }

    /// Drop the departure time.
    pub fn without_departure(self) -> Self {
        Self(self.0 & !(MINUTES_MASK << DEPARTURE_SHIFT))
    }

    /// Replace the departure time.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `departure` lies outside `[-240, 2880)`.
    pub fn with_departure(self, departure: i32) -> Result<Self, BitsError> {
        let field = MINUTES_MASK - encode_minutes("departure", departure)?;
        Ok(Self(
            self.without_departure().0 | (field << DEPARTURE_SHIFT),
        ))
    }

    /// Count one more change.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the count would exceed 127.
    pub fn with_additional_change(self) -> Result<Self, BitsError> {
        let changes = self.changes() + 1;
        if changes > MAX_CHANGES {
            return Err(BitsError::ChangesOutOfRange(changes));
        }
        Ok(Self(
            (self.0 & !(CHANGES_MASK << CHANGES_SHIFT)) | (u64::from(changes) << CHANGES_SHIFT),
        ))
    }

    /// Replace the payload.
    pub fn with_payload(self, payload: u32) -> Self {
        Self((self.0 & !PAYLOAD_MASK) | u64::from(payload))
    }

    /// The criterion with its payload zeroed; the ordering key of fronts.
    pub fn without_payload(self) -> Self {
        Self(self.0 & !PAYLOAD_MASK)
    }

    fn departure_field(self) -> u64 {
        (self.0 >> DEPARTURE_SHIFT) & MINUTES_MASK
    }

    fn arrival_field(self) -> u64 {
        (self.0 >> ARRIVAL_SHIFT) & MINUTES_MASK
    }
}

fn encode_minutes(field: &'static str, minutes: i32) -> Result<u64, BitsError> {
    if !PackedCriterion::minutes_in_range(minutes) {
        return Err(BitsError::MinutesOutOfRange {
            field,
            value: minutes,
        });
    }
    Ok((minutes + MINUTES_OFFSET) as u64)
}

impl fmt::Debug for PackedCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackedCriterion")
            .field("departure", &self.departure().ok())
            .field("arrival", &self.arrival())
            .field("changes", &self.changes())
            .field("payload", &format_args!("{:#010x}", self.payload()))
            .finish()
    }
}
