//! Half-open index ranges packed into 32 bits.

use std::fmt;
use std::ops::Range;

use super::{BitsError, Word24x8};

/// A half-open index range `[start, start + len)` packed into one word.
///
/// The start occupies the 24-bit high field and the length the 8-bit low
/// field of a [`Word24x8`], so a range spans at most 255 indices.
///
/// # Examples
///
/// ```
/// use profile_router::bits::PackedRange;
///
/// let range = PackedRange::new(100, 105).unwrap();
/// assert_eq!(range.start(), 100);
/// assert_eq!(range.len(), 5);
/// assert_eq!(range.end(), 105);
///
/// // Too long
/// assert!(PackedRange::new(0, 256).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedRange(Word24x8);

impl PackedRange {
    /// The range `[0, 0)`.
    pub const EMPTY: PackedRange = PackedRange(Word24x8::from_raw(0));

    /// Pack `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `end < start`, if the length exceeds 255, or if
    /// `start` does not fit in 24 bits.
    pub fn new(start: usize, end: usize) -> Result<Self, BitsError> {
        let len = end
            .checked_sub(start)
            .ok_or(BitsError::RangeReversed { start, end })?;
        if len > Word24x8::LOW_MAX as usize {
            return Err(BitsError::FieldOverflow {
                field: "range length",
                value: len as u64,
                bits: 8,
            });
        }
        if start > Word24x8::HIGH_MAX as usize {
            return Err(BitsError::FieldOverflow {
                field: "range start",
                value: start as u64,
                bits: 24,
            });
        }
        Ok(Self(Word24x8::pack(start as u32, len as u32)?))
    }

    /// Reinterpret a raw word.
    pub const fn from_raw(raw: u32) -> Self {
        Self(Word24x8::from_raw(raw))
    }

    /// Returns the raw word.
    pub const fn raw(self) -> u32 {
        self.0.raw()
    }

    /// Inclusive start.
    pub fn start(self) -> usize {
        self.0.high() as usize
    }

    /// Number of indices covered.
    pub fn len(self) -> usize {
        self.0.low() as usize
    }

    /// Exclusive end, always `start() + len()`.
    pub fn end(self) -> usize {
        self.start() + self.len()
    }

    /// Returns true if the range covers no index.
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Returns the covered indices.
    pub fn indices(self) -> Range<usize> {
        self.start()..self.end()
    }
}

impl Default for PackedRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Debug for PackedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PackedRange({}..{})", self.start(), self.end())
    }
}
