//! Generic 24/8 split of a 32-bit word.

use std::fmt;

use super::BitsError;

const LOW_BITS: u32 = 8;
const HIGH_BITS: u32 = 24;
const LOW_MASK: u32 = (1 << LOW_BITS) - 1;

/// A 32-bit word holding a 24-bit high field and an 8-bit low field.
///
/// # Examples
///
/// ```
/// use profile_router::bits::Word24x8;
///
/// let word = Word24x8::pack(1000, 7).unwrap();
/// assert_eq!(word.high(), 1000);
/// assert_eq!(word.low(), 7);
///
/// assert!(Word24x8::pack(1 << 24, 0).is_err());
/// assert!(Word24x8::pack(0, 256).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word24x8(u32);

impl Word24x8 {
    /// Largest value the high field can hold.
    pub const HIGH_MAX: u32 = (1 << HIGH_BITS) - 1;

    /// Largest value the low field can hold.
    pub const LOW_MAX: u32 = LOW_MASK;

    /// Pack the two fields, failing if either is too wide.
    pub fn pack(high: u32, low: u32) -> Result<Self, BitsError> {
        if high > Self::HIGH_MAX {
            return Err(BitsError::FieldOverflow {
                field: "high",
                value: u64::from(high),
                bits: HIGH_BITS,
            });
        }
        if low > Self::LOW_MAX {
            return Err(BitsError::FieldOverflow {
                field: "low",
                value: u64::from(low),
                bits: LOW_BITS,
            });
        }
        Ok(Self((high << LOW_BITS) | low))
    }

    /// Reinterpret a raw word. Every 32-bit value is a valid split.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw word.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the 24-bit high field.
    pub const fn high(self) -> u32 {
        self.0 >> LOW_BITS
    }

    /// Returns the 8-bit low field.
    pub const fn low(self) -> u32 {
        self.0 & LOW_MASK
    }
}

impl fmt::Debug for Word24x8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word24x8({}|{})", self.high(), self.low())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_extremes() {
        let word = Word24x8::pack(Word24x8::HIGH_MAX, Word24x8::LOW_MAX).unwrap();
        assert_eq!(word.raw(), u32::MAX);
        assert_eq!(word.high(), Word24x8::HIGH_MAX);
        assert_eq!(word.low(), Word24x8::LOW_MAX);

        let word = Word24x8::pack(0, 0).unwrap();
        assert_eq!(word.raw(), 0);
    }

    #[test]
    fn reject_wide_fields() {
        assert!(matches!(
            Word24x8::pack(1 << 24, 0),
            Err(BitsError::FieldOverflow { bits: 24, .. })
        ));
        assert!(matches!(
            Word24x8::pack(0, 256),
            Err(BitsError::FieldOverflow { bits: 8, .. })
        ));
    }

    #[test]
    fn raw_layout() {
        let word = Word24x8::pack(0x00AB_CDEF, 0x12).unwrap();
        assert_eq!(word.raw(), 0xABCD_EF12);
        assert_eq!(Word24x8::from_raw(0xABCD_EF12), word);
    }

    #[test]
    fn debug() {
        let word = Word24x8::pack(42, 3).unwrap();
        assert_eq!(format!("{:?}", word), "Word24x8(42|3)");
    }
}
