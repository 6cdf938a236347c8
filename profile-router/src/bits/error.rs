//! Codec error types.

/// Errors raised when a value does not fit the bit field it is packed into.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BitsError {
    /// Value is wider than its field
    #[error("{field} value {value} does not fit in {bits} bits")]
    FieldOverflow {
        field: &'static str,
        value: u64,
        bits: u32,
    },

    /// Range end lies before its start
    #[error("range end {end} precedes start {start}")]
    RangeReversed { start: usize, end: usize },

    /// Minute value outside the representable day window
    #[error("{field} minutes {value} outside [-240, 2880)")]
    MinutesOutOfRange { field: &'static str, value: i32 },

    /// Change count above the 7-bit maximum
    #[error("change count {0} exceeds 127")]
    ChangesOutOfRange(u32),

    /// Departure requested from a criterion that has none
    #[error("criterion carries no departure time")]
    MissingDeparture,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = BitsError::FieldOverflow {
            field: "range length",
            value: 256,
            bits: 8,
        };
        assert_eq!(err.to_string(), "range length value 256 does not fit in 8 bits");

        let err = BitsError::RangeReversed { start: 5, end: 3 };
        assert_eq!(err.to_string(), "range end 3 precedes start 5");

        let err = BitsError::MinutesOutOfRange {
            field: "arrival",
            value: 2880,
        };
        assert_eq!(err.to_string(), "arrival minutes 2880 outside [-240, 2880)");

        let err = BitsError::ChangesOutOfRange(128);
        assert_eq!(err.to_string(), "change count 128 exceeds 127");

        let err = BitsError::MissingDeparture;
        assert_eq!(err.to_string(), "criterion carries no departure time");
    }
}
