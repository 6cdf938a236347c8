//! Payload codec linking front tuples back to connections.

use std::fmt;

use crate::bits::{BitsError, Word24x8};
use crate::domain::ConnectionId;

/// Where a tuple's ride starts or ends, stored in the 32-bit payload.
///
/// Trip-front tuples point at the connection to alight from. Station-front
/// tuples point at the connection to board and count the further hops to
/// ride, so `connection` plus `hops` names the whole ride.
///
/// # Examples
///
/// ```
/// use profile_router::domain::ConnectionId;
/// use profile_router::router::Backpointer;
///
/// let pointer = Backpointer::board(ConnectionId(1200), 3);
/// let payload = pointer.encode().unwrap();
/// assert_eq!(Backpointer::decode(payload), pointer);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Backpointer {
    pub connection: ConnectionId,
    /// Hops ridden after `connection`
    pub hops: u32,
}

impl Backpointer {
    /// Pointer to the connection a ride ends with.
    pub fn alight(connection: ConnectionId) -> Self {
        Self {
            connection,
            hops: 0,
        }
    }

    /// Pointer to the connection a ride starts with, followed by `hops` more.
    pub fn board(connection: ConnectionId, hops: u32) -> Self {
        Self { connection, hops }
    }

    /// Pack into a payload.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the connection id needs more than 24 bits or the hop
    /// count more than 8.
    pub fn encode(self) -> Result<u32, BitsError> {
        let connection = u32::try_from(self.connection.index()).map_err(|_| {
            BitsError::FieldOverflow {
                field: "connection",
                value: self.connection.index() as u64,
                bits: 24,
            }
        })?;
        Ok(Word24x8::pack(connection, self.hops)?.raw())
    }

    /// Unpack a payload produced by [`encode`](Self::encode).
    pub fn decode(payload: u32) -> Self {
        let word = Word24x8::from_raw(payload);
        Self {
            connection: ConnectionId(word.high() as usize),
            hops: word.low(),
        }
    }
}

impl fmt::Debug for Backpointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Backpointer({}+{})", self.connection, self.hops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alight_has_no_hops() {
        let pointer = Backpointer::alight(ConnectionId(5));
        assert_eq!(pointer.hops, 0);
        assert_eq!(pointer.encode().unwrap(), 5 << 8);
    }

    #[test]
    fn rejects_wide_fields() {
        assert!(Backpointer::board(ConnectionId(1 << 24), 0).encode().is_err());
        assert!(Backpointer::board(ConnectionId(0), 256).encode().is_err());
        assert!(Backpointer::board(ConnectionId((1 << 24) - 1), 255).encode().is_ok());
    }

    #[test]
    fn debug() {
        let pointer = Backpointer::board(ConnectionId(9), 2);
        assert_eq!(format!("{:?}", pointer), "Backpointer(9+2)");
    }
}
