//! Walking transfers between stations.
//!
//! Records are grouped by the station they arrive at, so the router can find
//! every station that reaches a given one on foot with one range lookup.

use crate::bits::PackedRange;
use crate::domain::StationId;

use super::{TimetableError, Transfer};

/// Transfer records sorted by arrival station, then departure station.
#[derive(Debug, Clone, Default)]
pub struct Transfers {
    records: Vec<Transfer>,
    /// Range of `records` arriving at each station.
    by_arrival: Vec<PackedRange>,
}

impl Transfers {
    /// Returns the range of record indices arriving at `station`.
    ///
    /// # Errors
    ///
    /// Returns [`TimetableError::StationOutOfRange`] for an unknown station.
    pub fn arriving_at(&self, station: StationId) -> Result<PackedRange, TimetableError> {
        self.by_arrival
            .get(station.index())
            .copied()
            .ok_or(TimetableError::StationOutOfRange(station))
    }

    /// Returns the record at `index`.
    pub fn record(&self, index: usize) -> Result<&Transfer, TimetableError> {
        self.records
            .get(index)
            .ok_or(TimetableError::TransferOutOfRange(index))
    }

    /// Returns the records arriving at `station`.
    pub fn arriving(&self, station: StationId) -> Result<&[Transfer], TimetableError> {
        let range = self.arriving_at(station)?;
        Ok(&self.records[range.indices()])
    }

    /// Walking minutes from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`TimetableError::TransferNotFound`] if no record connects the
    /// pair, which callers treat as "no such option".
    pub fn minutes_between(&self, from: StationId, to: StationId) -> Result<u16, TimetableError> {
        let records = self.arriving(to)?;
        records
            .binary_search_by_key(&from, |t| t.from)
            .map(|i| records[i].minutes)
            .map_err(|_| TimetableError::TransferNotFound { from, to })
    }

    /// Returns all records in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &Transfer> {
        self.records.iter()
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Builder for [`Transfers`].
#[derive(Debug, Default)]
pub struct TransfersBuilder {
    records: Vec<Transfer>,
}

impl TransfersBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a one-way transfer.
    pub fn add(mut self, from: StationId, to: StationId, minutes: u16) -> Self {
        self.records.push(Transfer { from, to, minutes });
        self
    }

    /// Add a transfer in both directions with the same duration.
    pub fn add_both_ways(self, a: StationId, b: StationId, minutes: u16) -> Self {
        let builder = self.add(a, b, minutes);
        if a == b {
            builder
        } else {
            builder.add(b, a, minutes)
        }
    }

    /// Index the records for `station_count` stations.
    ///
    /// Duplicate pairs keep the shortest duration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a record names a station outside `station_count`, or
    /// if more than 255 records arrive at one station.
    pub fn build(mut self, station_count: usize) -> Result<Transfers, TimetableError> {
        for record in &self.records {
            for station in [record.from, record.to] {
                if station.index() >= station_count {
                    return Err(TimetableError::StationOutOfRange(station));
                }
            }
        }

        self.records.sort_by_key(|t| (t.to, t.from, t.minutes));
        self.records.dedup_by_key(|t| (t.to, t.from));

        let mut by_arrival = Vec::with_capacity(station_count);
        let mut start = 0;
        for station in 0..station_count {
            let end = start
                + self.records[start..]
                    .iter()
                    .take_while(|t| t.to.index() == station)
                    .count();
            by_arrival.push(PackedRange::new(start, end)?);
            start = end;
        }

        Ok(Transfers {
            records: self.records,
            by_arrival,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transfers {
        TransfersBuilder::new()
            .add_both_ways(StationId(0), StationId(1), 5)
            .add(StationId(2), StationId(1), 7)
            .add(StationId(1), StationId(1), 3)
            .build(3)
            .unwrap()
    }

    #[test]
    fn empty_transfers() {
        let transfers = TransfersBuilder::new().build(2).unwrap();
        assert!(transfers.is_empty());
        assert!(transfers.arriving_at(StationId(1)).unwrap().is_empty());
        assert!(transfers.minutes_between(StationId(0), StationId(1)).is_err());
    }

    #[test]
    fn grouped_by_arrival() {
        let transfers = sample();
        assert_eq!(transfers.len(), 4);

        let into_one = transfers.arriving(StationId(1)).unwrap();
        let from: Vec<_> = into_one.iter().map(|t| t.from).collect();
        assert_eq!(from, vec![StationId(0), StationId(1), StationId(2)]);

        let range = transfers.arriving_at(StationId(0)).unwrap();
        assert_eq!(range.len(), 1);
        assert_eq!(transfers.record(range.start()).unwrap().from, StationId(1));

        assert!(transfers.arriving_at(StationId(2)).unwrap().is_empty());
    }

    #[test]
    fn minutes_between_lookup() {
        let transfers = sample();
        assert_eq!(transfers.minutes_between(StationId(0), StationId(1)).unwrap(), 5);
        assert_eq!(transfers.minutes_between(StationId(1), StationId(0)).unwrap(), 5);
        assert_eq!(transfers.minutes_between(StationId(2), StationId(1)).unwrap(), 7);
        assert_eq!(transfers.minutes_between(StationId(1), StationId(1)).unwrap(), 3);

        let err = transfers
            .minutes_between(StationId(1), StationId(2))
            .unwrap_err();
        assert!(err.is_transfer_not_found());
    }

    #[test]
    fn duplicates_keep_shortest() {
        let transfers = TransfersBuilder::new()
            .add(StationId(0), StationId(1), 9)
            .add(StationId(0), StationId(1), 4)
            .build(2)
            .unwrap();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers.minutes_between(StationId(0), StationId(1)).unwrap(), 4);
    }

    #[test]
    fn unknown_station_rejected() {
        let result = TransfersBuilder::new()
            .add(StationId(0), StationId(5), 1)
            .build(2);
        assert!(matches!(
            result,
            Err(TimetableError::StationOutOfRange(StationId(5)))
        ));

        assert!(sample().arriving_at(StationId(3)).is_err());
        assert!(sample().record(99).is_err());
    }

    #[test]
    fn too_many_into_one_station() {
        let mut builder = TransfersBuilder::new();
        for from in 0..256 {
            builder = builder.add(StationId(from), StationId(256), 1);
        }
        assert!(matches!(
            builder.build(257),
            Err(TimetableError::Bits(_))
        ));
    }
}
