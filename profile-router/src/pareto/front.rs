//! Front storage and the incremental builder.

use std::fmt;
use std::slice::Iter as SliceIter;

use crate::bits::{BitsError, PackedCriterion};

/// Error from looking up a tuple in a front.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrontError {
    /// No tuple with the requested arrival and change count
    #[error("no tuple arriving at minute {arrival} with {changes} changes")]
    NotFound { arrival: i32, changes: u32 },
}

/// An immutable Pareto front.
///
/// Tuples are strictly ascending by their payload-free raw value and no
/// tuple dominates another.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ParetoFront {
    elements: Box<[PackedCriterion]>,
}

impl ParetoFront {
    /// Create an empty front.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the number of tuples.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the front holds no tuple.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the tuples in ascending order.
    pub fn iter(&self) -> SliceIter<'_, PackedCriterion> {
        self.elements.iter()
    }

    /// Visit every tuple in ascending order.
    pub fn for_each<F: FnMut(PackedCriterion)>(&self, visitor: F) {
        self.elements.iter().copied().for_each(visitor);
    }

    /// Find the tuple with the given arrival and change count, whatever its
    /// departure and payload.
    ///
    /// # Errors
    ///
    /// Returns [`FrontError::NotFound`] if there is none.
    pub fn get(&self, arrival: i32, changes: u32) -> Result<PackedCriterion, FrontError> {
        self.elements
            .iter()
            .copied()
            .find(|c| c.arrival() == arrival && c.changes() == changes)
            .ok_or(FrontError::NotFound { arrival, changes })
    }
}

impl<'a> IntoIterator for &'a ParetoFront {
    type Item = &'a PackedCriterion;
    type IntoIter = SliceIter<'a, PackedCriterion>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for ParetoFront {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.elements.iter()).finish()
    }
}

/// Builds a [`ParetoFront`] one tuple at a time.
///
/// The builder upholds the front invariant after every call. All tuples it
/// holds must agree on whether they carry a departure time.
///
/// # Examples
///
/// ```
/// use profile_router::bits::PackedCriterion;
/// use profile_router::pareto::FrontBuilder;
///
/// let mut builder = FrontBuilder::new();
/// builder
///     .add(PackedCriterion::pack(540, 2, 0).unwrap())
///     .add(PackedCriterion::pack(600, 5, 0).unwrap());
///
/// let front = builder.build();
/// assert_eq!(front.len(), 1);
/// assert_eq!(front.get(540, 2).unwrap().arrival(), 540);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FrontBuilder {
    elements: Vec<PackedCriterion>,
}

impl FrontBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder holding the tuples of a finished front.
    pub fn from_front(front: &ParetoFront) -> Self {
        Self {
            elements: front.elements.to_vec(),
        }
    }

    /// Returns the number of tuples.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the builder holds no tuple.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Remove every tuple.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Returns the tuples in ascending order.
    pub fn iter(&self) -> SliceIter<'_, PackedCriterion> {
        self.elements.iter()
    }

    /// Visit every tuple in ascending order.
    pub fn for_each<F: FnMut(PackedCriterion)>(&self, visitor: F) {
        self.elements.iter().copied().for_each(visitor);
    }

    /// Insert a tuple unless an existing one dominates or equals it, dropping
    /// every existing tuple it dominates.
    ///
    /// When two tuples differ only by payload, whichever was added first
    /// survives.
    pub fn add(&mut self, candidate: PackedCriterion) -> &mut Self {
        self.insert(candidate);
        self
    }

    /// Like [`add`](Self::add), returning whether the candidate was kept.
    pub fn insert(&mut self, candidate: PackedCriterion) -> bool {
        let key = candidate.without_payload();

        // Only tuples whose key does not exceed the candidate's can dominate it.
        let mut position = 0;
        while position < self.elements.len() && self.elements[position].without_payload() <= key {
            if self.elements[position].dominates_or_equal(candidate) {
                return false;
            }
            position += 1;
        }

        // Shift the survivors right by one slot, dropping dominated ones as we go.
        let mut carry = candidate;
        let mut write = position;
        for read in position..self.elements.len() {
            let current = self.elements[read];
            if candidate.dominates_or_equal(current) {
                continue;
            }
            self.elements[write] = carry;
            carry = current;
            write += 1;
        }

        if write < self.elements.len() {
            self.elements[write] = carry;
            self.elements.truncate(write + 1);
        } else {
            self.elements.push(carry);
        }
        true
    }

    /// Add every tuple of `other`, in its order.
    pub fn merge(&mut self, other: &FrontBuilder) -> &mut Self {
        for &tuple in &other.elements {
            self.add(tuple);
        }
        self
    }

    /// Returns true if every tuple of `other`, once given `departure` as its
    /// departure time, is dominated or equalled by a tuple of `self`.
    ///
    /// An empty `other` is fully dominated.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `departure` is not a representable minute.
    pub fn fully_dominates(&self, other: &FrontBuilder, departure: i32) -> Result<bool, BitsError> {
        for &tuple in &other.elements {
            let stamped = tuple.with_departure(departure)?;
            let key = stamped.without_payload();
            let dominated = self
                .elements
                .iter()
                .take_while(|e| e.without_payload() <= key)
                .any(|e| e.dominates_or_equal(stamped));
            if !dominated {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Snapshot the current tuples as an exactly sized front.
    ///
    /// The builder is left untouched and stays usable.
    pub fn build(&self) -> ParetoFront {
        ParetoFront {
            elements: self.elements.clone().into_boxed_slice(),
        }
    }
}

impl Extend<PackedCriterion> for FrontBuilder {
    fn extend<I: IntoIterator<Item = PackedCriterion>>(&mut self, iter: I) {
        for tuple in iter {
            self.add(tuple);
        }
    }
}

impl FromIterator<PackedCriterion> for FrontBuilder {
    fn from_iter<I: IntoIterator<Item = PackedCriterion>>(iter: I) -> Self {
        let mut builder = Self::new();
        builder.extend(iter);
        builder
    }
}

impl<'a> IntoIterator for &'a FrontBuilder {
    type Item = &'a PackedCriterion;
    type IntoIter = SliceIter<'a, PackedCriterion>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn tuples() -> impl Strategy<Value = Vec<PackedCriterion>> {
        prop::collection::vec(
            (400i32..700, 0u32..6, 600i32..900).prop_map(|(dep, changes, arr)| {
                PackedCriterion::pack(arr, changes, 0)
                    .unwrap()
                    .with_departure(dep)
                    .unwrap()
            }),
            0..40,
        )
    }

    fn keys(front: &ParetoFront) -> BTreeSet<PackedCriterion> {
        front.iter().map(|c| c.without_payload()).collect()
    }

    proptest! {
        /// No tuple of a built front dominates another
        #[test]
        fn minimal(input in tuples()) {
            let front = FrontBuilder::from_iter(input).build();
            for (i, a) in front.iter().enumerate() {
                for (j, b) in front.iter().enumerate() {
                    if i != j {
                        prop_assert!(!a.dominates_or_equal(*b));
                    }
                }
            }
        }

        /// The front is strictly ascending
        #[test]
        fn sorted(input in tuples()) {
            let front = FrontBuilder::from_iter(input).build();
            let raw: Vec<_> = front.iter().map(|c| c.without_payload()).collect();
            prop_assert!(raw.windows(2).all(|w| w[0] < w[1]));
        }

        /// Every input tuple is dominated or equalled by some front tuple
        #[test]
        fn covers_input(input in tuples()) {
            let front = FrontBuilder::from_iter(input.clone()).build();
            for tuple in input {
                prop_assert!(front.iter().any(|c| c.dominates_or_equal(tuple)));
            }
        }

        /// Insertion order does not change the final set
        #[test]
        fn order_independent(
            (input, shuffled) in tuples().prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
        ) {
            let a = FrontBuilder::from_iter(input).build();
            let b = FrontBuilder::from_iter(shuffled).build();
            prop_assert_eq!(keys(&a), keys(&b));
        }

        /// Merging is associative as a set
        #[test]
        fn merge_associative(a in tuples(), b in tuples(), c in tuples()) {
            let a = FrontBuilder::from_iter(a);
            let b = FrontBuilder::from_iter(b);
            let c = FrontBuilder::from_iter(c);

            let mut left = a.clone();
            left.merge(&b);
            left.merge(&c);

            let mut bc = b.clone();
            bc.merge(&c);
            let mut right = a.clone();
            right.merge(&bc);

            prop_assert_eq!(keys(&left.build()), keys(&right.build()));
        }

        /// A front fully dominates its own tuples at their departure
        #[test]
        fn fully_dominates_itself(input in tuples(), dep in 400i32..700) {
            let stamped: FrontBuilder = input
                .iter()
                .map(|c| c.with_departure(dep).unwrap())
                .collect();
            let bare: FrontBuilder = input.iter().map(|c| c.without_departure()).collect();
            prop_assert!(stamped.fully_dominates(&bare, dep).unwrap());
        }
    }
}
