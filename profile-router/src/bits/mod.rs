//! Fixed-width bit-packing codecs.
//!
//! Three layouts live here: a generic 24/8 split of a 32-bit word, a
//! half-open index range built on that split, and the 64-bit optimization
//! criterion whose raw numeric order realizes Pareto dominance.

mod criterion;
mod error;
mod range;
mod split;

pub use criterion::{MAX_CHANGES, MAX_MINUTES, MIN_MINUTES, PackedCriterion};
pub use error::BitsError;
pub use range::PackedRange;
pub use split::Word24x8;
