//! Contact detection: pair enumeration, overlap tests, and the per-step contact list.

pub mod contact;
pub mod detector;
pub mod pairs;

pub use contact::{Contact, ContactBuffer};
pub use detector::ContactDetector;
pub use pairs::{pair_at, pair_index, pairs, size_triangular_matrix, PairIter};
