//! Snapshot signatures
//!
//! A stable fingerprint of a cart snapshot, so callers can skip reallocation
//! when nothing relevant changed. The engine itself never consults
//! signatures; comparing them is caller policy.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;
use smallvec::SmallVec;

use crate::items::LineItem;

/// Opaque comparable fingerprint of a cart snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnapshotSignature(u64);

/// Compute the fingerprint of a snapshot.
///
/// Deterministic over `(id, quantity, unit_price)` for every item and
/// independent of input ordering: items are sorted by id before combination,
/// so two snapshots holding the same multiset of items always agree.
pub fn compute_signature(items: &[LineItem]) -> SnapshotSignature {
    let mut ordered: SmallVec<[&LineItem; 16]> = items.iter().collect();
    ordered.sort_by(|a, b| a.id().cmp(b.id()));

    let mut hasher = FxHasher::default();
    ordered.len().hash(&mut hasher);

    for item in ordered {
        item.id().hash(&mut hasher);
        item.quantity().hash(&mut hasher);
        item.unit_price().hash(&mut hasher);
    }

    SnapshotSignature(hasher.finish())
}
