use chrono::{DateTime, Utc};

use ember_types::DropId;

use crate::record::DropRecord;

/// Concurrent map from drop ids to sealed records.
///
/// All implementations must satisfy these invariants:
/// - `insert` allocates an id the caller cannot predict and is atomic from
///   the perspective of concurrent readers: a record is either fully
///   visible or not visible at all.
/// - `consume` is an atomic check-and-remove. When N callers race on the
///   same id, exactly one receives the record and the rest get `None`.
///   There is no observable window where two callers both hold it.
/// - `delete` is idempotent; removing an absent id is not an error.
/// - `evict_expired` removes only records whose expiry is at or before
///   `now`; records without an expiry are never time-evicted.
/// - No method blocks on anything slower than the map itself. Key
///   stretching and blob I/O happen outside the store.
pub trait DropStore: Send + Sync {
    /// Store a record under a freshly allocated random id and return the
    /// id. On the vanishingly unlikely id collision, a new id is drawn.
    fn insert(&self, record: DropRecord) -> DropId;

    /// Non-destructive read. Does not apply expiry; the vault does.
    fn lookup(&self, id: &DropId) -> Option<DropRecord>;

    /// Atomically remove and return the record, if present.
    fn consume(&self, id: &DropId) -> Option<DropRecord>;

    /// Remove the record if present. Returns `true` if it existed.
    fn delete(&self, id: &DropId) -> bool;

    /// Remove and return every record expired at `now`.
    fn evict_expired(&self, now: DateTime<Utc>) -> Vec<(DropId, DropRecord)>;

    /// Number of live records (diagnostics).
    fn len(&self) -> usize;

    /// Returns `true` if the store holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
