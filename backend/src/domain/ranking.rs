//! Movement indicators for ranked lists.
//!
//! Two comparison strategies exist on purpose: standings compare a row's
//! index against a full previous-snapshot row set, while goal scorers
//! compare a scalar count against a per-player snapshot field.

use std::cmp::Ordering;

use shared::RankDelta;

/// Per-row movement for `current`, comparing each row's index against its
/// index in `previous`. Rows whose key is absent from `previous` get no
/// indicator (first-time appearance).
pub fn position_deltas<T, K, F>(current: &[T], previous: &[T], key: F) -> Vec<Option<RankDelta>>
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    current
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let item_key = key(item);
            previous
                .iter()
                .position(|prev| key(prev) == item_key)
                .map(|prev_index| match prev_index.cmp(&index) {
                    Ordering::Greater => RankDelta::Up,
                    Ordering::Less => RankDelta::Down,
                    Ordering::Equal => RankDelta::Same,
                })
        })
        .collect()
}

/// Scalar-count movement: current count against the snapshot taken at the
/// last update. No snapshot, no indicator.
pub fn count_delta(current: u32, previous: Option<u32>) -> Option<RankDelta> {
    previous.map(|previous| match current.cmp(&previous) {
        Ordering::Greater => RankDelta::Up,
        Ordering::Less => RankDelta::Down,
        Ordering::Equal => RankDelta::Same,
    })
}
