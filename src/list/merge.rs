// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Batching successive changes and patches.
//!
//! Merging is plain concatenation: entries are replayed in order, so no
//! coalescing is needed for the result to mean the same thing.

use super::ListChange;
use super::ListPatch;

/// `first` followed by `second`.
pub fn merge_change<T>(first: ListChange<T>, second: ListChange<T>) -> ListChange<T> {
    let mut merged = first;
    merged.extend(second);
    return merged;
}

/// `first` followed by `second`.
pub fn merge_patch<T>(first: ListPatch<T>, second: ListPatch<T>) -> ListPatch<T> {
    let mut merged = first;
    merged.extend(second);
    return merged;
}
