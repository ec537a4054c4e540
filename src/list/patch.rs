// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Reconciling patches from this or other replicas.
//!
//! Patches name elements by identifier, never by index, so they can be
//! replayed against a list that has diverged from the one they were authored
//! on. Each entry is handled in two halves:
//!
//! 1. Removals. A live identifier is removed and buried. An identifier we
//!    have never seen is buried anyway, so that its insertion, when it
//!    finally arrives, is suppressed.
//! 2. Insertions. Buried identifiers are skipped for good and live ones are
//!    skipped as duplicates. Everything else goes to the position its
//!    identifier sorts to among the live ids.
//!
//! Together these make reconciliation commutative in delivery order and
//! idempotent under redelivery. Nothing here can fail: references that
//! cannot be resolved are absorbed.

use tracing::debug;
use tracing::trace;
use tracing::warn;

use crate::field::PatchResult;

use super::ChangeEntry;
use super::ListMetadata;
use super::ListPatchResult;
use super::PatchEntry;
use super::splice::EntryDiff;

/// Reconcile `patch` against `previous` and its metadata.
///
/// Returns the new value and one change entry per patch entry that had a
/// local effect. Entries that change nothing (duplicates, insertions of
/// buried ids, removals of unknown ids) emit no change entry, so
/// `change.len()` can be smaller than `patch.len()` and the two must not be
/// paired by position.
///
/// Insertions whose identifier is empty or has a position above
/// [`MAX_POSITION`](crate::id::MAX_POSITION) are dropped with a warning.
pub fn apply_patch<T: Clone>(previous: &[T], metadata: &mut ListMetadata, patch: &[PatchEntry<T>]) -> ListPatchResult<T> {
    if previous.len() != metadata.len() {
        warn!(
            values = previous.len(),
            ids = metadata.len(),
            "list value and metadata disagree on length"
        );
    }
    debug!(entries = patch.len(), len = previous.len(), "applying list patch");

    let mut value = previous.to_vec();
    let mut change = Vec::new();
    for entry in patch {
        if let Some(entry_change) = reconcile(&mut value, metadata, entry) {
            change.push(entry_change);
        }
    }

    return PatchResult { value, change };
}

/// Apply one patch entry in place.
fn reconcile<T: Clone>(value: &mut Vec<T>, metadata: &mut ListMetadata, entry: &PatchEntry<T>) -> Option<ChangeEntry<T>> {
    let mut diff = EntryDiff::new();

    for id in &entry.removed_ids {
        match metadata.locate(id) {
            Ok(index) => {
                let id = metadata.ids_mut().remove(index);
                if index < value.len() {
                    diff.removed(id.clone(), index, value.remove(index));
                }
                metadata.bury(id);
            }
            Err(_) => {
                trace!(%id, "burying identifier ahead of its insertion");
                metadata.bury(id.clone());
            }
        }
    }

    if entry.inserted_ids.len() != entry.inserted_values.len() {
        warn!(
            ids = entry.inserted_ids.len(),
            values = entry.inserted_values.len(),
            "patch entry has mismatched insertions"
        );
    }

    for (id, item) in entry.inserted_ids.iter().zip(&entry.inserted_values) {
        // A malformed id would break the sort order allocation relies on.
        if let Err(error) = id.validate() {
            warn!(%id, %error, "dropping insertion with a malformed identifier");
            continue;
        }
        if metadata.is_buried(id) {
            trace!(%id, "suppressing insertion of a removed identifier");
            continue;
        }
        let Err(index) = metadata.locate(id) else {
            trace!(%id, "identifier already present");
            continue;
        };
        metadata.ids_mut().insert(index, id.clone());
        value.insert(index.min(value.len()), item.clone());
        diff.inserted(id.clone());
    }

    return diff.finish(metadata, value);
}
