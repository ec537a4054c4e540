// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Turning local splices into a new value, a change and a patch.

use tracing::debug;
use tracing::trace;

use crate::error::ListError;
use crate::error::Result;
use crate::field::UpdateResult;
use crate::id::Allocator;
use crate::id::Identifier;

use super::ChangeEntry;
use super::ListMetadata;
use super::ListUpdate;
use super::ListUpdateResult;
use super::PatchEntry;
use super::Splice;
use super::splice;

/// Apply a local update authored at `version` by `store_id`.
///
/// Splices are applied in order, each against the result of the previous
/// one, and produce one change entry and one patch entry apiece. The whole
/// update is validated first: on error the metadata is left untouched.
pub fn apply_update<T: Clone>(
    allocator: &Allocator,
    previous: &[T],
    update: ListUpdate<T>,
    metadata: &mut ListMetadata,
    version: u64,
    store_id: u32,
) -> Result<ListUpdateResult<T>> {
    if previous.len() != metadata.len() {
        return Err(ListError::LengthMismatch {
            values: previous.len(),
            ids: metadata.len(),
        });
    }

    let splices = update.into_splices();
    splice::check_splices(&splices, previous.len())?;
    debug!(
        splices = splices.len(),
        len = previous.len(),
        version,
        store_id,
        "applying list update"
    );

    let mut value = previous.to_vec();
    let mut change = Vec::with_capacity(splices.len());
    let mut patch = Vec::with_capacity(splices.len());

    for Splice {
        index,
        remove,
        values,
    } in splices
    {
        let removed_values = splice::splice_vec(&mut value, index, remove, values.clone());
        let removed_ids = splice::splice_vec(metadata.ids_mut(), index, remove, Vec::new());
        for id in &removed_ids {
            metadata.bury(id.clone());
        }

        let inserted_ids = fresh_ids(allocator, metadata, index, values.len(), version, store_id);
        splice::splice_vec(metadata.ids_mut(), index, 0, inserted_ids.clone());

        change.push(ChangeEntry {
            index,
            removed: removed_values.clone(),
            inserted: values.clone(),
        });
        patch.push(PatchEntry {
            removed_ids,
            removed_values,
            inserted_ids,
            inserted_values: values,
        });
    }

    return Ok(UpdateResult {
        value,
        change,
        patch,
    });
}

/// Allocate `count` identifiers for an insertion at `index`.
///
/// Within one update the same version may allocate into a gap twice, and
/// could land on an identifier an earlier splice just buried. Such
/// candidates are skipped by allocating again above them.
fn fresh_ids(
    allocator: &Allocator,
    metadata: &ListMetadata,
    index: usize,
    count: usize,
    version: u64,
    store_id: u32,
) -> Vec<Identifier> {
    let ids = metadata.ids();
    let upper = ids.get(index);
    let mut fresh: Vec<Identifier> = Vec::with_capacity(count);

    for _ in 0..count {
        let lower = fresh
            .last()
            .or_else(|| index.checked_sub(1).and_then(|i| ids.get(i)));
        let mut id = allocator.between(version, store_id, lower, upper);
        while metadata.is_buried(&id) {
            trace!(%id, "skipping buried identifier");
            id = allocator.between(version, store_id, Some(&id), upper);
        }
        fresh.push(id);
    }

    return fresh;
}
