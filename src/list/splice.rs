// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Splice helpers shared by the update and patch paths.

use crate::error::ListError;
use crate::error::Result;
use crate::id::Identifier;

use super::ChangeEntry;
use super::ListMetadata;
use super::Splice;

/// Check every splice against the length the list will have when it is
/// reached, without touching anything.
pub(crate) fn check_splices<T>(splices: &[Splice<T>], len: usize) -> Result<()> {
    let mut len = len;
    for (i, splice) in splices.iter().enumerate() {
        if splice.index > len {
            return Err(ListError::IndexOutOfBounds {
                splice: i,
                index: splice.index,
                len,
            });
        }
        if splice.remove > len - splice.index {
            return Err(ListError::RemoveOutOfBounds {
                splice: i,
                index: splice.index,
                remove: splice.remove,
                len,
            });
        }
        len = len - splice.remove + splice.values.len();
    }
    return Ok(());
}

/// Replace `remove` items at `index` with `inserted`, returning the removed
/// items. Bounds must already be checked.
pub(crate) fn splice_vec<T>(target: &mut Vec<T>, index: usize, remove: usize, inserted: Vec<T>) -> Vec<T> {
    return target.splice(index..index + remove, inserted).collect();
}

/// Collects what a single patch entry did to the local list so it can be
/// reported as one change entry.
pub(crate) struct EntryDiff<T> {
    /// Removed identifiers with the local index and value they had.
    removed: Vec<(Identifier, usize, T)>,
    /// Identifiers that were actually inserted.
    inserted: Vec<Identifier>,
}

impl<T: Clone> EntryDiff<T> {
    pub(crate) fn new() -> EntryDiff<T> {
        return EntryDiff {
            removed: Vec::new(),
            inserted: Vec::new(),
        };
    }

    pub(crate) fn removed(&mut self, id: Identifier, index: usize, item: T) {
        self.removed.push((id, index, item));
    }

    pub(crate) fn inserted(&mut self, id: Identifier) {
        self.inserted.push(id);
    }

    /// Turn the collected effects into a change entry, or `None` when the
    /// entry changed nothing locally.
    ///
    /// The index is the lowest position touched. Removed and inserted values
    /// are reported in list order.
    pub(crate) fn finish(self, metadata: &ListMetadata, value: &[T]) -> Option<ChangeEntry<T>> {
        if self.removed.is_empty() && self.inserted.is_empty() {
            return None;
        }

        let mut removed = self.removed;
        removed.sort_by(|a, b| a.0.cmp(&b.0));

        let mut positions: Vec<usize> = self
            .inserted
            .iter()
            .filter_map(|id| metadata.locate(id).ok())
            .collect();
        positions.sort_unstable();

        let index = removed
            .iter()
            .map(|(_, index, _)| *index)
            .chain(positions.first().copied())
            .min()
            .unwrap_or(0);

        return Some(ChangeEntry {
            index,
            removed: removed.into_iter().map(|(_, _, item)| item).collect(),
            inserted: positions.iter().filter_map(|&i| value.get(i).cloned()).collect(),
        });
    }
}
