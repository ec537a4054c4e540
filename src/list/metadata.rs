// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Replicated state kept alongside a list value.

use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde::Serialize;

use crate::id::Identifier;

/// Per-field replicated state.
///
/// `ids[i]` identifies `value[i]` of the value this metadata belongs to, and
/// `ids` is always sorted. The cemetery records every identifier that has
/// ever been removed along with how many removals were observed for it.
/// An identifier is never both live and buried.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMetadata {
    ids: Vec<Identifier>,
    #[serde(with = "cemetery_entries")]
    cemetery: FxHashMap<Identifier, u32>,
}

impl ListMetadata {
    /// Create empty metadata.
    pub fn new() -> ListMetadata {
        return ListMetadata {
            ids: Vec::new(),
            cemetery: FxHashMap::default(),
        };
    }

    /// Live identifiers in list order.
    pub fn ids(&self) -> &[Identifier] {
        return &self.ids;
    }

    /// The tombstone ledger.
    pub fn cemetery(&self) -> &FxHashMap<Identifier, u32> {
        return &self.cemetery;
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        return self.ids.len();
    }

    /// Whether no element is live.
    pub fn is_empty(&self) -> bool {
        return self.ids.is_empty();
    }

    /// Locate `id` among the live identifiers.
    ///
    /// `Ok` holds its index, `Err` the index it would be inserted at.
    pub fn locate(&self, id: &Identifier) -> Result<usize, usize> {
        return self.ids.binary_search(id);
    }

    /// Whether `id` has been removed at some point.
    pub fn is_buried(&self, id: &Identifier) -> bool {
        return self.cemetery.contains_key(id);
    }

    /// Record a removal of `id`. Repeated removals bump the count.
    pub(crate) fn bury(&mut self, id: Identifier) {
        *self.cemetery.entry(id).or_insert(0) += 1;
    }

    pub(crate) fn ids_mut(&mut self) -> &mut Vec<Identifier> {
        return &mut self.ids;
    }
}

/// Identifiers are not strings, so the ledger is written as a sorted list
/// of `(id, count)` pairs rather than a map.
mod cemetery_entries {
    use rustc_hash::FxHashMap;
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;

    use crate::id::Identifier;

    pub fn serialize<S: Serializer>(
        cemetery: &FxHashMap<Identifier, u32>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<(&Identifier, &u32)> = cemetery.iter().collect();
        entries.sort();
        return serializer.collect_seq(entries);
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<FxHashMap<Identifier, u32>, D::Error> {
        let entries: Vec<(Identifier, u32)> = Vec::deserialize(deserializer)?;
        return Ok(entries.into_iter().collect());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::Allocator;

    #[test]
    fn new_metadata_is_empty() {
        let metadata = ListMetadata::new();
        assert!(metadata.is_empty());
        assert!(metadata.ids().is_empty());
        assert!(metadata.cemetery().is_empty());
        assert_eq!(metadata, ListMetadata::default());
    }

    #[test]
    fn bury_counts_removals() {
        let mut metadata = ListMetadata::new();
        let id = Allocator::default().allocate(1, 1, 1).remove(0);
        metadata.bury(id.clone());
        metadata.bury(id.clone());
        assert!(metadata.is_buried(&id));
        assert_eq!(metadata.cemetery().get(&id), Some(&2));
    }

    #[test]
    fn locate_uses_identifier_order() {
        let mut metadata = ListMetadata::new();
        let ids = Allocator::default().allocate(3, 1, 1);
        metadata.ids_mut().extend([ids[0].clone(), ids[2].clone()]);
        assert_eq!(metadata.locate(&ids[0]), Ok(0));
        assert_eq!(metadata.locate(&ids[1]), Err(1));
        assert_eq!(metadata.locate(&ids[2]), Ok(1));
    }

    #[test]
    fn serde_round_trip() {
        let mut metadata = ListMetadata::new();
        let ids = Allocator::default().allocate(2, 1, 1);
        metadata.ids_mut().push(ids[0].clone());
        metadata.bury(ids[1].clone());
        let json = serde_json::to_string(&metadata).unwrap();
        let back: ListMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, metadata);
    }
}
