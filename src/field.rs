// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! The contract shared by every replicated field kind.
//!
//! A record or table layer holds many fields of different kinds (lists,
//! registers, maps) and drives them all through the same [`Field`] trait:
//! local edits go through [`Field::apply_update`], which yields a value for
//! readers, a change for observers and a patch for other replicas; remote
//! patches go through [`Field::apply_patch`]. Each kind brings its own
//! reconciliation algorithm behind the trait.

use serde::Deserialize;
use serde::Serialize;

use crate::id::AllocatorConfig;

/// Options shared by all field kinds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOptions {
    /// Human readable description of the field.
    pub description: String,
    /// Identifier allocation tuning, used by fields that allocate ids.
    pub allocator: AllocatorConfig,
}

impl FieldOptions {
    /// Options with the given description and default tuning.
    pub fn described(description: impl Into<String>) -> FieldOptions {
        return FieldOptions {
            description: description.into(),
            allocator: AllocatorConfig::default(),
        };
    }
}

/// Arguments for [`Field::apply_update`].
#[derive(Debug)]
pub struct UpdateArgs<'a, V, U, M> {
    /// The value before the update.
    pub previous: &'a V,
    /// The local edit.
    pub update: U,
    /// The field's replicated state, mutated in place.
    pub metadata: &'a mut M,
    /// Version of the transaction authoring the edit.
    pub version: u64,
    /// Store authoring the edit.
    pub store_id: u32,
}

/// Arguments for [`Field::apply_patch`].
#[derive(Debug)]
pub struct PatchArgs<'a, V, P, M> {
    /// The value before the patch.
    pub previous: &'a V,
    /// The field's replicated state, mutated in place.
    pub metadata: &'a mut M,
    /// The patch to reconcile.
    pub patch: &'a P,
}

/// Outcome of a local update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateResult<V, C, P> {
    /// The new value.
    pub value: V,
    /// What changed, for local observers.
    pub change: C,
    /// What changed, for other replicas.
    pub patch: P,
}

/// Outcome of reconciling a patch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatchResult<V, C> {
    /// The new value.
    pub value: V,
    /// What changed locally, for observers.
    pub change: C,
}

/// A replicated field kind.
pub trait Field {
    /// What readers see.
    type Value;
    /// A local edit intent.
    type Update;
    /// Replicated state kept next to the value.
    type Metadata;
    /// Consumer facing edit record.
    type Change;
    /// Replica facing edit record.
    type Patch;
    /// Error raised by invalid local updates.
    type Error: std::error::Error;

    /// Constant tag naming the field kind.
    fn field_type(&self) -> &'static str;

    /// Human readable description of the field.
    fn description(&self) -> &str;

    /// The initial value of the field.
    fn create_value(&self) -> Self::Value;

    /// The initial metadata of the field.
    fn create_metadata(&self) -> Self::Metadata;

    /// Apply a local edit. Fails without touching the metadata when the
    /// edit does not fit the previous value.
    fn apply_update(
        &self,
        args: UpdateArgs<'_, Self::Value, Self::Update, Self::Metadata>,
    ) -> Result<UpdateResult<Self::Value, Self::Change, Self::Patch>, Self::Error>;

    /// Reconcile a patch from this or another replica. Never fails.
    ///
    /// The change only describes edits that had a local effect, so it need
    /// not have one entry per patch entry.
    fn apply_patch(
        &self,
        args: PatchArgs<'_, Self::Value, Self::Patch, Self::Metadata>,
    ) -> PatchResult<Self::Value, Self::Change>;

    /// Concatenate two successive changes.
    fn merge_change(&self, first: Self::Change, second: Self::Change) -> Self::Change;

    /// Concatenate two successive patches.
    fn merge_patch(&self, first: Self::Patch, second: Self::Patch) -> Self::Patch;
}
