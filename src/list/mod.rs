// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! The replicated list field.
//!
//! Every element of the list carries an [`Identifier`] kept in a sorted
//! sequence parallel to the value. Local edits are splices; they are turned
//! into patches that name elements by identifier, so a remote replica can
//! replay them against a list that has diverged in the meantime. Removed
//! identifiers are buried in a cemetery forever, which makes a deletion win
//! over an insertion that arrives after it.
//!
//! ```
//! use listfield::field::{Field, PatchArgs, UpdateArgs};
//! use listfield::list::{ListField, Splice};
//!
//! let field = ListField::<u32>::new();
//!
//! // Replica 1 authors an edit.
//! let mut ours = field.create_metadata();
//! let previous = field.create_value();
//! let result = field
//!     .apply_update(UpdateArgs {
//!         previous: &previous,
//!         update: Splice::insert(0, vec![1, 2, 3]).into(),
//!         metadata: &mut ours,
//!         version: 1,
//!         store_id: 1,
//!     })
//!     .unwrap();
//! assert_eq!(result.value, vec![1, 2, 3]);
//!
//! // Replica 2 receives the patch.
//! let mut theirs = field.create_metadata();
//! let patched = field.apply_patch(PatchArgs {
//!     previous: &field.create_value(),
//!     metadata: &mut theirs,
//!     patch: &result.patch,
//! });
//! assert_eq!(patched.value, vec![1, 2, 3]);
//! ```

pub mod merge;
pub mod metadata;
pub mod patch;
mod splice;
pub mod update;

use std::marker::PhantomData;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ListError;
use crate::field::Field;
use crate::field::FieldOptions;
use crate::field::PatchArgs;
use crate::field::PatchResult;
use crate::field::UpdateArgs;
use crate::field::UpdateResult;
use crate::id::Allocator;
use crate::id::Identifier;

pub use metadata::ListMetadata;

/// Type tag of the list field kind.
pub const LIST_TYPE: &str = "list";

/// Remove `remove` elements at `index`, then insert `values` there.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Splice<T> {
    pub index: usize,
    pub remove: usize,
    pub values: Vec<T>,
}

impl<T> Splice<T> {
    /// Create a splice.
    pub fn new(index: usize, remove: usize, values: Vec<T>) -> Splice<T> {
        return Splice {
            index,
            remove,
            values,
        };
    }

    /// Insert `values` at `index` without removing anything.
    pub fn insert(index: usize, values: Vec<T>) -> Splice<T> {
        return Splice::new(index, 0, values);
    }

    /// Remove `remove` elements at `index` without inserting anything.
    pub fn delete(index: usize, remove: usize) -> Splice<T> {
        return Splice::new(index, remove, Vec::new());
    }

    /// Whether the splice does nothing.
    pub fn is_noop(&self) -> bool {
        return self.remove == 0 && self.values.is_empty();
    }
}

/// A local edit: one splice or several applied in order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListUpdate<T> {
    Single(Splice<T>),
    Batch(Vec<Splice<T>>),
}

impl<T> ListUpdate<T> {
    /// The splices in application order.
    pub fn into_splices(self) -> Vec<Splice<T>> {
        return match self {
            ListUpdate::Single(splice) => vec![splice],
            ListUpdate::Batch(splices) => splices,
        };
    }
}

impl<T> From<Splice<T>> for ListUpdate<T> {
    fn from(splice: Splice<T>) -> Self {
        return ListUpdate::Single(splice);
    }
}

impl<T> From<Vec<Splice<T>>> for ListUpdate<T> {
    fn from(splices: Vec<Splice<T>>) -> Self {
        return ListUpdate::Batch(splices);
    }
}

/// One index based edit, as seen by local observers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEntry<T> {
    pub index: usize,
    pub removed: Vec<T>,
    pub inserted: Vec<T>,
}

/// One identifier based edit, as sent to other replicas.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchEntry<T> {
    pub removed_ids: Vec<Identifier>,
    pub removed_values: Vec<T>,
    pub inserted_ids: Vec<Identifier>,
    pub inserted_values: Vec<T>,
}

pub type ListChange<T> = Vec<ChangeEntry<T>>;
pub type ListPatch<T> = Vec<PatchEntry<T>>;
pub type ListUpdateResult<T> = UpdateResult<Vec<T>, ListChange<T>, ListPatch<T>>;
pub type ListPatchResult<T> = PatchResult<Vec<T>, ListChange<T>>;

/// A list valued field.
#[derive(Clone, Debug)]
pub struct ListField<T> {
    options: FieldOptions,
    allocator: Allocator,
    _values: PhantomData<fn() -> T>,
}

impl<T> ListField<T> {
    /// Create a list field with default options.
    pub fn new() -> ListField<T> {
        return ListField::with_options(FieldOptions::default());
    }

    /// Create a list field with the given options.
    pub fn with_options(options: FieldOptions) -> ListField<T> {
        let allocator = Allocator::new(options.allocator);
        return ListField {
            options,
            allocator,
            _values: PhantomData,
        };
    }

    /// The options this field was created with.
    pub fn options(&self) -> &FieldOptions {
        return &self.options;
    }
}

impl<T> Default for ListField<T> {
    fn default() -> Self {
        return Self::new();
    }
}

impl<T: Clone> Field for ListField<T> {
    type Value = Vec<T>;
    type Update = ListUpdate<T>;
    type Metadata = ListMetadata;
    type Change = ListChange<T>;
    type Patch = ListPatch<T>;
    type Error = ListError;

    fn field_type(&self) -> &'static str {
        return LIST_TYPE;
    }

    fn description(&self) -> &str {
        return &self.options.description;
    }

    fn create_value(&self) -> Vec<T> {
        return Vec::new();
    }

    fn create_metadata(&self) -> ListMetadata {
        return ListMetadata::new();
    }

    fn apply_update(
        &self,
        args: UpdateArgs<'_, Vec<T>, ListUpdate<T>, ListMetadata>,
    ) -> Result<ListUpdateResult<T>, ListError> {
        return update::apply_update(
            &self.allocator,
            args.previous,
            args.update,
            args.metadata,
            args.version,
            args.store_id,
        );
    }

    fn apply_patch(&self, args: PatchArgs<'_, Vec<T>, ListPatch<T>, ListMetadata>) -> ListPatchResult<T> {
        return patch::apply_patch(args.previous, args.metadata, args.patch);
    }

    fn merge_change(&self, first: ListChange<T>, second: ListChange<T>) -> ListChange<T> {
        return merge::merge_change(first, second);
    }

    fn merge_patch(&self, first: ListPatch<T>, second: ListPatch<T>) -> ListPatch<T> {
        return merge::merge_patch(first, second);
    }
}
