// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Listfield - a conflict-free replicated list field for multi-replica
//! datastores.
//!
//! Each replica keeps its own copy of a list and edits it locally. Edits
//! travel between replicas as identifier based patches and converge to the
//! same list everywhere, whatever order they arrive in and however often.
//!
//! # Quick Start
//!
//! ```
//! use listfield::field::{Field, UpdateArgs};
//! use listfield::list::{ListField, Splice};
//!
//! let field = ListField::<i32>::new();
//! let mut metadata = field.create_metadata();
//! let previous = field.create_value();
//!
//! let result = field
//!     .apply_update(UpdateArgs {
//!         previous: &previous,
//!         update: vec![Splice::insert(0, vec![1, 2, 3]), Splice::new(1, 1, vec![4, 5])].into(),
//!         metadata: &mut metadata,
//!         version: 1,
//!         store_id: 1,
//!     })
//!     .unwrap();
//!
//! assert_eq!(result.value, vec![1, 4, 5, 3]);
//! assert_eq!(result.change.len(), 2);
//! ```

pub mod error;
pub mod field;
pub mod id;
pub mod list;

pub use error::IdentifierError;
pub use error::ListError;
pub use error::Result;
