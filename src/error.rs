// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Errors raised while authoring local edits or decoding identifiers.
//!
//! Reconciling remote patches never fails, so [`ListError`] only describes a
//! bad local update. An update that fails leaves the field's metadata
//! exactly as it was. [`IdentifierError`] is raised when a decoded
//! identifier could never have come from an allocator.

/// Result alias for list field operations.
pub type Result<T, E = ListError> = std::result::Result<T, E>;

/// Error returned when a local update cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// A splice starts past the end of the list.
    #[error("splice {splice}: index {index} is out of bounds for a list of length {len}")]
    IndexOutOfBounds {
        /// Position of the splice within the update.
        splice: usize,
        index: usize,
        len: usize,
    },

    /// A splice removes more elements than remain after its index.
    #[error("splice {splice}: cannot remove {remove} elements at index {index} from a list of length {len}")]
    RemoveOutOfBounds {
        /// Position of the splice within the update.
        splice: usize,
        index: usize,
        remove: usize,
        len: usize,
    },

    /// The previous value does not line up with the metadata it was paired with.
    #[error("value has {values} elements but metadata tracks {ids} identifiers")]
    LengthMismatch { values: usize, ids: usize },
}

/// Error returned when an identifier has a shape no allocator produces.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("identifier has no triplets")]
    Empty,

    /// A level's position does not fit in 48 bits.
    #[error("identifier level {depth} has position {position}, above the 48-bit limit")]
    PositionOutOfRange { depth: usize, position: u64 },
}
