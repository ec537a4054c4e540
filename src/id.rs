// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Dense, totally ordered element identifiers.
//!
//! An [`Identifier`] is a path of [`Triplet`]s compared lexicographically.
//! New identifiers are always allocated *between* the identifiers of their
//! neighbours, so a list whose ids were produced by the [`Allocator`] stays
//! sorted on every replica. That lets a remote replica place an element by
//! binary search alone, without knowing anything about the edit history.
//!
//! # Ordering
//!
//! Triplets compare by `position`, then `version`, then `store_id`. Two
//! replicas that concurrently pick the same position in the same gap still
//! get distinct identifiers, ordered by the version and store of the edit.
//!
//! ```
//! use listfield::id::Allocator;
//!
//! let allocator = Allocator::default();
//! let ids = allocator.allocate(3, 1, 1);
//! assert!(ids[0] < ids[1] && ids[1] < ids[2]);
//!
//! let middle = allocator.allocate_between(1, 2, 7, Some(&ids[0]), Some(&ids[1]));
//! assert!(ids[0] < middle[0] && middle[0] < ids[1]);
//! ```

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde::Serializer;
use smallvec::SmallVec;

use crate::error::IdentifierError;

/// Largest position a triplet may carry (48 bits).
pub const MAX_POSITION: u64 = (1 << 48) - 1;

/// Default width of the window new positions are picked from.
pub const DEFAULT_BOUNDARY: u64 = 1 << 16;

/// One level of an identifier path.
///
/// Field order matters: the derived `Ord` compares `position` first,
/// then `version`, then `store_id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triplet {
    /// Position within the gap this level was allocated in.
    pub position: u64,
    /// Version of the edit that allocated this level.
    pub version: u64,
    /// Store that allocated this level.
    pub store_id: u32,
}

impl Triplet {
    /// Padding used when a lower bound runs out of levels.
    pub const ZERO: Triplet = Triplet {
        position: 0,
        version: 0,
        store_id: 0,
    };

    /// Create a new triplet.
    pub fn new(position: u64, version: u64, store_id: u32) -> Triplet {
        return Triplet {
            position,
            version,
            store_id,
        };
    }
}

/// A globally unique, totally ordered list element identifier.
///
/// On the wire an identifier is a bare list of triplets. Decoding rejects
/// the empty list and positions above [`MAX_POSITION`].
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "SmallVec<[Triplet; 2]>")]
pub struct Identifier(SmallVec<[Triplet; 2]>);

impl Identifier {
    /// Build an identifier from its triplets.
    ///
    /// Mostly useful for tests and decoders; fresh identifiers should come
    /// from an [`Allocator`].
    pub fn from_triplets(triplets: impl IntoIterator<Item = Triplet>) -> Identifier {
        return Identifier(triplets.into_iter().collect());
    }

    /// The triplets making up this identifier, outermost first.
    pub fn triplets(&self) -> &[Triplet] {
        return &self.0;
    }

    /// Number of levels in the path.
    pub fn depth(&self) -> usize {
        return self.0.len();
    }

    /// Version of the edit that allocated this identifier.
    pub fn version(&self) -> u64 {
        return self.0.last().map_or(0, |t| t.version);
    }

    /// Store that allocated this identifier.
    pub fn store_id(&self) -> u32 {
        return self.0.last().map_or(0, |t| t.store_id);
    }

    /// Check that this identifier could have come from an [`Allocator`]:
    /// at least one level, and every position within 48 bits.
    pub fn validate(&self) -> Result<(), IdentifierError> {
        if self.0.is_empty() {
            return Err(IdentifierError::Empty);
        }
        for (depth, triplet) in self.0.iter().enumerate() {
            if triplet.position > MAX_POSITION {
                return Err(IdentifierError::PositionOutOfRange {
                    depth,
                    position: triplet.position,
                });
            }
        }
        return Ok(());
    }
}

impl TryFrom<SmallVec<[Triplet; 2]>> for Identifier {
    type Error = IdentifierError;

    fn try_from(triplets: SmallVec<[Triplet; 2]>) -> Result<Self, Self::Error> {
        let id = Identifier(triplets);
        id.validate()?;
        return Ok(id);
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        return self.0.serialize(serializer);
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "Identifier({self})");
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, t) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}@{}:{}", t.position, t.version, t.store_id)?;
        }
        return Ok(());
    }
}

/// Tuning for the [`Allocator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatorConfig {
    /// New positions are picked from at most this many slots above the
    /// lower neighbour. Small values keep appends dense; large values leave
    /// more room for later inserts before paths grow deeper.
    pub boundary: u64,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        return AllocatorConfig {
            boundary: DEFAULT_BOUNDARY,
        };
    }
}

/// Produces fresh identifiers between two neighbours.
///
/// Allocation is a pure function of its arguments: no counters, no
/// randomness. Uniqueness comes from stamping the caller's
/// `(version, store_id)` into the final triplet.
#[derive(Clone, Copy, Debug, Default)]
pub struct Allocator {
    config: AllocatorConfig,
}

impl Allocator {
    /// Create an allocator with the given configuration.
    pub fn new(config: AllocatorConfig) -> Allocator {
        return Allocator {
            config: AllocatorConfig {
                boundary: config.boundary.max(1),
            },
        };
    }

    /// The active configuration.
    pub fn config(&self) -> AllocatorConfig {
        return self.config;
    }

    /// Allocate `count` ascending identifiers with no neighbours.
    pub fn allocate(&self, count: usize, version: u64, store_id: u32) -> Vec<Identifier> {
        return self.allocate_between(count, version, store_id, None, None);
    }

    /// Allocate `count` ascending identifiers strictly between `lower` and
    /// `upper`. `None` stands for the start or end of the list.
    pub fn allocate_between(
        &self,
        count: usize,
        version: u64,
        store_id: u32,
        lower: Option<&Identifier>,
        upper: Option<&Identifier>,
    ) -> Vec<Identifier> {
        let mut ids: Vec<Identifier> = Vec::with_capacity(count);
        for _ in 0..count {
            let id = self.between(version, store_id, ids.last().or(lower), upper);
            ids.push(id);
        }
        return ids;
    }

    /// Allocate a single identifier strictly between `lower` and `upper`.
    pub fn between(
        &self,
        version: u64,
        store_id: u32,
        lower: Option<&Identifier>,
        upper: Option<&Identifier>,
    ) -> Identifier {
        if let (Some(lower), Some(upper)) = (lower, upper) {
            debug_assert!(lower < upper, "allocation bounds out of order: {lower} >= {upper}");
        }

        let low_path: &[Triplet] = lower.map(|id| id.triplets()).unwrap_or(&[]);
        let mut high_path: Option<&[Triplet]> = upper.map(|id| id.triplets());
        let mut path: SmallVec<[Triplet; 2]> = SmallVec::new();

        for depth in 0.. {
            let low = low_path.get(depth).copied().unwrap_or(Triplet::ZERO);
            let high = high_path.and_then(|p| p.get(depth).copied());

            // Shared prefix with the upper bound: keep descending under it.
            if high == Some(low) {
                path.push(low);
                continue;
            }

            // Saturate so a bound past MAX_POSITION descends instead of wrapping.
            let high_position = high.map_or(MAX_POSITION + 1, |t| t.position);
            if high_position > low.position.saturating_add(1) {
                let position = self.pick(low.position, high_position);
                path.push(Triplet::new(position, version, store_id));
                break;
            }

            // No room at this level. Below `low` we are already less than
            // the upper bound, so it stops constraining deeper levels.
            path.push(low);
            high_path = None;
        }

        return Identifier(path);
    }

    /// Pick a position in the open interval `(low, high)`.
    ///
    /// Callers guarantee `high > low + 1`, so the gap is at least one.
    fn pick(&self, low: u64, high: u64) -> u64 {
        let gap = high.saturating_sub(low).saturating_sub(1);
        let window = gap.min(self.config.boundary).max(1);
        return low.saturating_add(1).saturating_add((window - 1) / 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(triplets: &[(u64, u64, u32)]) -> Identifier {
        return Identifier::from_triplets(triplets.iter().map(|&(p, v, s)| Triplet::new(p, v, s)));
    }

    #[test]
    fn triplets_order_by_position_then_version_then_store() {
        assert!(Triplet::new(1, 9, 9) < Triplet::new(2, 0, 0));
        assert!(Triplet::new(2, 1, 9) < Triplet::new(2, 2, 0));
        assert!(Triplet::new(2, 2, 0) < Triplet::new(2, 2, 1));
    }

    #[test]
    fn prefix_sorts_before_extension() {
        let short = id(&[(5, 1, 1)]);
        let long = id(&[(5, 1, 1), (1, 2, 1)]);
        assert!(short < long);
        assert!(long < id(&[(6, 0, 0)]));
    }

    #[test]
    fn allocate_is_ascending_and_stamped() {
        let ids = Allocator::default().allocate(5, 3, 42);
        assert_eq!(ids.len(), 5);
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        for id in &ids {
            assert_eq!(id.version(), 3);
            assert_eq!(id.store_id(), 42);
        }
    }

    #[test]
    fn allocate_zero_is_empty() {
        assert!(Allocator::default().allocate(0, 1, 1).is_empty());
    }

    #[test]
    fn between_adjacent_positions_descends() {
        let allocator = Allocator::default();
        let lower = id(&[(7, 1, 1)]);
        let upper = id(&[(8, 1, 1)]);
        let middle = allocator.between(2, 1, Some(&lower), Some(&upper));
        assert!(lower < middle && middle < upper);
        assert_eq!(middle.depth(), 2);
    }

    #[test]
    fn between_equal_positions_from_different_stores() {
        let allocator = Allocator::default();
        let lower = id(&[(7, 1, 1)]);
        let upper = id(&[(7, 1, 2)]);
        let middle = allocator.between(3, 5, Some(&lower), Some(&upper));
        assert!(lower < middle && middle < upper);
    }

    #[test]
    fn between_prefix_and_extension() {
        let allocator = Allocator::default();
        let lower = id(&[(5, 1, 1)]);
        let upper = id(&[(5, 1, 1), (1, 1, 1)]);
        let middle = allocator.between(2, 1, Some(&lower), Some(&upper));
        assert!(lower < middle && middle < upper);
    }

    #[test]
    fn repeated_prepends_stay_ordered() {
        let allocator = Allocator::new(AllocatorConfig { boundary: 4 });
        let mut first = allocator.between(1, 1, None, None);
        for version in 2..200 {
            let next = allocator.between(version, 1, None, Some(&first));
            assert!(next < first);
            first = next;
        }
    }

    #[test]
    fn repeated_inserts_into_one_gap_stay_ordered() {
        let allocator = Allocator::new(AllocatorConfig { boundary: 2 });
        let lower = id(&[(1, 1, 1)]);
        let mut upper = id(&[(3, 1, 1)]);
        for version in 2..100 {
            let next = allocator.between(version, 1, Some(&lower), Some(&upper));
            assert!(lower < next && next < upper);
            upper = next;
        }
    }

    #[test]
    fn zero_boundary_is_clamped() {
        let allocator = Allocator::new(AllocatorConfig { boundary: 0 });
        assert_eq!(allocator.config().boundary, 1);
        let ids = allocator.allocate(3, 1, 1);
        assert!(ids[0] < ids[1] && ids[1] < ids[2]);
    }

    #[test]
    fn display_lists_triplets() {
        assert_eq!(id(&[(5, 1, 2), (3, 4, 5)]).to_string(), "5@1:2.3@4:5");
    }

    #[test]
    fn validate_rejects_unallocatable_shapes() {
        assert_eq!(Identifier::from_triplets([]).validate(), Err(IdentifierError::Empty));
        assert_eq!(
            id(&[(3, 1, 1), (MAX_POSITION + 1, 1, 1)]).validate(),
            Err(IdentifierError::PositionOutOfRange {
                depth: 1,
                position: MAX_POSITION + 1,
            })
        );
        assert_eq!(id(&[(MAX_POSITION, 1, 1)]).validate(), Ok(()));
    }

    #[test]
    fn decoding_rejects_empty_and_oversized_identifiers() {
        assert!(serde_json::from_str::<Identifier>("[]").is_err());
        let oversized = format!(r#"[{{"position":{},"version":1,"store_id":2}}]"#, u64::MAX);
        assert!(serde_json::from_str::<Identifier>(&oversized).is_err());

        let valid = id(&[(7, 1, 2), (3, 4, 5)]);
        let json = serde_json::to_string(&valid).unwrap();
        assert_eq!(json, r#"[{"position":7,"version":1,"store_id":2},{"position":3,"version":4,"store_id":5}]"#);
        assert_eq!(serde_json::from_str::<Identifier>(&json).unwrap(), valid);
    }

    #[test]
    fn between_oversized_bounds_does_not_overflow() {
        let allocator = Allocator::default();
        let huge = id(&[(u64::MAX, 1, 2)]);

        let after = allocator.between(3, 1, Some(&huge), None);
        assert!(huge < after);

        let before = allocator.between(3, 1, None, Some(&huge));
        assert!(before < huge);

        let lower = id(&[(u64::MAX - 1, 1, 1)]);
        let middle = allocator.between(3, 1, Some(&lower), Some(&huge));
        assert!(lower < middle && middle < huge);
    }
}
