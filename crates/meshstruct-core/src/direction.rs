//! The compass vocabulary used to describe a structured region's
//! orientation relative to the cell/edge tuples stored in the input mesh.
//!
//! The original detection code represented a "compass" as a small
//! dictionary mapping a logical direction to a callable that located the
//! corresponding neighbour. Here the same idea is a fixed enumerated
//! direction plus a lookup table of slot ordinals — no callables, no
//! dynamic dispatch.

use std::fmt;

/// One of the four logical corners of a 2x2 node window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellCorner {
    /// Top-left of the window (row r, col c).
    NorthWest,
    /// Top-right of the window (row r, col c+1).
    NorthEast,
    /// Bottom-left of the window (row r+1, col c).
    SouthWest,
    /// Bottom-right of the window (row r+1, col c+1).
    SouthEast,
}

impl CellCorner {
    /// All four corners in a fixed, stable order: NW, NE, SW, SE.
    pub const ALL: [CellCorner; 4] = [
        CellCorner::NorthWest,
        CellCorner::NorthEast,
        CellCorner::SouthWest,
        CellCorner::SouthEast,
    ];

    /// Index of this corner within [`CellCorner::ALL`].
    pub fn index(self) -> usize {
        match self {
            CellCorner::NorthWest => 0,
            CellCorner::NorthEast => 1,
            CellCorner::SouthWest => 2,
            CellCorner::SouthEast => 3,
        }
    }
}

impl fmt::Display for CellCorner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CellCorner::NorthWest => "NW",
            CellCorner::NorthEast => "NE",
            CellCorner::SouthWest => "SW",
            CellCorner::SouthEast => "SE",
        };
        write!(f, "{s}")
    }
}

/// Maps each [`CellCorner`] to the slot ordinal (0..4) that corner occupies
/// inside a cell's stored ordered node tuple.
///
/// Derived once per cell region, from the region's first structured 2x2
/// window, and held fixed for every other cell in the region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Compass4 {
    slots: [u8; 4],
}

impl Compass4 {
    /// Build a compass from the per-corner slot ordinals, in
    /// `[NorthWest, NorthEast, SouthWest, SouthEast]` order.
    ///
    /// Returns `None` if the four slots are not a permutation of `0..4`
    /// (each corner must map to a distinct slot).
    pub fn new(slots: [u8; 4]) -> Option<Self> {
        let mut seen = [false; 4];
        for &s in &slots {
            let idx = usize::from(s);
            if idx >= 4 || seen[idx] {
                return None;
            }
            seen[idx] = true;
        }
        Some(Self { slots })
    }

    /// Slot ordinal for the given corner.
    pub fn slot(&self, corner: CellCorner) -> u8 {
        self.slots[corner.index()]
    }

    /// The four slot ordinals in `[NW, NE, SW, SE]` order.
    pub fn slots(&self) -> [u8; 4] {
        self.slots
    }
}

/// The two orientations a structured edge strip can have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeDirection {
    /// Connects `(row, col)` to `(row, col + 1)`.
    Horizontal,
    /// Connects `(row, col)` to `(row + 1, col)`.
    Vertical,
}

/// A two-element ordering, used for both the node-compass (which endpoint
/// of a structured edge's stored node pair is the "first" logical node)
/// and the cell-compass (whether the stored cell pair is already in
/// ascending order).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Compass2 {
    order: [u8; 2],
}

impl Compass2 {
    /// The identity ordering: slot 0 is logically first, slot 1 second.
    pub const IDENTITY: Compass2 = Compass2 { order: [0, 1] };

    /// The swapped ordering: slot 1 is logically first, slot 0 second.
    pub const SWAPPED: Compass2 = Compass2 { order: [1, 0] };

    /// Build a two-element compass. Returns `None` unless `order` is a
    /// permutation of `[0, 1]`.
    pub fn new(order: [u8; 2]) -> Option<Self> {
        match order {
            [0, 1] => Some(Self::IDENTITY),
            [1, 0] => Some(Self::SWAPPED),
            _ => None,
        }
    }

    /// The slot ordinal holding the logically-first element.
    pub fn first_slot(&self) -> u8 {
        self.order[0]
    }

    /// The slot ordinal holding the logically-second element.
    pub fn second_slot(&self) -> u8 {
        self.order[1]
    }

    /// Whether this compass is the identity ordering (no swap).
    pub fn is_identity(&self) -> bool {
        self.order == [0, 1]
    }
}
