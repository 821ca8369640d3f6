//! Declared correspondences between one path in each of two networks

use std::fmt;

use rustc_hash::FxHashSet;

use crate::edge_string::EdgeString;
use crate::network::{NetworkEdge, NetworkVertex};

/// Deduplication container for matches discovered through different
/// construction paths; keyed by structural equality
pub type EdgeMatchSet = FxHashSet<EdgeMatch>;

/// A pair of paths — one per network — declared correspondent.
///
/// A value object: immutable after construction except for the explicit
/// in-place `reverse`. Side order matters for the position-mapping
/// contract, while containment, overlap, and hashing are defined over the
/// edges each side covers. Structural equality and hashing make the match
/// usable as a key, so a search discovering the same correspondence twice
/// collapses it to one entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeMatch {
    string1: EdgeString,
    string2: EdgeString,
}

impl EdgeMatch {
    pub fn new(string1: EdgeString, string2: EdgeString) -> Self {
        Self { string1, string2 }
    }

    pub fn string1(&self) -> &EdgeString {
        &self.string1
    }

    pub fn string2(&self) -> &EdgeString {
        &self.string2
    }

    /// True when either side's path contains the edge
    pub fn contains_edge(&self, edge: &NetworkEdge) -> bool {
        self.string1.contains_edge(edge) || self.string2.contains_edge(edge)
    }

    /// True when either side's path contains the vertex
    pub fn contains_vertex(&self, vertex: &NetworkVertex) -> bool {
        self.string1.contains_vertex(vertex) || self.string2.contains_vertex(vertex)
    }

    /// Same-side structural containment: this match's side 1 contains the
    /// other's side 1 and likewise for side 2. Not commutative across
    /// sides.
    pub fn contains_match(&self, other: &EdgeMatch) -> bool {
        self.string1.contains_string(&other.string1) && self.string2.contains_string(&other.string2)
    }

    /// True when the corresponding sides share strictly intersecting
    /// extent on a common edge; extents that merely abut at a boundary
    /// fraction do not overlap.
    pub fn overlaps(&self, other: &EdgeMatch) -> bool {
        self.string1.overlaps(&other.string1) || self.string2.overlaps(&other.string2)
    }

    /// True when the extents the two sides cover differ: some edge portion
    /// matched on one side has no equal-extent counterpart on the other.
    /// A match built purely from full-edge correspondences is never
    /// partial.
    pub fn contains_partial(&self) -> bool {
        self.string1.partial_extents() != self.string2.partial_extents()
    }

    /// True when either side contains a stub (self-loop) edge — a
    /// placeholder correspondence with no real geometric counterpart
    pub fn contains_stub(&self) -> bool {
        self.string1.contains_stub() || self.string2.contains_stub()
    }

    /// Reverse both sides in place; used when a candidate path turns out
    /// to match opposite to the direction it was generated in
    pub fn reverse(&mut self) {
        self.string1.reverse();
        self.string2.reverse();
    }
}

impl fmt::Display for EdgeMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1: {}; 2: {}", self.string1, self.string2)
    }
}
