//! Portions of a single edge between two fractional positions

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::location::EdgeLocation;
use crate::network::NetworkEdge;

/// The portion of one edge spanning between two locations.
///
/// The order of start and end encodes traversal direction independently of
/// the edge's own direction flag: `start > end` means the subline is
/// traversed backwards. A subline spanning the full [0.0, 1.0] range behaves
/// identically to the raw edge for every containment and traversal query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeSubline {
    start: EdgeLocation,
    end: EdgeLocation,
}

impl EdgeSubline {
    /// Fails with `EdgeMismatch` when the two locations reference
    /// different edges.
    pub fn new(start: EdgeLocation, end: EdgeLocation) -> Result<Self> {
        if start.edge() != end.edge() {
            return Err(Error::EdgeMismatch(
                start.edge().to_string(),
                end.edge().to_string(),
            ));
        }
        Ok(Self { start, end })
    }

    /// The whole edge, traversed forward
    pub fn whole(edge: Arc<NetworkEdge>) -> Self {
        Self {
            start: EdgeLocation::start(Arc::clone(&edge)),
            end: EdgeLocation::end(edge),
        }
    }

    /// The whole edge, traversed backwards
    pub fn whole_reversed(edge: Arc<NetworkEdge>) -> Self {
        Self {
            start: EdgeLocation::end(Arc::clone(&edge)),
            end: EdgeLocation::start(edge),
        }
    }

    pub fn edge(&self) -> &Arc<NetworkEdge> {
        self.start.edge()
    }

    pub fn start(&self) -> &EdgeLocation {
        &self.start
    }

    pub fn end(&self) -> &EdgeLocation {
        &self.end
    }

    pub fn is_backwards(&self) -> bool {
        self.start.fraction() > self.end.fraction()
    }

    /// Smaller of the two fractions, regardless of traversal direction
    pub fn low(&self) -> f64 {
        self.start.fraction().min(self.end.fraction())
    }

    /// Larger of the two fractions, regardless of traversal direction
    pub fn high(&self) -> f64 {
        self.start.fraction().max(self.end.fraction())
    }

    /// True when the subline spans the entire [0.0, 1.0] extent
    pub fn is_full(&self) -> bool {
        self.low() == 0.0 && self.high() == 1.0
    }

    /// True when the subline covers less than the whole edge
    pub fn is_partial(&self) -> bool {
        !self.is_full()
    }

    /// True when the subline has no extent at all
    pub fn is_zero_length(&self) -> bool {
        self.start.fraction() == self.end.fraction()
    }

    /// Containment at this level is edge identity, not extent identity
    pub fn contains_edge(&self, edge: &NetworkEdge) -> bool {
        self.edge().as_ref() == edge
    }

    pub fn contains_location(&self, location: &EdgeLocation) -> bool {
        self.contains_edge(location.edge())
            && location.fraction() >= self.low()
            && location.fraction() <= self.high()
    }

    /// True when `other` lies on the same edge within this subline's extent
    pub fn contains_subline(&self, other: &EdgeSubline) -> bool {
        self.contains_edge(other.edge()) && self.low() <= other.low() && self.high() >= other.high()
    }

    /// True when the two extents share more than a single boundary
    /// fraction. Sublines that merely touch at an endpoint do not overlap.
    pub fn overlaps(&self, other: &EdgeSubline) -> bool {
        self.edge() == other.edge()
            && self.low().max(other.low()) < self.high().min(other.high())
    }

    /// Swap the traversal sense
    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
    }

    pub fn reversed(&self) -> Self {
        Self {
            start: self.end.clone(),
            end: self.start.clone(),
        }
    }
}

impl fmt::Display for EdgeSubline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{} -> {}]",
            self.edge(),
            self.start.fraction(),
            self.end.fraction()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{ElementId, NetworkVertex};

    fn edge(id_a: i64, id_b: i64) -> Arc<NetworkEdge> {
        let v1 = Arc::new(NetworkVertex::new(ElementId(id_a), 0.0, 0.0));
        let v2 = Arc::new(NetworkVertex::new(ElementId(id_b), 10.0, 0.0));
        Arc::new(NetworkEdge::new(v1, v2, true))
    }

    fn subline(edge: &Arc<NetworkEdge>, from: f64, to: f64) -> EdgeSubline {
        EdgeSubline::new(
            EdgeLocation::new(Arc::clone(edge), from).unwrap(),
            EdgeLocation::new(Arc::clone(edge), to).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_locations_on_different_edges() {
        let e1 = edge(1, 2);
        let e2 = edge(3, 4);
        let result = EdgeSubline::new(EdgeLocation::start(e1), EdgeLocation::end(e2));
        assert!(matches!(result, Err(Error::EdgeMismatch(_, _))));
    }

    #[test]
    fn test_full_vs_partial() {
        let e = edge(1, 2);
        assert!(subline(&e, 0.0, 1.0).is_full());
        assert!(subline(&e, 1.0, 0.0).is_full(), "direction must not matter");
        assert!(subline(&e, 0.0, 0.9).is_partial());
        assert!(EdgeSubline::whole(e).is_full());
    }

    #[test]
    fn test_contains_edge_ignores_extent() {
        let e = edge(1, 2);
        let other = edge(3, 4);
        let sub = subline(&e, 0.2, 0.3);
        assert!(sub.contains_edge(&e));
        assert!(!sub.contains_edge(&other));
    }

    #[test]
    fn test_overlap_boundary_policy() {
        let e = edge(1, 2);
        let a = subline(&e, 0.0, 0.5);
        let b = subline(&e, 0.0, 0.7);
        let c = subline(&e, 0.5, 0.7);

        assert!(a.overlaps(&b), "[0,0.5] and [0,0.7] intersect");
        assert!(
            !a.overlaps(&c),
            "[0,0.5] and [0.5,0.7] abut at a single fraction and must not overlap"
        );
    }

    #[test]
    fn test_overlap_requires_same_edge() {
        let a = subline(&edge(1, 2), 0.0, 1.0);
        let b = subline(&edge(3, 4), 0.0, 1.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_reverse_swaps_sense_but_not_extent() {
        let e = edge(1, 2);
        let mut sub = subline(&e, 0.2, 0.8);
        assert!(!sub.is_backwards());
        sub.reverse();
        assert!(sub.is_backwards());
        assert_eq!(sub.low(), 0.2);
        assert_eq!(sub.high(), 0.8);
        assert_eq!(sub.reversed(), subline(&e, 0.2, 0.8));
    }

    #[test]
    fn test_contains_location() {
        let e = edge(1, 2);
        let sub = subline(&e, 0.2, 0.8);
        assert!(sub.contains_location(&EdgeLocation::new(Arc::clone(&e), 0.5).unwrap()));
        assert!(sub.contains_location(&EdgeLocation::new(Arc::clone(&e), 0.2).unwrap()));
        assert!(!sub.contains_location(&EdgeLocation::new(Arc::clone(&e), 0.1).unwrap()));
    }
}
