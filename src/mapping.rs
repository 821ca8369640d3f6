//! Bidirectional position translation between two matched paths
//!
//! Used after matching to project tag and geometry edits located on one
//! network's path onto the corresponding position of the other's.

use serde::{Deserialize, Serialize};

use crate::edge_string::EdgeString;
use crate::error::Result;
use crate::location::EdgeLocation;
use crate::network::ElementId;

/// Selects one of the two ways in a match or mapping, so the per-side
/// accessor pairs can also be driven generically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WayNumber {
    Way1,
    Way2,
}

/// A mapping from one way string to another.
///
/// Lets the caller obtain the corresponding location on way string 2 for a
/// location on way string 1, or vice versa. Implementations guarantee:
///
/// - the beginning of way string 1 maps to the beginning of way string 2,
///   and the end to the end;
/// - results are identical for identical input;
/// - the mapping is not necessarily commutative: several positions on one
///   side may map to a single position on the other, and mapping that
///   position back may return any one of them (deterministically).
///
/// If a way string changes after construction, the mapping's behavior is
/// undefined until the corresponding `set_way_string*` re-registers it;
/// this is caller responsibility and is not checked at runtime.
pub trait WayMatchStringMapping {
    fn way_string1(&self) -> &EdgeString;
    fn way_string2(&self) -> &EdgeString;

    fn way_string(&self, way: WayNumber) -> &EdgeString {
        match way {
            WayNumber::Way1 => self.way_string1(),
            WayNumber::Way2 => self.way_string2(),
        }
    }

    /// `preferred` is used only as a tie-break when the mapped position
    /// falls exactly on a boundary between two elements
    fn map_1_to_2(
        &self,
        location: &EdgeLocation,
        preferred: Option<ElementId>,
    ) -> Result<EdgeLocation>;

    /// `preferred` is used only as a tie-break when the mapped position
    /// falls exactly on a boundary between two elements
    fn map_2_to_1(
        &self,
        location: &EdgeLocation,
        preferred: Option<ElementId>,
    ) -> Result<EdgeLocation>;

    fn set_way_string1(&mut self, way_string: EdgeString);
    fn set_way_string2(&mut self, way_string: EdgeString);

    fn set_way_string(&mut self, way: WayNumber, way_string: EdgeString) {
        match way {
            WayNumber::Way1 => self.set_way_string1(way_string),
            WayNumber::Way2 => self.set_way_string2(way_string),
        }
    }
}

/// Proportional mapping over length-weighted extents.
///
/// A location is converted to its normalized offset along its own way
/// string and looked up at the same offset on the opposite one. Endpoints
/// are preserved exactly and repeated calls return identical results.
#[derive(Debug, Clone)]
pub struct NaiveWayMatchStringMapping {
    way_string1: EdgeString,
    way_string2: EdgeString,
}

impl NaiveWayMatchStringMapping {
    pub fn new(way_string1: EdgeString, way_string2: EdgeString) -> Self {
        tracing::debug!(
            string1 = %way_string1,
            string2 = %way_string2,
            "building naive way string mapping"
        );
        Self {
            way_string1,
            way_string2,
        }
    }
}

impl WayMatchStringMapping for NaiveWayMatchStringMapping {
    fn way_string1(&self) -> &EdgeString {
        &self.way_string1
    }

    fn way_string2(&self) -> &EdgeString {
        &self.way_string2
    }

    fn map_1_to_2(
        &self,
        location: &EdgeLocation,
        preferred: Option<ElementId>,
    ) -> Result<EdgeLocation> {
        let position = self.way_string1.position_of(location)?;
        self.way_string2.location_at(position, preferred)
    }

    fn map_2_to_1(
        &self,
        location: &EdgeLocation,
        preferred: Option<ElementId>,
    ) -> Result<EdgeLocation> {
        let position = self.way_string2.position_of(location)?;
        self.way_string1.location_at(position, preferred)
    }

    fn set_way_string1(&mut self, way_string: EdgeString) {
        self.way_string1 = way_string;
    }

    fn set_way_string2(&mut self, way_string: EdgeString) {
        self.way_string2 = way_string;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{NetworkEdge, NetworkVertex};
    use std::sync::Arc;

    fn vertex(id: i64, lon: f64) -> Arc<NetworkVertex> {
        Arc::new(NetworkVertex::new(ElementId(id), lon, 0.0))
    }

    fn edge(a: &Arc<NetworkVertex>, b: &Arc<NetworkVertex>, member: i64) -> Arc<NetworkEdge> {
        let mut e = NetworkEdge::new(Arc::clone(a), Arc::clone(b), true);
        e.add_member(ElementId(member));
        Arc::new(e)
    }

    /// string1: one edge 0..20; string2: two equal-length edges 0..10..20
    fn fixture() -> (NaiveWayMatchStringMapping, Arc<NetworkEdge>, Vec<Arc<NetworkEdge>>) {
        let (a, b) = (vertex(1, 0.0), vertex(2, 20.0));
        let single = edge(&a, &b, 100);

        let (p, q, r) = (vertex(11, 0.0), vertex(12, 10.0), vertex(13, 20.0));
        let first = edge(&p, &q, 200);
        let second = edge(&q, &r, 300);
        let mut ws2 = EdgeString::new(Arc::clone(&first));
        ws2.append_edge(Arc::clone(&second)).unwrap();

        let mapping = NaiveWayMatchStringMapping::new(
            EdgeString::new(Arc::clone(&single)),
            ws2,
        );
        (mapping, single, vec![first, second])
    }

    #[test]
    fn test_endpoints_map_to_endpoints() {
        let (mapping, single, pair) = fixture();

        let from = mapping
            .map_1_to_2(&EdgeLocation::start(Arc::clone(&single)), None)
            .unwrap();
        assert_eq!(from, EdgeLocation::start(Arc::clone(&pair[0])));

        let to = mapping
            .map_1_to_2(&EdgeLocation::end(Arc::clone(&single)), None)
            .unwrap();
        assert_eq!(to, EdgeLocation::end(Arc::clone(&pair[1])));

        let back = mapping
            .map_2_to_1(&EdgeLocation::end(Arc::clone(&pair[1])), None)
            .unwrap();
        assert_eq!(back, EdgeLocation::end(single));
    }

    #[test]
    fn test_proportional_interior_mapping() {
        let (mapping, single, pair) = fixture();

        // The quarter point of the single edge sits at the midpoint of
        // string2's first element
        let quarter = EdgeLocation::new(Arc::clone(&single), 0.25).unwrap();
        let mapped = mapping.map_1_to_2(&quarter, None).unwrap();
        assert_eq!(mapped.edge(), &pair[0]);
        assert!((mapped.fraction() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_determinism() {
        let (mapping, single, _) = fixture();
        let loc = EdgeLocation::new(Arc::clone(&single), 0.37).unwrap();
        let first = mapping.map_1_to_2(&loc, None).unwrap();
        let second = mapping.map_1_to_2(&loc, None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_boundary_tie_break_uses_preferred_member() {
        let (mapping, single, pair) = fixture();
        let midpoint = EdgeLocation::new(Arc::clone(&single), 0.5).unwrap();

        // Without a hint the earlier element is reported
        let plain = mapping.map_1_to_2(&midpoint, None).unwrap();
        assert_eq!(plain, EdgeLocation::end(Arc::clone(&pair[0])));

        // The hint flips the reported identity, not the geometry
        let hinted = mapping
            .map_1_to_2(&midpoint, Some(ElementId(300)))
            .unwrap();
        assert_eq!(hinted, EdgeLocation::start(Arc::clone(&pair[1])));
        assert_eq!(hinted.vertex(), plain.vertex());
    }

    #[test]
    fn test_many_to_one_round_trip_is_deterministic() {
        // A stub-only side: every position on side 1 lands on the single
        // zero-length stub, and mapping back picks one fixed position
        let v = vertex(1, 0.0);
        let stub = Arc::new(NetworkEdge::stub(v));
        let (mapping, single, _) = {
            let (m, s, p) = fixture();
            (
                NaiveWayMatchStringMapping::new(
                    m.way_string1().clone(),
                    EdgeString::new(Arc::clone(&stub)),
                ),
                s,
                p,
            )
        };

        let a = EdgeLocation::new(Arc::clone(&single), 0.3).unwrap();
        let b = EdgeLocation::new(Arc::clone(&single), 0.6).unwrap();
        let ma = mapping.map_1_to_2(&a, None).unwrap();
        let mb = mapping.map_1_to_2(&b, None).unwrap();
        assert_eq!(ma.edge(), &stub);
        assert_eq!(mb.edge(), &stub);

        let back1 = mapping.map_2_to_1(&ma, None).unwrap();
        let back2 = mapping.map_2_to_1(&ma, None).unwrap();
        assert_eq!(back1, back2, "repeated reverse mapping must agree");
    }

    #[test]
    fn test_set_way_string_re_registers() {
        let (mut mapping, _, pair) = fixture();
        let replacement = EdgeString::new(Arc::clone(&pair[0]));
        mapping.set_way_string(WayNumber::Way2, replacement.clone());
        assert_eq!(mapping.way_string(WayNumber::Way2), &replacement);
    }
}
