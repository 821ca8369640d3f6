//! Shared graph leaves: feature identity, vertices, and edges
//!
//! Vertices and edges are assembled by an external network loader and shared
//! read-only (`Arc`) across every path and match built during a conflation
//! pass; nothing in this crate mutates them after construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::geo::haversine_distance;

/// Identity of an underlying map feature (node or way)
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ElementId(pub i64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A graph node bound to an underlying map feature.
///
/// Identity is the feature id; coordinates ride along for length
/// computations but do not participate in equality or hashing.
#[derive(Debug, Clone)]
pub struct NetworkVertex {
    id: ElementId,
    lon: f64,
    lat: f64,
}

impl NetworkVertex {
    pub fn new(id: ElementId, lon: f64, lat: f64) -> Self {
        Self { id, lon, lat }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }
}

impl PartialEq for NetworkVertex {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for NetworkVertex {}

impl Hash for NetworkVertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for NetworkVertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.id)
    }
}

/// A directed connection between two vertices.
///
/// A self-loop (`from == to`) is a stub edge: the sentinel for "no
/// correspondence available here". Undirected edges compare equal under
/// endpoint swap; directed edges do not.
#[derive(Debug, Clone)]
pub struct NetworkEdge {
    from: Arc<NetworkVertex>,
    to: Arc<NetworkVertex>,
    directed: bool,
    members: Vec<ElementId>,
}

impl NetworkEdge {
    pub fn new(from: Arc<NetworkVertex>, to: Arc<NetworkVertex>, directed: bool) -> Self {
        Self {
            from,
            to,
            directed,
            members: Vec::new(),
        }
    }

    /// Self-loop placeholder edge for an unmatched segment
    pub fn stub(vertex: Arc<NetworkVertex>) -> Self {
        Self {
            from: Arc::clone(&vertex),
            to: vertex,
            directed: false,
            members: Vec::new(),
        }
    }

    pub fn from(&self) -> &Arc<NetworkVertex> {
        &self.from
    }

    pub fn to(&self) -> &Arc<NetworkVertex> {
        &self.to
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Way features this edge was derived from
    pub fn members(&self) -> &[ElementId] {
        &self.members
    }

    pub fn add_member(&mut self, id: ElementId) {
        self.members.push(id);
    }

    pub fn is_stub(&self) -> bool {
        self.from.id() == self.to.id()
    }

    pub fn contains_vertex(&self, vertex: &NetworkVertex) -> bool {
        self.from.as_ref() == vertex || self.to.as_ref() == vertex
    }

    /// Great-circle length between the endpoint vertices, in meters
    pub fn length_m(&self) -> f64 {
        haversine_distance(self.from.lon(), self.from.lat(), self.to.lon(), self.to.lat())
    }
}

impl PartialEq for NetworkEdge {
    fn eq(&self, other: &Self) -> bool {
        if self.directed != other.directed || self.members != other.members {
            return false;
        }
        let forward = self.from == other.from && self.to == other.to;
        if self.directed {
            forward
        } else {
            forward || (self.from == other.to && self.to == other.from)
        }
    }
}

impl Eq for NetworkEdge {}

impl Hash for NetworkEdge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.directed.hash(state);
        self.members.hash(state);
        if self.directed {
            self.from.id().hash(state);
            self.to.id().hash(state);
        } else {
            // Order-independent so swapped endpoints hash equal
            let (lo, hi) = if self.from.id() <= self.to.id() {
                (self.from.id(), self.to.id())
            } else {
                (self.to.id(), self.from.id())
            };
            lo.hash(state);
            hi.hash(state);
        }
    }
}

impl fmt::Display for NetworkEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.directed { "->" } else { "--" };
        write!(f, "({} {} {})", self.from, arrow, self.to)
    }
}
