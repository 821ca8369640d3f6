//! waymatch — network path matching and linear referencing for map
//! conflation
//!
//! The core data structures used when reconciling two independently
//! digitized networks covering the same geography: directed paths through a
//! graph as ordered chains of whole or partial edges, fractional positions
//! anchoring locations along an edge, and the correspondence object that
//! declares two paths matched, with the containment/overlap/partial/stub
//! queries a candidate search needs to explore, prune, and deduplicate.
//!
//! Vertices and edges are supplied by an external network loader and shared
//! read-only; paths and matches are value objects with structural equality
//! and hashing, so a search merging worker results deduplicates through
//! ordinary hash containers.

pub mod edge_match;
pub mod edge_string;
pub mod error;
pub mod geo;
pub mod location;
pub mod mapping;
pub mod network;
pub mod subline;

pub use edge_match::{EdgeMatch, EdgeMatchSet};
pub use edge_string::{EdgeString, PathElement};
pub use error::{Error, Result};
pub use location::EdgeLocation;
pub use mapping::{NaiveWayMatchStringMapping, WayMatchStringMapping, WayNumber};
pub use network::{ElementId, NetworkEdge, NetworkVertex};
pub use subline::EdgeSubline;
