//! Fractional positions along a single edge (linear referencing)

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::network::{NetworkEdge, NetworkVertex};

/// A fractional position in [0.0, 1.0] along one specific edge.
///
/// Fraction 0.0 is the edge's start per its direction flag, 1.0 its end.
/// Two locations are equal iff they reference the same edge and carry a
/// numerically identical fraction; fractions come from explicit endpoint
/// constants or subline arithmetic, not accumulated floating error, so
/// exact comparison is the contract.
#[derive(Debug, Clone)]
pub struct EdgeLocation {
    edge: Arc<NetworkEdge>,
    fraction: f64,
}

impl EdgeLocation {
    /// Fails with `FractionOutOfRange` outside [0.0, 1.0] — no clamping.
    pub fn new(edge: Arc<NetworkEdge>, fraction: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(Error::FractionOutOfRange(fraction));
        }
        // -0.0 compares equal to 0.0 but has different bits; normalize so
        // equality and hashing agree
        let fraction = if fraction == 0.0 { 0.0 } else { fraction };
        Ok(Self { edge, fraction })
    }

    /// Location at the edge's start (fraction 0.0)
    pub fn start(edge: Arc<NetworkEdge>) -> Self {
        Self {
            edge,
            fraction: 0.0,
        }
    }

    /// Location at the edge's end (fraction 1.0)
    pub fn end(edge: Arc<NetworkEdge>) -> Self {
        Self {
            edge,
            fraction: 1.0,
        }
    }

    pub fn edge(&self) -> &Arc<NetworkEdge> {
        &self.edge
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    pub fn is_start(&self) -> bool {
        self.fraction == 0.0
    }

    pub fn is_end(&self) -> bool {
        self.fraction == 1.0
    }

    /// True when the location sits exactly on one of the edge's endpoints
    pub fn is_extreme(&self) -> bool {
        self.is_start() || self.is_end()
    }

    /// The endpoint vertex this location coincides with, if any
    pub fn vertex(&self) -> Option<&Arc<NetworkVertex>> {
        if self.is_start() {
            Some(self.edge.from())
        } else if self.is_end() {
            Some(self.edge.to())
        } else {
            None
        }
    }
}

impl PartialEq for EdgeLocation {
    fn eq(&self, other: &Self) -> bool {
        self.edge == other.edge && self.fraction == other.fraction
    }
}

// Total: NaN fractions are rejected at construction
impl Eq for EdgeLocation {}

impl Hash for EdgeLocation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.edge.hash(state);
        self.fraction.to_bits().hash(state);
    }
}

impl fmt::Display for EdgeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.edge, self.fraction)
    }
}
