//! Ordered, contiguous chains of edges/sublines forming one path
//!
//! A path element is a closed tagged variant — a whole edge traversed
//! forward, or an arbitrary subline — because the element kinds are fixed
//! and every operation handles both exhaustively.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::location::EdgeLocation;
use crate::network::{ElementId, NetworkEdge, NetworkVertex};
use crate::subline::EdgeSubline;

/// One element of a path: a whole edge, or a portion of one.
///
/// Equality and hashing normalize, so a subline spanning the full
/// [0.0, 1.0] range forward is structurally equal to the raw edge.
#[derive(Debug, Clone)]
pub enum PathElement {
    Edge(Arc<NetworkEdge>),
    Subline(EdgeSubline),
}

impl PathElement {
    pub fn edge(&self) -> &Arc<NetworkEdge> {
        match self {
            PathElement::Edge(e) => e,
            PathElement::Subline(s) => s.edge(),
        }
    }

    /// Fraction at which traversal of this element begins
    pub fn start_fraction(&self) -> f64 {
        match self {
            PathElement::Edge(_) => 0.0,
            PathElement::Subline(s) => s.start().fraction(),
        }
    }

    /// Fraction at which traversal of this element ends
    pub fn end_fraction(&self) -> f64 {
        match self {
            PathElement::Edge(_) => 1.0,
            PathElement::Subline(s) => s.end().fraction(),
        }
    }

    pub fn start_location(&self) -> EdgeLocation {
        match self {
            PathElement::Edge(e) => EdgeLocation::start(Arc::clone(e)),
            PathElement::Subline(s) => s.start().clone(),
        }
    }

    pub fn end_location(&self) -> EdgeLocation {
        match self {
            PathElement::Edge(e) => EdgeLocation::end(Arc::clone(e)),
            PathElement::Subline(s) => s.end().clone(),
        }
    }

    /// Smaller extent fraction, regardless of traversal direction
    pub fn low(&self) -> f64 {
        self.start_fraction().min(self.end_fraction())
    }

    /// Larger extent fraction, regardless of traversal direction
    pub fn high(&self) -> f64 {
        self.start_fraction().max(self.end_fraction())
    }

    pub fn is_full(&self) -> bool {
        self.low() == 0.0 && self.high() == 1.0
    }

    pub fn is_partial(&self) -> bool {
        !self.is_full()
    }

    /// Materialize as a subline (a raw edge becomes the full forward range)
    pub fn subline(&self) -> EdgeSubline {
        match self {
            PathElement::Edge(e) => EdgeSubline::whole(Arc::clone(e)),
            PathElement::Subline(s) => s.clone(),
        }
    }

    /// Swap the traversal sense. A whole forward edge becomes a full
    /// backwards subline; a full backwards subline normalizes back to the
    /// raw edge, so double reversal restores the original representation.
    pub fn reverse(&mut self) {
        *self = self.reversed();
    }

    pub fn reversed(&self) -> Self {
        match self {
            PathElement::Edge(e) => {
                PathElement::Subline(EdgeSubline::whole_reversed(Arc::clone(e)))
            }
            PathElement::Subline(s) => PathElement::from(s.reversed()),
        }
    }
}

impl From<Arc<NetworkEdge>> for PathElement {
    fn from(edge: Arc<NetworkEdge>) -> Self {
        PathElement::Edge(edge)
    }
}

impl From<EdgeSubline> for PathElement {
    fn from(subline: EdgeSubline) -> Self {
        // Normalize the full forward range to the raw-edge representation
        if subline.is_full() && !subline.is_backwards() {
            PathElement::Edge(Arc::clone(subline.edge()))
        } else {
            PathElement::Subline(subline)
        }
    }
}

impl PartialEq for PathElement {
    fn eq(&self, other: &Self) -> bool {
        self.edge() == other.edge()
            && self.start_fraction() == other.start_fraction()
            && self.end_fraction() == other.end_fraction()
    }
}

impl Eq for PathElement {}

impl Hash for PathElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.edge().hash(state);
        self.start_fraction().to_bits().hash(state);
        self.end_fraction().to_bits().hash(state);
    }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathElement::Edge(e) => write!(f, "{}", e),
            PathElement::Subline(s) => write!(f, "{}", s),
        }
    }
}

/// An ordered, contiguous, non-empty sequence of path elements.
///
/// Non-emptiness is guaranteed by construction (`new` takes the first
/// element) and appending is the only growth operation, so the composed
/// endpoint accessors are infallible.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeString {
    elements: Vec<PathElement>,
}

impl EdgeString {
    pub fn new<T: Into<PathElement>>(first: T) -> Self {
        Self {
            elements: vec![first.into()],
        }
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    /// Extend the path with an element in its exact orientation.
    ///
    /// Fails with `NonContiguous` when the element does not begin where the
    /// path currently ends. Two positions coincide when they are the same
    /// (edge, fraction) location, or when both sit on a common vertex.
    pub fn append<T: Into<PathElement>>(&mut self, element: T) -> Result<()> {
        let element = element.into();
        let tail = self.to();
        let head = element.start_location();
        if !coincident(&tail, &head) {
            return Err(Error::NonContiguous(head.to_string(), tail.to_string()));
        }
        self.elements.push(element);
        Ok(())
    }

    /// Extend the path with a whole edge, orienting it to fit.
    ///
    /// An edge that connects by its far endpoint is appended as a full
    /// backwards subline, so callers can feed edges in whichever direction
    /// they were digitized.
    pub fn append_edge(&mut self, edge: Arc<NetworkEdge>) -> Result<()> {
        let tail = self.to();
        let Some(tail_vertex) = tail.vertex() else {
            return Err(Error::NonContiguous(edge.to_string(), tail.to_string()));
        };
        if edge.from() == tail_vertex {
            self.elements.push(PathElement::Edge(edge));
        } else if edge.to() == tail_vertex {
            tracing::trace!(edge = %edge, "appending edge reversed to continue path");
            self.elements
                .push(PathElement::Subline(EdgeSubline::whole_reversed(edge)));
        } else {
            return Err(Error::NonContiguous(edge.to_string(), tail.to_string()));
        }
        Ok(())
    }

    /// Location at the very start of the whole path
    pub fn from(&self) -> EdgeLocation {
        self.elements[0].start_location()
    }

    /// Location at the very end of the whole path
    pub fn to(&self) -> EdgeLocation {
        self.elements[self.elements.len() - 1].end_location()
    }

    pub fn first_edge(&self) -> &Arc<NetworkEdge> {
        self.elements[0].edge()
    }

    pub fn last_edge(&self) -> &Arc<NetworkEdge> {
        self.elements[self.elements.len() - 1].edge()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Arc<NetworkEdge>> + '_ {
        self.elements.iter().map(|el| el.edge())
    }

    pub fn contains_edge(&self, edge: &NetworkEdge) -> bool {
        self.elements.iter().any(|el| el.edge().as_ref() == edge)
    }

    /// True when the vertex is an endpoint of any contained edge
    pub fn contains_vertex(&self, vertex: &NetworkVertex) -> bool {
        self.elements
            .iter()
            .any(|el| el.edge().contains_vertex(vertex))
    }

    /// True when every underlying edge of `other` is contained here
    pub fn contains_string(&self, other: &EdgeString) -> bool {
        other.edges().all(|e| self.contains_edge(e))
    }

    /// True when some pair of elements shares a strictly intersecting
    /// extent on a common edge; abutting extents do not count.
    pub fn overlaps(&self, other: &EdgeString) -> bool {
        self.elements.iter().any(|a| {
            other
                .elements
                .iter()
                .any(|b| a.subline().overlaps(&b.subline()))
        })
    }

    /// True when any contained edge is a self-loop placeholder
    pub fn contains_stub(&self) -> bool {
        self.edges().any(|e| e.is_stub())
    }

    /// Extents of the elements that cover less than their whole edge,
    /// normalized to (low, high) so traversal direction is irrelevant
    pub fn partial_extents(&self) -> Vec<(f64, f64)> {
        self.elements
            .iter()
            .filter(|el| el.is_partial())
            .map(|el| (el.low(), el.high()))
            .collect()
    }

    /// Reverse the element order and the sense of every element, swapping
    /// `from`/`to` and first/last edges; the set of contained edges and
    /// vertices is unchanged.
    pub fn reverse(&mut self) {
        tracing::trace!(elements = self.elements.len(), "reversing edge string");
        self.elements.reverse();
        for element in &mut self.elements {
            element.reverse();
        }
    }

    // ------------------------------------------------------------------
    // Linear referencing along the whole path
    // ------------------------------------------------------------------

    /// Per-element traversal weights: physical edge length scaled by the
    /// extent span. Falls back to bare extent spans when every edge has
    /// zero length (stub-only paths), then to uniform weights, so the
    /// normalized offsets below stay well defined.
    fn element_weights(&self) -> Vec<f64> {
        let lengths: Vec<f64> = self
            .elements
            .iter()
            .map(|el| el.edge().length_m() * (el.high() - el.low()))
            .collect();
        if lengths.iter().sum::<f64>() > 0.0 {
            return lengths;
        }
        let spans: Vec<f64> = self
            .elements
            .iter()
            .map(|el| el.high() - el.low())
            .collect();
        if spans.iter().sum::<f64>() > 0.0 {
            return spans;
        }
        vec![1.0; self.elements.len()]
    }

    /// Normalized position of `location` along the whole path, in [0.0, 1.0].
    ///
    /// A location sitting on a boundary between two elements reports the
    /// position of the earlier one.
    pub fn position_of(&self, location: &EdgeLocation) -> Result<f64> {
        let weights = self.element_weights();
        let total: f64 = weights.iter().sum();
        let mut cum = 0.0;
        for (element, weight) in self.elements.iter().zip(&weights) {
            let f = location.fraction();
            if element.edge() == location.edge() && element.low() <= f && f <= element.high() {
                let span = element.high() - element.low();
                let t = if span == 0.0 {
                    0.0
                } else if element.start_fraction() <= element.end_fraction() {
                    (f - element.low()) / span
                } else {
                    (element.high() - f) / span
                };
                return Ok((cum + t * weight) / total);
            }
            cum += weight;
        }
        Err(Error::LocationNotOnPath(location.to_string()))
    }

    /// Location at normalized `position` along the whole path.
    ///
    /// When the position falls exactly on a boundary between two elements
    /// both answers are geometrically correct; `preferred` picks the
    /// element carrying that member way when one does, otherwise the
    /// earlier element is reported.
    pub fn location_at(&self, position: f64, preferred: Option<ElementId>) -> Result<EdgeLocation> {
        if !(0.0..=1.0).contains(&position) {
            return Err(Error::FractionOutOfRange(position));
        }
        // Endpoints are preserved exactly, not reconstructed from weight
        // arithmetic
        if position == 0.0 {
            return Ok(self.from());
        }
        if position == 1.0 {
            return Ok(self.to());
        }
        let weights = self.element_weights();
        let total: f64 = weights.iter().sum();
        let target = position * total;
        let last = self.elements.len() - 1;

        let mut cum = 0.0;
        for (i, weight) in weights.iter().enumerate() {
            let next = cum + weight;
            if target < next || i == last {
                let t = if *weight == 0.0 {
                    0.0
                } else {
                    ((target - cum) / weight).clamp(0.0, 1.0)
                };
                return self.element_location(i, t);
            }
            if target == next {
                // Exactly on the boundary: end of element i and start of
                // element i+1 coincide
                if let Some(id) = preferred {
                    if self.elements[i + 1].edge().members().contains(&id)
                        && !self.elements[i].edge().members().contains(&id)
                    {
                        return self.element_location(i + 1, 0.0);
                    }
                }
                return self.element_location(i, 1.0);
            }
            cum = next;
        }
        unreachable!("loop covers the final element")
    }

    /// Location at traversal parameter `t` within element `index`
    fn element_location(&self, index: usize, t: f64) -> Result<EdgeLocation> {
        let element = &self.elements[index];
        let start = element.start_fraction();
        let end = element.end_fraction();
        let fraction = (start + t * (end - start)).clamp(element.low(), element.high());
        EdgeLocation::new(Arc::clone(element.edge()), fraction)
    }
}

/// Whether two composed positions coincide for contiguity purposes
fn coincident(a: &EdgeLocation, b: &EdgeLocation) -> bool {
    if a == b {
        return true;
    }
    match (a.vertex(), b.vertex()) {
        (Some(va), Some(vb)) => va == vb,
        _ => false,
    }
}

impl fmt::Display for EdgeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", element)?;
        }
        write!(f, "]")
    }
}
