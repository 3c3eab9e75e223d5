use serde::{Deserialize, Serialize};

use crate::NodeId;

/// One stop on a line with the in-vehicle minutes from the previous
/// recorded stop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    pub node: NodeId,
    pub minutes: f64,
}

impl RouteStop {
    pub fn new(node: NodeId) -> Self {
        Self { node, minutes: 0.0 }
    }
}

/// What carried the traveller to a segment's node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentLine {
    /// Walk or other non-vehicle access between stops
    Auxiliary,
    /// Named transit line
    Line(String),
}

impl SegmentLine {
    pub fn line_name(&self) -> Option<&str> {
        match self {
            SegmentLine::Auxiliary => None,
            SegmentLine::Line(name) => Some(name),
        }
    }
}

/// One hop of an itinerary, ending at `node`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitSegment {
    pub mode: char,
    pub line: SegmentLine,
    pub node: NodeId,
}

impl TransitSegment {
    pub fn auxiliary(mode: char, node: NodeId) -> Self {
        Self {
            mode,
            line: SegmentLine::Auxiliary,
            node,
        }
    }

    pub fn on_line(mode: char, line: impl Into<String>, node: NodeId) -> Self {
        Self {
            mode,
            line: SegmentLine::Line(line.into()),
            node,
        }
    }
}

/// Precomputed transit path between two nodes.
///
/// The origin is kept apart from the hops: each segment describes how the
/// traveller got from the previous node to its own node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitItinerary {
    pub origin: NodeId,
    pub segments: Vec<TransitSegment>,
}

impl TransitItinerary {
    pub fn new(origin: NodeId, segments: Vec<TransitSegment>) -> Self {
        Self { origin, segments }
    }

    /// Node where the itinerary ends, the origin when it has no hops
    pub fn destination(&self) -> NodeId {
        self.segments.last().map_or(self.origin, |s| s.node)
    }

    /// All visited nodes, starting with the origin
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::once(self.origin).chain(self.segments.iter().map(|s| s.node))
    }

    /// Pairs every hop with the node it starts from
    pub fn hops(&self) -> impl Iterator<Item = (NodeId, &TransitSegment)> + '_ {
        self.nodes().zip(self.segments.iter())
    }
}

/// Stops ridden on one line between a boarding and an alighting stop,
/// both included
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTravel {
    pub stops: Vec<RouteStop>,
}

impl RouteTravel {
    pub fn boarding(&self) -> Option<NodeId> {
        self.stops.first().map(|s| s.node)
    }

    pub fn alighting(&self) -> Option<NodeId> {
        self.stops.last().map(|s| s.node)
    }

    /// Minutes spent on board; the boarding stop's own time belongs to
    /// the hop before it
    pub fn in_vehicle_minutes(&self) -> f64 {
        self.stops.iter().skip(1).map(|s| s.minutes).sum()
    }
}
