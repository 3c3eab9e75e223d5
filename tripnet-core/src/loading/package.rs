use serde::{Deserialize, Serialize};

use crate::NodeId;
use crate::model::{Link, Node, TransitSegment, TurnRestriction};

/// Row of the secondary link attribute table carrying generalized costs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkCost {
    pub origin: NodeId,
    pub destination: NodeId,
    pub cost: f64,
}

/// Transit line with its stops in running order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitLine {
    pub name: String,
    pub stops: Vec<NodeId>,
}

/// Timetable result for one consecutive stop pair of a line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentTime {
    pub line: String,
    pub from: NodeId,
    pub to: NodeId,
    /// Which time the line serves this pair, starting at 1
    pub occurrence: usize,
    /// In-vehicle minutes from `from` to `to`
    pub minutes: f64,
}

/// Precomputed transit path between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryRecord {
    pub origin: NodeId,
    pub destination: NodeId,
    /// Rank of the path among the alternatives, only path 1 is used
    pub path_number: u32,
    pub segments: Vec<TransitSegment>,
}

/// Typed tables of one network package.
///
/// A table set to `None` is absent from the package, which is different
/// from a table that is present but empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkPackage {
    pub nodes: Option<Vec<Node>>,
    pub links: Option<Vec<Link>>,
    pub link_costs: Option<Vec<LinkCost>>,
    pub turns: Option<Vec<TurnRestriction>>,
    pub transit_lines: Option<Vec<TransitLine>>,
    pub segment_times: Option<Vec<SegmentTime>>,
    pub itineraries: Vec<ItineraryRecord>,
}

impl NetworkPackage {
    /// Package with empty required tables
    pub fn new() -> Self {
        Self {
            nodes: Some(Vec::new()),
            links: Some(Vec::new()),
            link_costs: Some(Vec::new()),
            turns: Some(Vec::new()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_nodes(mut self, nodes: Vec<Node>) -> Self {
        self.nodes = Some(nodes);
        self
    }

    #[must_use]
    pub fn with_links(mut self, links: Vec<Link>) -> Self {
        self.links = Some(links);
        self
    }

    #[must_use]
    pub fn with_link_costs(mut self, link_costs: Vec<LinkCost>) -> Self {
        self.link_costs = Some(link_costs);
        self
    }

    #[must_use]
    pub fn with_turns(mut self, turns: Vec<TurnRestriction>) -> Self {
        self.turns = Some(turns);
        self
    }

    #[must_use]
    pub fn with_transit(mut self, lines: Vec<TransitLine>, times: Vec<SegmentTime>) -> Self {
        self.transit_lines = Some(lines);
        self.segment_times = Some(times);
        self
    }

    #[must_use]
    pub fn with_itineraries(mut self, itineraries: Vec<ItineraryRecord>) -> Self {
        self.itineraries = itineraries;
        self
    }
}
