//! Network components - nodes, links and turn restrictions

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::{NO_ZONE, NodeId, ZoneId};

/// Network node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node number from the network package
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    /// Zone containing the node, `NO_ZONE` if none
    #[serde(default = "no_zone")]
    pub zone: ZoneId,
    /// Centroids stand for a whole zone and are never used as through-nodes
    #[serde(default)]
    pub is_centroid: bool,
}

fn no_zone() -> ZoneId {
    NO_ZONE
}

impl Node {
    pub fn new(id: NodeId, x: f64, y: f64) -> Self {
        Self {
            id,
            x,
            y,
            zone: NO_ZONE,
            is_centroid: false,
        }
    }

    /// Creates a centroid node for `zone`
    pub fn centroid(id: NodeId, x: f64, y: f64, zone: ZoneId) -> Self {
        Self {
            id,
            x,
            y,
            zone,
            is_centroid: true,
        }
    }

    #[must_use]
    pub fn in_zone(mut self, zone: ZoneId) -> Self {
        self.zone = zone;
        self
    }

    pub fn geometry(&self) -> Point<f64> {
        Point::new(self.x, self.y)
    }
}

/// Directed network link
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub origin: NodeId,
    pub destination: NodeId,
    /// Physical length
    pub distance: f64,
    /// Generalized cost minimized by the path search, negative when the
    /// link is closed to the mode being routed
    #[serde(default)]
    pub cost: f64,
    /// Travel time in minutes
    #[serde(default)]
    pub time: f64,
}

impl Link {
    pub fn new(origin: NodeId, destination: NodeId, distance: f64) -> Self {
        Self {
            origin,
            destination,
            distance,
            cost: 0.0,
            time: 0.0,
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    pub fn key(&self) -> (NodeId, NodeId) {
        (self.origin, self.destination)
    }

    pub fn is_traversable(&self) -> bool {
        self.cost >= 0.0
    }
}

/// Prohibited movement `incoming -> via -> outgoing`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnRestriction {
    pub incoming: NodeId,
    pub via: NodeId,
    pub outgoing: NodeId,
}

impl TurnRestriction {
    pub fn new(incoming: NodeId, via: NodeId, outgoing: NodeId) -> Self {
        Self {
            incoming,
            via,
            outgoing,
        }
    }
}
