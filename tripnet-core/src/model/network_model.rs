//! Combined road and transit model for one time-of-day period

use crate::routing::{self, RoadPath, TransitTrip};
use crate::{Error, NodeId};

use super::network::NetworkGraph;
use super::transit::{RouteTravel, TransitData, TransitItinerary};

#[derive(Debug, Clone, Default)]
pub struct NetworkMeta {
    /// Period the network represents, e.g. "am" or "midday"
    pub name: String,
}

/// Road graph plus transit tables for one period.
///
/// Immutable once built; every query allocates its own working state, so
/// a model can be shared between threads by reference.
#[derive(Debug, Clone, Default)]
pub struct NetworkModel {
    pub graph: NetworkGraph,
    pub transit: TransitData,
    pub meta: NetworkMeta,
}

impl NetworkModel {
    pub fn new(graph: NetworkGraph, transit: TransitData, meta: NetworkMeta) -> Self {
        Self {
            graph,
            transit,
            meta,
        }
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    pub fn graph(&self) -> &NetworkGraph {
        &self.graph
    }

    pub fn transit(&self) -> &TransitData {
        &self.transit
    }

    /// Minimum generalized cost road path, `None` if unreachable
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if either end is not in the graph
    pub fn fastest_path(
        &self,
        origin: NodeId,
        destination: NodeId,
    ) -> Result<Option<RoadPath>, Error> {
        routing::fastest_path(&self.graph, origin, destination)
    }

    pub fn path_through_transit(
        &self,
        origin: NodeId,
        destination: NodeId,
    ) -> Option<&TransitItinerary> {
        self.transit.path_through_transit(origin, destination)
    }

    pub fn transit_segment_travel(
        &self,
        line: &str,
        origin_stop: NodeId,
        destination_stop: NodeId,
    ) -> Option<RouteTravel> {
        self.transit
            .travel_on_route_segments(line, origin_stop, destination_stop)
    }

    /// Itinerary between two nodes with every leg resolved
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if an auxiliary leg touches a node
    /// missing from the graph
    pub fn resolve_transit_trip(
        &self,
        origin: NodeId,
        destination: NodeId,
    ) -> Result<Option<TransitTrip>, Error> {
        routing::resolve_transit_trip(self, origin, destination)
    }
}
