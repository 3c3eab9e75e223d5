use itertools::Itertools;

use crate::model::{NetworkModel, RouteStop, SegmentLine};
use crate::{Error, NodeId};

/// One leg of a resolved transit trip
#[derive(Debug, Clone, PartialEq)]
pub enum TransitLeg {
    /// Walk or other access movement between two nodes
    Auxiliary {
        mode: char,
        from: NodeId,
        to: NodeId,
        distance: f64,
    },
    /// Ride on a line, boarding and alighting stops included
    InVehicle {
        mode: char,
        line: String,
        stops: Vec<RouteStop>,
        distance: f64,
    },
}

impl TransitLeg {
    pub fn distance(&self) -> f64 {
        match self {
            TransitLeg::Auxiliary { distance, .. } | TransitLeg::InVehicle { distance, .. } => {
                *distance
            }
        }
    }

    pub fn mode(&self) -> char {
        match self {
            TransitLeg::Auxiliary { mode, .. } | TransitLeg::InVehicle { mode, .. } => *mode,
        }
    }

    pub fn in_vehicle_minutes(&self) -> f64 {
        match self {
            TransitLeg::Auxiliary { .. } => 0.0,
            TransitLeg::InVehicle { stops, .. } => stops.iter().skip(1).map(|s| s.minutes).sum(),
        }
    }
}

/// Transit itinerary with every leg resolved against the network
#[derive(Debug, Clone, PartialEq)]
pub struct TransitTrip {
    pub origin: NodeId,
    pub destination: NodeId,
    pub legs: Vec<TransitLeg>,
}

impl TransitTrip {
    pub fn total_distance(&self) -> f64 {
        self.legs.iter().map(TransitLeg::distance).sum()
    }

    pub fn in_vehicle_minutes(&self) -> f64 {
        self.legs.iter().map(TransitLeg::in_vehicle_minutes).sum()
    }

    /// Number of vehicles boarded
    pub fn boardings(&self) -> usize {
        self.legs
            .iter()
            .filter(|leg| matches!(leg, TransitLeg::InVehicle { .. }))
            .count()
    }
}

/// Looks up the itinerary from `origin` to `destination` and resolves it
/// leg by leg. Auxiliary legs are measured on the road graph; in-vehicle
/// legs are expanded to the stops ridden on their line.
///
/// Returns `Ok(None)` if there is no itinerary or a ride cannot be matched
/// on its line.
///
/// # Errors
///
/// Returns [`Error::UnknownNode`] if a leg touches a node missing from the
/// road graph
pub fn resolve_transit_trip(
    model: &NetworkModel,
    origin: NodeId,
    destination: NodeId,
) -> Result<Option<TransitTrip>, Error> {
    let Some(itinerary) = model.path_through_transit(origin, destination) else {
        log::trace!("No transit itinerary from {origin} to {destination}");
        return Ok(None);
    };

    let mut legs = Vec::with_capacity(itinerary.segments.len());
    for (from, segment) in itinerary.hops() {
        let leg = match &segment.line {
            SegmentLine::Auxiliary => TransitLeg::Auxiliary {
                mode: segment.mode,
                from,
                to: segment.node,
                distance: model.graph.distance(from, segment.node)?,
            },
            SegmentLine::Line(line) => {
                let Some(travel) = model.transit_segment_travel(line, from, segment.node) else {
                    log::debug!(
                        "Line '{line}' does not run from {from} to {}, dropping transit trip {origin}->{destination}",
                        segment.node
                    );
                    return Ok(None);
                };
                let distance = ride_distance(model, &travel.stops)?;
                TransitLeg::InVehicle {
                    mode: segment.mode,
                    line: line.clone(),
                    stops: travel.stops,
                    distance,
                }
            }
        };
        legs.push(leg);
    }

    Ok(Some(TransitTrip {
        origin,
        destination,
        legs,
    }))
}

fn ride_distance(model: &NetworkModel, stops: &[RouteStop]) -> Result<f64, Error> {
    stops
        .iter()
        .tuple_windows()
        .map(|(a, b)| model.graph.distance(a.node, b.node))
        .sum()
}
