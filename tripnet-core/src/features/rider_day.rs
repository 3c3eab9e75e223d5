use log::debug;
use serde::{Deserialize, Serialize};

use crate::NodeId;
use crate::model::NetworkGraph;

/// Stop-to-stop trip of a transit rider. Fare systems often record only
/// one end of a trip, so either stop may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StopTrip {
    pub origin: Option<NodeId>,
    pub destination: Option<NodeId>,
    pub start_minute: f64,
    pub end_minute: f64,
}

impl StopTrip {
    pub fn is_complete(&self) -> bool {
        self.origin.is_some() && self.destination.is_some()
    }
}

/// Completes a rider's day in place by chaining trips: a missing
/// destination is where the next trip boards, a missing origin is where
/// the previous trip alighted.
///
/// Returns `false` and leaves `trips` untouched when a stop cannot be
/// inferred or a stop is not in `graph`.
pub fn repair_rider_day(graph: &NetworkGraph, trips: &mut [StopTrip]) -> bool {
    let mut repaired = trips.to_vec();
    for i in 0..repaired.len() {
        if repaired[i].destination.is_none() {
            repaired[i].destination = trips.get(i + 1).and_then(|next| next.origin);
        }
        if repaired[i].origin.is_none() && i > 0 {
            repaired[i].origin = trips[i - 1].destination;
        }
    }

    for (i, trip) in repaired.iter().enumerate() {
        let (Some(origin), Some(destination)) = (trip.origin, trip.destination) else {
            debug!("Rider day dropped, trip {i} has a stop that cannot be inferred");
            return false;
        };
        if let Some(unknown) = [origin, destination].into_iter().find(|&n| !graph.has_node(n)) {
            debug!("Rider day dropped, trip {i} uses stop {unknown} outside the network");
            return false;
        }
    }

    trips.copy_from_slice(&repaired);
    true
}
