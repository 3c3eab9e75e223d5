//! Transit line tables and the stop-by-stop travel resolver

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use itertools::Itertools;

use super::types::{RouteStop, RouteTravel, TransitItinerary};
use crate::{Error, LinkKey, NodeId};

/// Transit side of a network: the ordered stops of every line and the
/// precomputed itineraries between node pairs.
#[derive(Debug, Clone, Default)]
pub struct TransitData {
    /// Stops of each line in running order
    lines: HashMap<String, Vec<RouteStop>>,
    /// First-choice itinerary per (origin, destination)
    itineraries: HashMap<LinkKey, TransitItinerary>,
}

impl TransitData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a line with zero travel times between its stops
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] if the line is already registered
    pub fn add_line(
        &mut self,
        name: impl Into<String>,
        stops: impl IntoIterator<Item = NodeId>,
    ) -> Result<(), Error> {
        match self.lines.entry(name.into()) {
            Entry::Occupied(entry) => Err(Error::InvalidData(format!(
                "transit line '{}' is defined twice",
                entry.key()
            ))),
            Entry::Vacant(entry) => {
                entry.insert(stops.into_iter().map(RouteStop::new).collect());
                Ok(())
            }
        }
    }

    /// Sets the in-vehicle minutes of the `occurrence`-th (1-based) time the
    /// line runs from stop `from` directly to stop `to`. Looping lines can
    /// serve the same stop pair several times.
    ///
    /// Returns `Ok(false)` when the line has no such occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownLine`] for an unregistered line and
    /// [`Error::InvalidData`] for an occurrence of zero
    pub fn set_segment_time(
        &mut self,
        line: &str,
        from: NodeId,
        to: NodeId,
        occurrence: usize,
        minutes: f64,
    ) -> Result<bool, Error> {
        if occurrence == 0 {
            return Err(Error::InvalidData(format!(
                "segment {from}->{to} on line '{line}' has occurrence 0, occurrences start at 1"
            )));
        }
        let stops = self
            .lines
            .get_mut(line)
            .ok_or_else(|| Error::UnknownLine(line.to_string()))?;

        let position = stops
            .iter()
            .tuple_windows()
            .positions(|(a, b)| a.node == from && b.node == to)
            .nth(occurrence - 1);

        Ok(match position {
            Some(pos) => {
                stops[pos + 1].minutes = minutes;
                true
            }
            None => false,
        })
    }

    /// Stores the itinerary between two nodes
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] if one is already stored for the pair
    pub fn add_itinerary(
        &mut self,
        destination: NodeId,
        itinerary: TransitItinerary,
    ) -> Result<(), Error> {
        let origin = itinerary.origin;
        match self.itineraries.entry((origin, destination)) {
            Entry::Occupied(_) => Err(Error::InvalidData(format!(
                "more than one itinerary from {origin} to {destination}"
            ))),
            Entry::Vacant(entry) => {
                entry.insert(itinerary);
                Ok(())
            }
        }
    }

    /// Precomputed itinerary between two nodes, if any
    pub fn path_through_transit(
        &self,
        origin: NodeId,
        destination: NodeId,
    ) -> Option<&TransitItinerary> {
        self.itineraries.get(&(origin, destination))
    }

    /// Stops ridden on `line` from `origin_stop` to `destination_stop`.
    ///
    /// When the origin stop comes around again before the destination is
    /// reached, boarding moves to that later visit. `None` when the line is
    /// unknown, does not serve the origin, or never reaches the destination
    /// after it.
    pub fn travel_on_route_segments(
        &self,
        line: &str,
        origin_stop: NodeId,
        destination_stop: NodeId,
    ) -> Option<RouteTravel> {
        let stops = self.lines.get(line)?;
        let start = stops.iter().position(|s| s.node == origin_stop)?;

        if origin_stop == destination_stop {
            return Some(RouteTravel {
                stops: vec![RouteStop::new(origin_stop)],
            });
        }

        let mut ridden = vec![stops[start]];
        for stop in &stops[start + 1..] {
            if stop.node == origin_stop {
                ridden.clear();
            }
            ridden.push(*stop);
            if stop.node == destination_stop {
                return Some(RouteTravel { stops: ridden });
            }
        }
        None
    }

    pub fn line(&self, name: &str) -> Option<&[RouteStop]> {
        self.lines.get(name).map(Vec::as_slice)
    }

    /// Every node referenced by a line or an itinerary
    pub fn referenced_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.lines
            .values()
            .flatten()
            .map(|s| s.node)
            .chain(self.itineraries.values().flat_map(TransitItinerary::nodes))
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn itinerary_count(&self) -> usize {
        self.itineraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.itineraries.is_empty()
    }
}
