use itertools::Itertools;

use super::time_bins::TimeBins;
use crate::Error;
use crate::model::NetworkGraph;
use crate::routing::{RoadPath, TransitLeg, TransitTrip};

/// Distance travelled in each time bin of one day
#[derive(Debug, Clone, PartialEq)]
pub struct DayProfile {
    bins: TimeBins,
    distances: Vec<f64>,
}

impl DayProfile {
    pub fn new(bins: TimeBins) -> Self {
        Self {
            bins,
            distances: vec![0.0; bins.len()],
        }
    }

    pub fn bins(&self) -> &TimeBins {
        &self.bins
    }

    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    pub fn total_distance(&self) -> f64 {
        self.distances.iter().sum()
    }

    pub fn clear(&mut self) {
        self.distances.fill(0.0);
    }

    /// Adds `distance` to the bin holding `minute`. Returns `false` and
    /// drops the distance when the minute falls outside the day.
    pub fn add_distance_at(&mut self, minute: f64, distance: f64) -> bool {
        match self.bins.bin_of(minute) {
            Some(bin) => {
                self.distances[bin] += distance;
                true
            }
            None => false,
        }
    }

    /// Spreads a road path over the day starting at `start`. Each link's
    /// length lands in the bin of the clock when the link is left.
    ///
    /// Returns the arrival minute.
    ///
    /// # Errors
    ///
    /// Returns an error if the path has a link missing from `graph`
    pub fn add_road_path(
        &mut self,
        graph: &NetworkGraph,
        path: &RoadPath,
        start: f64,
    ) -> Result<f64, Error> {
        let mut clock = start;
        for &(origin, destination) in &path.links {
            clock += graph.time(origin, destination)?;
            self.add_distance_at(clock, graph.distance(origin, destination)?);
        }
        Ok(clock)
    }

    /// Spreads a transit trip over the day starting at `start`.
    ///
    /// Auxiliary legs carry no time and are booked at the current clock.
    /// Rides advance the clock stop by stop, each hop's length landing in
    /// the bin of its arrival. Returns the arrival minute.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if a ridden stop is missing from `graph`
    pub fn add_transit_trip(
        &mut self,
        graph: &NetworkGraph,
        trip: &TransitTrip,
        start: f64,
    ) -> Result<f64, Error> {
        let mut clock = start;
        for leg in &trip.legs {
            match leg {
                TransitLeg::Auxiliary { distance, .. } => {
                    self.add_distance_at(clock, *distance);
                }
                TransitLeg::InVehicle { stops, .. } => {
                    for (from, to) in stops.iter().tuple_windows() {
                        clock += to.minutes;
                        self.add_distance_at(clock, graph.distance(from.node, to.node)?);
                    }
                }
            }
        }
        Ok(clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Link, Node, RouteStop};

    fn line_graph() -> NetworkGraph {
        let mut graph = NetworkGraph::new();
        for id in 1..=4 {
            graph.add_node(Node::new(id, f64::from(id) * 100.0, 0.0));
        }
        graph
            .add_link(Link::new(1, 2, 100.0).with_time(3.0))
            .unwrap();
        graph
            .add_link(Link::new(2, 3, 100.0).with_time(1.0))
            .unwrap();
        graph
            .add_link(Link::new(3, 4, 100.0).with_time(6.0))
            .unwrap();
        graph
    }

    #[test]
    fn distances_outside_the_day_are_dropped() {
        let mut profile = DayProfile::new(TimeBins::default());
        assert!(profile.add_distance_at(7.0, 2.5));
        assert!(!profile.add_distance_at(1440.0, 9.0));
        assert!(!profile.add_distance_at(-1.0, 9.0));
        assert_eq!(profile.distances()[1], 2.5);
        assert_eq!(profile.total_distance(), 2.5);

        profile.clear();
        assert_eq!(profile.total_distance(), 0.0);
    }

    #[test]
    fn road_path_is_booked_at_link_arrivals() {
        let graph = line_graph();
        let path = RoadPath {
            links: vec![(1, 2), (2, 3), (3, 4)],
            cost: 0.0,
        };
        let mut profile = DayProfile::new(TimeBins::default());
        let arrival = profile.add_road_path(&graph, &path, 60.0).unwrap();

        assert_eq!(arrival, 70.0);
        // arrivals at 63, 64 and 70 minutes
        assert_eq!(profile.distances()[12], 200.0);
        assert_eq!(profile.distances()[14], 100.0);
        assert_eq!(profile.total_distance(), 300.0);
    }

    #[test]
    fn road_path_with_foreign_link_fails() {
        let graph = line_graph();
        let path = RoadPath {
            links: vec![(4, 1)],
            cost: 0.0,
        };
        let mut profile = DayProfile::new(TimeBins::default());
        assert_eq!(
            profile.add_road_path(&graph, &path, 0.0),
            Err(Error::MissingLink(4, 1))
        );
    }

    #[test]
    fn transit_trip_advances_along_stops() {
        let graph = line_graph();
        let trip = TransitTrip {
            origin: 1,
            destination: 4,
            legs: vec![
                TransitLeg::Auxiliary {
                    mode: 'a',
                    from: 1,
                    to: 2,
                    distance: 100.0,
                },
                TransitLeg::InVehicle {
                    mode: 'b',
                    line: "B1".to_string(),
                    stops: vec![
                        RouteStop { node: 2, minutes: 9.0 },
                        RouteStop { node: 3, minutes: 4.0 },
                        RouteStop { node: 4, minutes: 10.0 },
                    ],
                    distance: 200.0,
                },
            ],
        };
        let mut profile = DayProfile::new(TimeBins::default());
        let arrival = profile.add_transit_trip(&graph, &trip, 0.0).unwrap();

        assert_eq!(arrival, 14.0);
        assert_eq!(profile.distances()[0], 200.0);
        assert_eq!(profile.distances()[2], 100.0);
    }
}
