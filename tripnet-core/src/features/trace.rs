use fixedbitset::FixedBitSet;
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::config::FeatureConfig;
use super::profile::DayProfile;
use super::time_bins::{TimeBins, activity_mask};
use super::zones::{ZoneDensity, ZoneTable};
use crate::{Error, ZoneId};

/// Zone a traced device was seen in, minutes from midnight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceHop {
    pub zone: ZoneId,
    pub minute: f64,
}

/// A trip observed as a sequence of zone sightings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceTrip {
    pub origin_zone: ZoneId,
    pub destination_zone: ZoneId,
    pub start_minute: f64,
    pub end_minute: f64,
    #[serde(default)]
    pub hops: Vec<TraceHop>,
}

impl TraceTrip {
    pub fn is_intrazonal(&self) -> bool {
        self.origin_zone == self.destination_zone
    }
}

/// Per-trip features of a traced trip
#[derive(Debug, Clone, PartialEq)]
pub struct TraceTripFeatures {
    pub origin_zone: ZoneId,
    pub destination_zone: ZoneId,
    pub start_minute: f64,
    pub activity: FixedBitSet,
    pub origin_density: ZoneDensity,
    pub destination_density: ZoneDensity,
    /// Straight-line distance from origin to destination zone
    pub distance: f64,
}

/// Features of one traced day
#[derive(Debug, Clone, PartialEq)]
pub struct TraceDayProfile {
    /// Zone-to-zone distance travelled per time bin over all trips
    pub profile: DayProfile,
    /// One entry per trip that leaves its zone, starts within the day and
    /// has a duration
    pub trips: Vec<TraceTripFeatures>,
}

/// Books the distance of a traced day into time bins.
///
/// Each hop adds the distance from the previous zone (the trip origin for
/// the first hop) to the bin it was seen in. The first hop outside the day
/// ends the trip. A trip without hops books its origin to destination
/// distance at the middle of the trip; trips of zero duration book nothing.
///
/// # Errors
///
/// Returns [`Error::UnknownZone`] if a trip names a zone missing from `zones`
pub fn profile_trace_day(
    zones: &ZoneTable,
    trips: &[TraceTrip],
    bins: &TimeBins,
) -> Result<TraceDayProfile, Error> {
    let mut day = TraceDayProfile {
        profile: DayProfile::new(*bins),
        trips: Vec::new(),
    };

    for trip in trips {
        let mut previous = trip.origin_zone;
        for hop in &trip.hops {
            if bins.bin_of(hop.minute).is_none() {
                break;
            }
            day.profile
                .add_distance_at(hop.minute, zones.distance(previous, hop.zone)?);
            previous = hop.zone;
        }
        if trip.hops.is_empty() && trip.start_minute != trip.end_minute {
            let middle = (trip.start_minute + trip.end_minute) / 2.0;
            day.profile
                .add_distance_at(middle, zones.distance(previous, trip.destination_zone)?);
        }
    }

    for trip in trips {
        if trip.is_intrazonal() || trip.start_minute == trip.end_minute {
            continue;
        }
        let Some(activity) = activity_mask(bins, trip.start_minute, trip.end_minute) else {
            continue;
        };
        day.trips.push(TraceTripFeatures {
            origin_zone: trip.origin_zone,
            destination_zone: trip.destination_zone,
            start_minute: trip.start_minute,
            activity,
            origin_density: zones.density(trip.origin_zone),
            destination_density: zones.density(trip.destination_zone),
            distance: zones.distance(trip.origin_zone, trip.destination_zone)?,
        });
    }

    Ok(day)
}

/// Profiles many traced days in parallel, output aligned with `days`.
/// A day naming an unknown zone fails in its own slot.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] for an invalid config
pub fn profile_trace_days(
    zones: &ZoneTable,
    days: &[Vec<TraceTrip>],
    config: &FeatureConfig,
) -> Result<Vec<Result<TraceDayProfile, Error>>, Error> {
    config.validate()?;
    let bins = config.time_bins()?;

    info!("Profiling {} traced days over {} zones", days.len(), zones.len());

    let profiles: Vec<_> = days
        .par_iter()
        .map(|trips| profile_trace_day(zones, trips, &bins))
        .collect();

    let dropped = profiles.iter().filter(|day| day.is_err()).count();
    if dropped > 0 {
        warn!("{dropped} of {} traced days could not be profiled", days.len());
    }
    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1 at the origin, 2 five units away, 3 between them on the x axis
    fn zones() -> ZoneTable {
        let mut zones = ZoneTable::new();
        zones.insert_zone(1, 0.0, 0.0);
        zones.insert_zone(2, 3.0, 4.0);
        zones.insert_zone(3, 3.0, 0.0);
        zones.set_density(
            1,
            ZoneDensity {
                population: 100.0,
                employment: 50.0,
                households: 20.0,
            },
        );
        zones
    }

    fn trip(origin: ZoneId, destination: ZoneId, start: f64, end: f64) -> TraceTrip {
        TraceTrip {
            origin_zone: origin,
            destination_zone: destination,
            start_minute: start,
            end_minute: end,
            hops: Vec::new(),
        }
    }

    fn hop(zone: ZoneId, minute: f64) -> TraceHop {
        TraceHop { zone, minute }
    }

    #[test]
    fn hops_are_booked_in_their_bins() {
        let mut traced = trip(1, 2, 480.0, 500.0);
        traced.hops = vec![hop(3, 484.0), hop(2, 491.0)];
        let day = profile_trace_day(&zones(), &[traced], &TimeBins::default()).unwrap();

        assert_eq!(day.profile.distances()[96], 3.0);
        assert_eq!(day.profile.distances()[98], 4.0);
        assert_eq!(day.profile.total_distance(), 7.0);
    }

    #[test]
    fn trip_without_hops_is_booked_at_its_middle() {
        let day = profile_trace_day(
            &zones(),
            &[trip(2, 1, 600.0, 620.0), trip(1, 2, 300.0, 300.0)],
            &TimeBins::default(),
        )
        .unwrap();

        assert_eq!(day.profile.distances()[122], 5.0);
        assert_eq!(day.profile.total_distance(), 5.0);
        assert_eq!(day.trips.len(), 1);
    }

    #[test]
    fn hops_past_the_day_end_the_trip() {
        let mut traced = trip(1, 3, 1430.0, 1450.0);
        traced.hops = vec![hop(2, 1435.0), hop(3, 1445.0), hop(1, 1439.0)];
        let day = profile_trace_day(&zones(), &[traced], &TimeBins::default()).unwrap();

        assert_eq!(day.profile.distances()[287], 5.0);
        assert_eq!(day.profile.total_distance(), 5.0);

        let features = &day.trips[0];
        assert_eq!(features.activity.ones().collect::<Vec<_>>(), vec![286, 287]);
    }

    #[test]
    fn trip_features_carry_densities_and_distance() {
        let trips = [
            trip(1, 2, 2.0, 12.0),
            trip(3, 3, 700.0, 710.0),
            trip(2, 1, -5.0, 10.0),
        ];
        let day = profile_trace_day(&zones(), &trips, &TimeBins::default()).unwrap();

        assert_eq!(day.trips.len(), 1);
        let features = &day.trips[0];
        assert_eq!((features.origin_zone, features.destination_zone), (1, 2));
        assert_eq!(features.start_minute, 2.0);
        assert_eq!(features.activity.ones().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(features.origin_density.population, 100.0);
        assert_eq!(features.origin_density.households, 20.0);
        assert_eq!(features.destination_density, ZoneDensity::default());
        assert_eq!(features.distance, 5.0);
    }

    #[test]
    fn unknown_hop_zone_fails_the_day() {
        let mut traced = trip(1, 2, 480.0, 500.0);
        traced.hops = vec![hop(9, 484.0)];
        assert_eq!(
            profile_trace_day(&zones(), &[traced], &TimeBins::default()),
            Err(Error::UnknownZone(9))
        );
    }

    #[test]
    fn parallel_days_fail_independently() {
        let days = vec![
            vec![trip(1, 2, 60.0, 80.0)],
            vec![trip(1, 7, 60.0, 80.0)],
            vec![trip(3, 2, 90.0, 100.0)],
        ];
        let profiles = profile_trace_days(&zones(), &days, &FeatureConfig::default()).unwrap();

        assert_eq!(profiles.len(), 3);
        assert_eq!(profiles[1], Err(Error::UnknownZone(7)));
        assert_eq!(profiles[0].as_ref().unwrap().profile.total_distance(), 5.0);
        assert_eq!(profiles[2].as_ref().unwrap().profile.total_distance(), 4.0);
    }
}
