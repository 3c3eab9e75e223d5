use fixedbitset::FixedBitSet;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::config::FeatureConfig;
use super::profile::DayProfile;
use super::time_bins::{TimeBins, activity_mask};
use crate::model::NetworkModel;
use crate::{Error, ZoneId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TravelMode {
    Auto,
    Transit,
    /// Walk or bike, routed on the road network
    Active,
}

/// One zone-to-zone trip of a person day, times in minutes from midnight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub origin_zone: ZoneId,
    pub destination_zone: ZoneId,
    pub start_minute: f64,
    pub end_minute: f64,
    pub mode: TravelMode,
}

impl TripRecord {
    pub fn is_intrazonal(&self) -> bool {
        self.origin_zone == self.destination_zone
    }
}

/// Features of one person day
#[derive(Debug, Clone, PartialEq)]
pub struct PersonDayProfile {
    /// Distance travelled per time bin over all routed trips
    pub profile: DayProfile,
    /// Bins each trip was under way, aligned with the input trips.
    /// `None` for intrazonal trips and trips starting outside the day.
    pub activities: Vec<Option<FixedBitSet>>,
    pub routed: usize,
    pub intrazonal: usize,
    pub unreachable: usize,
}

impl PersonDayProfile {
    fn new(bins: TimeBins, trips: usize) -> Self {
        Self {
            profile: DayProfile::new(bins),
            activities: Vec::with_capacity(trips),
            routed: 0,
            intrazonal: 0,
            unreachable: 0,
        }
    }
}

/// Routes every trip of a person day between centroids picked in its
/// zones and books the travelled distance into time bins.
///
/// Auto and active trips follow the fastest road path, transit trips the
/// stored itinerary. Intrazonal trips and trips without a path are counted
/// and left out of the distance profile.
///
/// # Errors
///
/// Returns [`Error::NoCentroidInZone`] if a trip end lies in a zone without
/// centroids, or any routing error
pub fn profile_person_day<R: Rng>(
    model: &NetworkModel,
    trips: &[TripRecord],
    bins: &TimeBins,
    rng: &mut R,
) -> Result<PersonDayProfile, Error> {
    let mut day = PersonDayProfile::new(*bins, trips.len());

    for trip in trips {
        if trip.is_intrazonal() {
            day.intrazonal += 1;
            day.activities.push(None);
            continue;
        }
        day.activities
            .push(activity_mask(bins, trip.start_minute, trip.end_minute));

        let origin = model
            .graph
            .pick_centroid_in_zone(trip.origin_zone, rng)
            .ok_or(Error::NoCentroidInZone(trip.origin_zone))?;
        let destination = model
            .graph
            .pick_centroid_in_zone(trip.destination_zone, rng)
            .ok_or(Error::NoCentroidInZone(trip.destination_zone))?;

        let routed = match trip.mode {
            TravelMode::Auto | TravelMode::Active => {
                match model.fastest_path(origin, destination)? {
                    Some(path) => {
                        day.profile
                            .add_road_path(&model.graph, &path, trip.start_minute)?;
                        true
                    }
                    None => false,
                }
            }
            TravelMode::Transit => match model.resolve_transit_trip(origin, destination)? {
                Some(transit_trip) => {
                    day.profile
                        .add_transit_trip(&model.graph, &transit_trip, trip.start_minute)?;
                    true
                }
                None => false,
            },
        };

        if routed {
            day.routed += 1;
        } else {
            debug!(
                "No {:?} path from zone {} ({origin}) to zone {} ({destination})",
                trip.mode, trip.origin_zone, trip.destination_zone
            );
            day.unreachable += 1;
        }
    }

    Ok(day)
}

/// Profiles many person days in parallel.
///
/// Day `i` draws its centroids from an RNG seeded with `config.seed + i`,
/// so results do not depend on thread scheduling. The output is aligned
/// with `days`; a day that fails (e.g. a zone without centroids) is
/// reported in its own slot and does not affect the others.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] for an invalid config
pub fn profile_person_days(
    model: &NetworkModel,
    days: &[Vec<TripRecord>],
    config: &FeatureConfig,
) -> Result<Vec<Result<PersonDayProfile, Error>>, Error> {
    config.validate()?;
    let bins = config.time_bins()?;

    info!(
        "Profiling {} person days on network '{}'",
        days.len(),
        model.name()
    );

    let profiles: Vec<_> = days
        .par_iter()
        .enumerate()
        .map(|(index, trips)| {
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(index as u64));
            profile_person_day(model, trips, &bins, &mut rng)
        })
        .collect();

    let dropped = profiles.iter().filter(|day| day.is_err()).count();
    if dropped > 0 {
        warn!("{dropped} of {} person days could not be profiled", days.len());
    }
    let unreachable: usize = profiles
        .iter()
        .flatten()
        .map(|day| day.unreachable)
        .sum();
    if unreachable > 0 {
        warn!("{unreachable} trips had no path and were left out of the profiles");
    }
    Ok(profiles)
}
