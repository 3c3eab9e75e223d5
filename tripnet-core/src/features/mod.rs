//! Per-time-bin trip features: where in the day distance was travelled and
//! when each trip was under way.

mod config;
mod profile;
mod rider_day;
mod time_bins;
mod trace;
mod trip;
mod zones;

pub use config::FeatureConfig;
pub use profile::DayProfile;
pub use rider_day::{StopTrip, repair_rider_day};
pub use time_bins::{TimeBins, activity_mask};
pub use trace::{
    TraceDayProfile, TraceHop, TraceTrip, TraceTripFeatures, profile_trace_day, profile_trace_days,
};
pub use trip::{PersonDayProfile, TravelMode, TripRecord, profile_person_day, profile_person_days};
pub use zones::{ZoneDensity, ZoneTable};
