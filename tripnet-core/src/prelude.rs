pub use crate::{Error, LinkKey, NO_NODE, NO_ZONE, NodeId, ZoneId};

// Network model and its records
pub use crate::model::{
    Link, NetworkGraph, NetworkModel, Node, RouteStop, RouteTravel, SegmentLine, TransitData,
    TransitItinerary, TransitSegment, TurnRestriction,
};

// Building networks
pub use crate::loading::{
    ItineraryRecord, LinkCost, NetworkConfig, NetworkPackage, NetworkSet, SegmentTime,
    TransitLine, create_network, create_network_set,
};

// Queries
pub use crate::routing::{
    IndexedMinHeap, RoadPath, TransitLeg, TransitTrip, fastest_path, resolve_transit_trip,
};

// Trip features
pub use crate::features::{
    DayProfile, FeatureConfig, PersonDayProfile, StopTrip, TimeBins, TraceDayProfile, TraceHop,
    TraceTrip, TraceTripFeatures, TravelMode, TripRecord, ZoneDensity, ZoneTable, activity_mask,
    profile_person_day, profile_person_days, profile_trace_day, profile_trace_days,
    repair_rider_day,
};
