//! Transit line tables and precomputed OD itineraries

pub mod data;
pub mod types;

pub use data::TransitData;
pub use types::{RouteStop, RouteTravel, SegmentLine, TransitItinerary, TransitSegment};
