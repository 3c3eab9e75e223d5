//! Data model for multimodal routing
//!
//! Contains the road network graph, the transit line tables and the
//! [`NetworkModel`] that bundles them for one time-of-day period.

pub mod network;
pub mod network_model;
pub mod transit;

pub use network_model::{NetworkMeta, NetworkModel};

pub use network::{Link, NetworkGraph, Node, TurnRestriction};
pub use transit::{
    RouteStop, RouteTravel, SegmentLine, TransitData, TransitItinerary, TransitSegment,
};
