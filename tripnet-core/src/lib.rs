//! Routing core for turning travel diaries and traces into per-time-bin
//! trip features.
//!
//! A [`NetworkModel`] holds one time-of-day network: a road graph with turn
//! restrictions and the transit line tables that come with it. Models are
//! built once from pre-parsed records (see [`loading`]) and are read-only
//! afterwards, so they can be shared across any number of query threads.

pub mod error;
pub mod features;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use model::{NetworkGraph, NetworkModel, TransitData};

/// Node number as used by the network package
pub type NodeId = i32;
/// Zone number, `NO_ZONE` when a node lies outside every zone
pub type ZoneId = i32;
/// A directed link addressed by its (origin, destination) node pair
pub type LinkKey = (NodeId, NodeId);

/// Sentinel node number, used as the parent origin of the first link of a path
pub const NO_NODE: NodeId = -1;
/// Zone number assigned to nodes outside of every zone
pub const NO_ZONE: ZoneId = -1;
