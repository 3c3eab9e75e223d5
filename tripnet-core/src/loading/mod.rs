//! Building network models from pre-parsed network package tables.
//!
//! Parsing the package files is left to the caller; this module validates
//! the typed records and assembles one [`NetworkModel`](crate::NetworkModel)
//! per time-of-day period.

mod builder;
mod config;
mod package;

pub use builder::{NetworkSet, create_network, create_network_set};
pub use config::NetworkConfig;
pub use package::{ItineraryRecord, LinkCost, NetworkPackage, SegmentTime, TransitLine};
