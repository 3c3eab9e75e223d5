use thiserror::Error;

use crate::{NodeId, ZoneId};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Unknown node {0}")]
    UnknownNode(NodeId),
    #[error("No link from {0} to {1}")]
    MissingLink(NodeId, NodeId),
    #[error("Unknown transit line '{0}'")]
    UnknownLine(String),
    #[error("Unknown zone {0}")]
    UnknownZone(ZoneId),
    #[error("Zone {0} has no centroid")]
    NoCentroidInZone(ZoneId),
    #[error("Network package is missing the {0} table")]
    MissingTable(&'static str),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
