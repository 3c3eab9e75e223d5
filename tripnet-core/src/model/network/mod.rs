//! Road and walk network model

pub mod components;
pub mod graph;

pub use components::{Link, Node, TurnRestriction};
pub use graph::NetworkGraph;
