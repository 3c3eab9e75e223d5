//! Road network graph with turn restrictions and the zone centroid index

use geo::{Distance, Euclidean};
use hashbrown::{HashMap, HashSet};
use petgraph::graphmap::DiGraphMap;
use rand::Rng;

use super::components::{Link, Node, TurnRestriction};
use crate::{Error, NodeId, ZoneId};

/// Directed road network.
///
/// Nodes are keyed by their package number, links by their
/// (origin, destination) pair. Adjacency is kept by the link map in
/// link insertion order.
#[derive(Debug, Clone, Default)]
pub struct NetworkGraph {
    nodes: HashMap<NodeId, Node>,
    links: DiGraphMap<NodeId, Link>,
    turn_restrictions: HashSet<TurnRestriction>,
    centroids_in_zone: HashMap<ZoneId, Vec<NodeId>>,
}

impl NetworkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a node. Centroids are registered under their zone.
    pub fn add_node(&mut self, node: Node) {
        let id = node.id;
        if node.is_centroid {
            self.centroids_in_zone.entry(node.zone).or_default().push(id);
        }
        if let Some(previous) = self.nodes.insert(id, node) {
            if previous.is_centroid {
                self.unregister_centroid(previous.zone, id);
            }
        }
        self.links.add_node(id);
    }

    fn unregister_centroid(&mut self, zone: ZoneId, id: NodeId) {
        let Some(centroids) = self.centroids_in_zone.get_mut(&zone) else {
            return;
        };
        // The replacement was pushed last; drop the oldest registration
        if let Some(pos) = centroids.iter().position(|&c| c == id) {
            centroids.remove(pos);
        }
        if centroids.is_empty() {
            self.centroids_in_zone.remove(&zone);
        }
    }

    /// Adds a directed link. Both end nodes must already be present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if either end node is missing and
    /// [`Error::InvalidData`] if the node pair is already linked
    pub fn add_link(&mut self, link: Link) -> Result<(), Error> {
        self.validate_node(link.origin)?;
        self.validate_node(link.destination)?;
        if self.links.contains_edge(link.origin, link.destination) {
            return Err(Error::InvalidData(format!(
                "link {}->{} is defined twice",
                link.origin, link.destination
            )));
        }
        self.links.add_edge(link.origin, link.destination, link);
        Ok(())
    }

    /// Overwrites the generalized cost of an existing link
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingLink`] if there is no such link
    pub fn set_link_cost(
        &mut self,
        origin: NodeId,
        destination: NodeId,
        cost: f64,
    ) -> Result<(), Error> {
        let link = self
            .links
            .edge_weight_mut(origin, destination)
            .ok_or(Error::MissingLink(origin, destination))?;
        link.cost = cost;
        Ok(())
    }

    /// Prohibits the movement `incoming -> via -> outgoing`
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if any of the three nodes is missing
    pub fn add_turn_restriction(
        &mut self,
        incoming: NodeId,
        via: NodeId,
        outgoing: NodeId,
    ) -> Result<(), Error> {
        self.validate_node(incoming)?;
        self.validate_node(via)?;
        self.validate_node(outgoing)?;
        self.turn_restrictions
            .insert(TurnRestriction::new(incoming, via, outgoing));
        Ok(())
    }

    /// Length of the link between two nodes, or the straight-line distance
    /// when they are not directly linked (e.g. transit walk legs).
    /// Zero when `origin` is the sentinel or equals `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if the fallback needs a missing node
    pub fn distance(&self, origin: NodeId, destination: NodeId) -> Result<f64, Error> {
        if origin < 0 || origin == destination {
            return Ok(0.0);
        }
        match self.links.edge_weight(origin, destination) {
            Some(link) => Ok(link.distance),
            None => self.straight_line_distance(origin, destination),
        }
    }

    /// Euclidean distance between two node coordinates
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if either node is missing
    pub fn straight_line_distance(
        &self,
        origin: NodeId,
        destination: NodeId,
    ) -> Result<f64, Error> {
        let from = self.node(origin).ok_or(Error::UnknownNode(origin))?;
        let to = self.node(destination).ok_or(Error::UnknownNode(destination))?;
        Ok(Euclidean.distance(from.geometry(), to.geometry()))
    }

    /// Generalized cost of a link, zero for the sentinel origin
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingLink`] if there is no such link
    pub fn cost(&self, origin: NodeId, destination: NodeId) -> Result<f64, Error> {
        if origin < 0 {
            return Ok(0.0);
        }
        self.require_link(origin, destination).map(|link| link.cost)
    }

    /// Travel time of a link in minutes, zero for the sentinel origin
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingLink`] if there is no such link
    pub fn time(&self, origin: NodeId, destination: NodeId) -> Result<f64, Error> {
        if origin < 0 {
            return Ok(0.0);
        }
        self.require_link(origin, destination).map(|link| link.time)
    }

    /// Zone the node was assigned to
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if the node is missing
    pub fn zone(&self, node: NodeId) -> Result<ZoneId, Error> {
        self.node(node)
            .map(|n| n.zone)
            .ok_or(Error::UnknownNode(node))
    }

    pub fn has_node(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Picks one of the zone's centroids uniformly at random,
    /// `None` if the zone has no centroid
    pub fn pick_centroid_in_zone<R: Rng>(&self, zone: ZoneId, rng: &mut R) -> Option<NodeId> {
        let centroids = self.centroids_in_zone(zone);
        if centroids.is_empty() {
            return None;
        }
        Some(centroids[rng.random_range(0..centroids.len())])
    }

    pub fn centroids_in_zone(&self, zone: ZoneId) -> &[NodeId] {
        self.centroids_in_zone
            .get(&zone)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn node(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(&node)
    }

    pub fn link(&self, origin: NodeId, destination: NodeId) -> Option<&Link> {
        self.links.edge_weight(origin, destination)
    }

    /// Nodes directly reachable from `node`, in link insertion order
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.links.neighbors(node)
    }

    /// Links leaving `node`
    pub fn links_from(&self, node: NodeId) -> impl Iterator<Item = &Link> + '_ {
        self.links.edges(node).map(|(_, _, link)| link)
    }

    pub fn is_centroid(&self, node: NodeId) -> bool {
        self.nodes.get(&node).is_some_and(|n| n.is_centroid)
    }

    pub fn is_turn_restricted(&self, incoming: NodeId, via: NodeId, outgoing: NodeId) -> bool {
        self.turn_restrictions
            .contains(&TurnRestriction::new(incoming, via, outgoing))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.edge_count()
    }

    pub fn turn_restriction_count(&self) -> usize {
        self.turn_restrictions.len()
    }

    pub(crate) fn validate_node(&self, node: NodeId) -> Result<(), Error> {
        if self.has_node(node) {
            Ok(())
        } else {
            Err(Error::UnknownNode(node))
        }
    }

    fn require_link(&self, origin: NodeId, destination: NodeId) -> Result<&Link, Error> {
        self.links
            .edge_weight(origin, destination)
            .ok_or(Error::MissingLink(origin, destination))
    }
}
