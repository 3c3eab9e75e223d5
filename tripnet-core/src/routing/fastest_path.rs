//! Least generalized cost search over the road network.
//!
//! The search labels links rather than nodes: a turn restriction forbids
//! going from one link to another through a via node, so whether a link
//! can be extended depends on the link it was reached by.

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use super::heap::IndexedMinHeap;
use crate::model::NetworkGraph;
use crate::{Error, LinkKey, NO_NODE, NodeId};

/// Road path as an ordered list of links
#[derive(Debug, Clone, PartialEq)]
pub struct RoadPath {
    pub links: Vec<LinkKey>,
    /// Generalized cost accumulated by the search
    pub cost: f64,
}

impl RoadPath {
    fn empty() -> Self {
        Self {
            links: Vec::new(),
            cost: 0.0,
        }
    }

    /// True for the trivial path from a node to itself
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Visited nodes from origin to destination
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes = Vec::with_capacity(self.links.len() + 1);
        if let Some(&(origin, _)) = self.links.first() {
            nodes.push(origin);
        }
        nodes.extend(self.links.iter().map(|&(_, destination)| destination));
        nodes
    }

    /// Sum of link travel times in minutes
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingLink`] if the path does not belong to `graph`
    pub fn total_time(&self, graph: &NetworkGraph) -> Result<f64, Error> {
        self.links.iter().map(|&(o, d)| graph.time(o, d)).sum()
    }

    /// Sum of link lengths
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if the path does not belong to `graph`
    pub fn total_distance(&self, graph: &NetworkGraph) -> Result<f64, Error> {
        self.links.iter().map(|&(o, d)| graph.distance(o, d)).sum()
    }

    /// Sum of link generalized costs as currently stored in `graph`
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingLink`] if the path does not belong to `graph`
    pub fn total_cost(&self, graph: &NetworkGraph) -> Result<f64, Error> {
        self.links.iter().map(|&(o, d)| graph.cost(o, d)).sum()
    }
}

/// Finds the minimum generalized cost path from `origin` to `destination`.
///
/// Links with a negative cost are closed and restricted turns are never
/// taken. Beyond the first link, the path never enters a centroid other
/// than the destination.
/// Returns `Ok(None)` when the destination cannot be reached.
///
/// # Errors
///
/// Returns [`Error::UnknownNode`] if either end is not in the graph
pub fn fastest_path(
    graph: &NetworkGraph,
    origin: NodeId,
    destination: NodeId,
) -> Result<Option<RoadPath>, Error> {
    graph.validate_node(origin)?;
    graph.validate_node(destination)?;

    if origin == destination {
        return Ok(Some(RoadPath::empty()));
    }

    let root: LinkKey = (NO_NODE, origin);
    let mut settled: HashMap<LinkKey, LinkKey> = HashMap::new();
    let mut frontier = IndexedMinHeap::new();

    // Any link out of the origin may start the path, even into a centroid
    for link in graph.links_from(origin).filter(|link| link.is_traversable()) {
        frontier.push(link.key(), root, link.cost);
    }

    while let Some(current) = frontier.pop_min() {
        // The first pop of a link is final
        match settled.entry(current.link) {
            Entry::Occupied(_) => continue,
            Entry::Vacant(entry) => {
                entry.insert(current.parent);
            }
        }

        let (from, via) = current.link;
        if via == destination {
            let links = unwind(&settled, current.link);
            return Ok(Some(RoadPath {
                links,
                cost: current.cost,
            }));
        }

        for next in graph.links_from(via) {
            let key = next.key();
            if settled.contains_key(&key)
                || !can_enter(graph, next.destination, destination)
                || graph.is_turn_restricted(from, via, next.destination)
                || !next.is_traversable()
            {
                continue;
            }
            frontier.push(key, current.link, current.cost + next.cost);
        }
    }

    log::trace!("No road path from {origin} to {destination}");
    Ok(None)
}

// Centroids stand for unrelated trip ends unless they are the target
fn can_enter(graph: &NetworkGraph, node: NodeId, destination: NodeId) -> bool {
    node == destination || !graph.is_centroid(node)
}

fn unwind(settled: &HashMap<LinkKey, LinkKey>, last: LinkKey) -> Vec<LinkKey> {
    let mut links = vec![last];
    let mut current = last;
    while let Some(&parent) = settled.get(&current) {
        if parent.0 == NO_NODE {
            break;
        }
        links.push(parent);
        current = parent;
    }
    links.reverse();
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Link, Node};

    fn graph(nodes: &[NodeId], links: &[(NodeId, NodeId, f64)]) -> NetworkGraph {
        let mut graph = NetworkGraph::new();
        for &id in nodes {
            graph.add_node(Node::new(id, f64::from(id), 0.0));
        }
        for &(o, d, cost) in links {
            graph
                .add_link(Link::new(o, d, 1.0).with_cost(cost).with_time(cost / 2.0))
                .unwrap();
        }
        graph
    }

    #[test]
    fn picks_cheapest_of_two_routes() {
        let g = graph(
            &[1, 2, 3, 4],
            &[(1, 2, 1.0), (2, 4, 10.0), (1, 3, 4.0), (3, 4, 4.0)],
        );
        let path = fastest_path(&g, 1, 4).unwrap().unwrap();
        assert_eq!(path.links, vec![(1, 3), (3, 4)]);
        assert_eq!(path.cost, 8.0);
        assert_eq!(path.nodes(), vec![1, 3, 4]);
        assert_eq!(path.total_cost(&g).unwrap(), 8.0);
        assert_eq!(path.total_time(&g).unwrap(), 4.0);
        assert_eq!(path.total_distance(&g).unwrap(), 2.0);
    }

    #[test]
    fn same_origin_and_destination_is_trivial() {
        let g = graph(&[1, 2], &[(1, 2, 1.0), (2, 1, 1.0)]);
        let path = fastest_path(&g, 1, 1).unwrap().unwrap();
        assert!(path.is_empty());
        assert_eq!(path.cost, 0.0);
        assert!(path.nodes().is_empty());
    }

    #[test]
    fn unreachable_destination_is_none() {
        let g = graph(&[1, 2, 3], &[(1, 2, 1.0), (3, 2, 1.0)]);
        assert_eq!(fastest_path(&g, 1, 3).unwrap(), None);
    }

    #[test]
    fn unknown_nodes_are_errors() {
        let g = graph(&[1, 2], &[(1, 2, 1.0)]);
        assert_eq!(fastest_path(&g, 1, 5), Err(Error::UnknownNode(5)));
        assert_eq!(fastest_path(&g, 6, 2), Err(Error::UnknownNode(6)));
    }

    #[test]
    fn negative_cost_links_are_closed() {
        let g = graph(&[1, 2, 3], &[(1, 3, -1.0), (1, 2, 3.0), (2, 3, 3.0)]);
        let path = fastest_path(&g, 1, 3).unwrap().unwrap();
        assert_eq!(path.links, vec![(1, 2), (2, 3)]);

        let closed = graph(&[1, 2], &[(1, 2, -0.5)]);
        assert_eq!(fastest_path(&closed, 1, 2).unwrap(), None);
    }

    #[test]
    fn restricted_turn_and_centroid_force_the_direct_link() {
        let mut g = NetworkGraph::new();
        g.add_node(Node::new(1, 0.0, 0.0));
        g.add_node(Node::centroid(2, 1.0, 0.0, 7));
        g.add_node(Node::new(3, 2.0, 0.0));
        g.add_link(Link::new(1, 2, 1.0).with_cost(5.0)).unwrap();
        g.add_link(Link::new(2, 3, 1.0).with_cost(5.0)).unwrap();
        g.add_link(Link::new(1, 3, 2.0).with_cost(20.0)).unwrap();
        g.add_turn_restriction(1, 2, 3).unwrap();

        let path = fastest_path(&g, 1, 3).unwrap().unwrap();
        assert_eq!(path.links, vec![(1, 3)]);
        assert_eq!(path.cost, 20.0);
    }

    #[test]
    fn restricted_turn_takes_the_detour() {
        // 1 -> 2 -> 3 is banned, but 1 -> 2 -> 4 -> 2 -> 3 is allowed
        let mut g = graph(
            &[1, 2, 3, 4],
            &[(1, 2, 1.0), (2, 3, 1.0), (2, 4, 1.0), (4, 2, 1.0), (1, 3, 50.0)],
        );
        g.add_turn_restriction(1, 2, 3).unwrap();
        let path = fastest_path(&g, 1, 3).unwrap().unwrap();
        assert_eq!(path.links, vec![(1, 2), (2, 4), (4, 2), (2, 3)]);
        assert_eq!(path.cost, 4.0);
        assert_eq!(path.nodes(), vec![1, 2, 4, 2, 3]);
    }

    #[test]
    fn centroids_are_not_entered_past_the_first_link() {
        let mut g = NetworkGraph::new();
        g.add_node(Node::centroid(1, 0.0, 0.0, 1));
        g.add_node(Node::centroid(2, 1.0, 0.0, 2));
        g.add_node(Node::new(3, 2.0, 0.0));
        g.add_node(Node::centroid(4, 3.0, 0.0, 4));
        g.add_link(Link::new(1, 3, 1.0).with_cost(1.0)).unwrap();
        g.add_link(Link::new(3, 2, 1.0).with_cost(1.0)).unwrap();
        g.add_link(Link::new(2, 4, 1.0).with_cost(1.0)).unwrap();
        g.add_link(Link::new(3, 4, 1.0).with_cost(5.0)).unwrap();

        let through_road = fastest_path(&g, 1, 4).unwrap().unwrap();
        assert_eq!(through_road.links, vec![(1, 3), (3, 4)]);

        let into_centroid = fastest_path(&g, 1, 2).unwrap().unwrap();
        assert_eq!(into_centroid.links, vec![(1, 3), (3, 2)]);
    }

    #[test]
    fn first_link_may_enter_a_centroid() {
        let mut g = NetworkGraph::new();
        g.add_node(Node::new(1, 0.0, 0.0));
        g.add_node(Node::centroid(2, 1.0, 0.0, 7));
        g.add_node(Node::new(3, 2.0, 0.0));
        g.add_link(Link::new(1, 2, 1.0).with_cost(1.0)).unwrap();
        g.add_link(Link::new(2, 3, 1.0).with_cost(1.0)).unwrap();

        let path = fastest_path(&g, 1, 3).unwrap().unwrap();
        assert_eq!(path.links, vec![(1, 2), (2, 3)]);
        assert_eq!(path.cost, 2.0);
    }

    #[test]
    fn prefers_cheap_chain_over_direct_link() {
        let g = graph(
            &[1, 2, 3, 4],
            &[(1, 3, 10.0), (1, 2, 1.0), (2, 3, 1.0), (3, 4, 3.0)],
        );
        let path = fastest_path(&g, 1, 4).unwrap().unwrap();
        assert_eq!(path.links, vec![(1, 2), (2, 3), (3, 4)]);
        assert_eq!(path.cost, 5.0);
    }
}
