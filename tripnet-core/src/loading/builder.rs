use hashbrown::{HashMap, HashSet};
use log::{info, warn};
use rayon::prelude::*;

use super::config::NetworkConfig;
use super::package::{ItineraryRecord, LinkCost, NetworkPackage, SegmentTime, TransitLine};
use crate::model::{
    Link, NetworkGraph, NetworkMeta, NetworkModel, Node, TransitData, TransitItinerary,
    TurnRestriction,
};
use crate::Error;

/// Package tables after the presence checks
struct PackageTables {
    nodes: Vec<Node>,
    links: Vec<Link>,
    link_costs: Vec<LinkCost>,
    turns: Vec<TurnRestriction>,
    transit_lines: Vec<TransitLine>,
    segment_times: Vec<SegmentTime>,
    itineraries: Vec<ItineraryRecord>,
}

/// Builds one network model from a package
///
/// Nodes are loaded first; road links, costs and turns are then loaded
/// while the transit tables are built on another worker.
///
/// # Errors
///
/// Returns an error if a required table is missing or any record refers
/// to a node, link or line that does not exist. No partial model is
/// returned.
pub fn create_network(
    config: &NetworkConfig,
    package: NetworkPackage,
) -> Result<NetworkModel, Error> {
    let tables = validate_package(config, package)?;

    info!(
        "Building network '{}' from {} nodes and {} links",
        config.name,
        tables.nodes.len(),
        tables.links.len()
    );

    let mut graph = NetworkGraph::new();
    for node in tables.nodes {
        graph.add_node(node);
    }

    let (road, transit) = rayon::join(
        || load_road(&mut graph, tables.links, tables.link_costs, tables.turns),
        || load_transit(tables.transit_lines, tables.segment_times, tables.itineraries),
    );
    road?;
    let transit = transit?;

    validate_transit_stops(&graph, &transit)?;

    info!(
        "Network '{}' ready: {} nodes, {} links, {} turn restrictions, {} transit lines, {} itineraries",
        config.name,
        graph.node_count(),
        graph.link_count(),
        graph.turn_restriction_count(),
        transit.line_count(),
        transit.itinerary_count()
    );

    Ok(NetworkModel::new(
        graph,
        transit,
        NetworkMeta {
            name: config.name.clone(),
        },
    ))
}

fn validate_package(
    config: &NetworkConfig,
    package: NetworkPackage,
) -> Result<PackageTables, Error> {
    let nodes = package.nodes.ok_or(Error::MissingTable("nodes"))?;
    let links = package.links.ok_or(Error::MissingTable("links"))?;
    let link_costs = package
        .link_costs
        .ok_or(Error::MissingTable("link attributes"))?;
    let turns = package.turns.ok_or(Error::MissingTable("turns"))?;

    let (transit_lines, segment_times) = match (package.transit_lines, package.segment_times) {
        (Some(lines), Some(times)) => (lines, times),
        (Some(lines), None) => {
            warn!(
                "Network '{}' has transit lines but no segment results, in-vehicle times stay at zero",
                config.name
            );
            (lines, Vec::new())
        }
        (None, Some(_)) => return Err(Error::MissingTable("transit lines")),
        (None, None) if config.require_transit => {
            return Err(Error::MissingTable("transit lines"));
        }
        (None, None) => (Vec::new(), Vec::new()),
    };

    if nodes.is_empty() {
        return Err(Error::InvalidData(format!(
            "network '{}' has no nodes",
            config.name
        )));
    }

    Ok(PackageTables {
        nodes,
        links,
        link_costs,
        turns,
        transit_lines,
        segment_times,
        itineraries: package.itineraries,
    })
}

fn load_road(
    graph: &mut NetworkGraph,
    links: Vec<Link>,
    link_costs: Vec<LinkCost>,
    turns: Vec<TurnRestriction>,
) -> Result<(), Error> {
    for link in links {
        graph.add_link(link)?;
    }
    // Costs come from a separate attribute table keyed on existing links
    for LinkCost {
        origin,
        destination,
        cost,
    } in link_costs
    {
        graph.set_link_cost(origin, destination, cost)?;
    }
    for turn in turns {
        graph.add_turn_restriction(turn.incoming, turn.via, turn.outgoing)?;
    }
    Ok(())
}

fn load_transit(
    lines: Vec<TransitLine>,
    segment_times: Vec<SegmentTime>,
    itineraries: Vec<ItineraryRecord>,
) -> Result<TransitData, Error> {
    let mut transit = TransitData::new();
    for line in lines {
        transit.add_line(line.name, line.stops)?;
    }

    let mut unmatched = 0usize;
    for time in &segment_times {
        let matched = transit.set_segment_time(
            &time.line,
            time.from,
            time.to,
            time.occurrence,
            time.minutes,
        )?;
        if !matched {
            log::debug!(
                "Line '{}' never serves {}->{} for the {}. time",
                time.line,
                time.from,
                time.to,
                time.occurrence
            );
            unmatched += 1;
        }
    }
    if unmatched > 0 {
        warn!(
            "{unmatched} of {} segment results match no stop pair on their line",
            segment_times.len()
        );
    }

    for record in itineraries.into_iter().filter(|r| r.path_number == 1) {
        transit.add_itinerary(
            record.destination,
            TransitItinerary::new(record.origin, record.segments),
        )?;
    }

    Ok(transit)
}

// Lines and itineraries may only use nodes of the road graph
#[allow(clippy::cast_precision_loss)]
fn validate_transit_stops(graph: &NetworkGraph, transit: &TransitData) -> Result<(), Error> {
    let referenced: HashSet<_> = transit.referenced_nodes().collect();
    let Some(first_missing) = referenced
        .iter()
        .copied()
        .filter(|&n| !graph.has_node(n))
        .min()
    else {
        return Ok(());
    };

    let missing = referenced.iter().filter(|&&n| !graph.has_node(n)).count();
    let percentage = (missing as f64 / referenced.len() as f64) * 100.0;
    warn!(
        "{missing} of {} transit nodes ({percentage:.1}%) are not in the road network",
        referenced.len()
    );
    Err(Error::UnknownNode(first_missing))
}

/// Networks of every time-of-day period, keyed by period name
#[derive(Debug, Clone, Default)]
pub struct NetworkSet {
    networks: HashMap<String, NetworkModel>,
}

impl NetworkSet {
    pub fn get(&self, name: &str) -> Option<&NetworkModel> {
        self.networks.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.networks.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}

/// Builds independent period networks in parallel
///
/// # Errors
///
/// Returns the first build error, or [`Error::InvalidConfig`] if two
/// builds share a name
pub fn create_network_set(
    builds: Vec<(NetworkConfig, NetworkPackage)>,
) -> Result<NetworkSet, Error> {
    check_unique_names(&builds)?;

    let models = builds
        .into_par_iter()
        .map(|(config, package)| create_network(&config, package))
        .collect::<Result<Vec<_>, _>>()?;

    info!("Built {} period networks", models.len());
    Ok(NetworkSet {
        networks: models
            .into_iter()
            .map(|model| (model.meta.name.clone(), model))
            .collect(),
    })
}

fn check_unique_names(builds: &[(NetworkConfig, NetworkPackage)]) -> Result<(), Error> {
    let mut names = HashSet::with_capacity(builds.len());
    for (config, _) in builds {
        if !names.insert(config.name.as_str()) {
            return Err(Error::InvalidConfig(format!(
                "network '{}' is configured twice",
                config.name
            )));
        }
    }
    Ok(())
}
