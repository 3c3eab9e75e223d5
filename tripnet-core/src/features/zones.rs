use geo::{Distance, Euclidean, Point};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::{Error, ZoneId};

/// Land-use densities of a zone
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneDensity {
    pub population: f64,
    pub employment: f64,
    pub households: f64,
}

/// Zone positions and densities used to describe traced trips
#[derive(Debug, Clone, Default)]
pub struct ZoneTable {
    positions: HashMap<ZoneId, Point<f64>>,
    densities: HashMap<ZoneId, ZoneDensity>,
}

impl ZoneTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Places `zone` at `(x, y)`, replacing any earlier position
    pub fn insert_zone(&mut self, zone: ZoneId, x: f64, y: f64) {
        self.positions.insert(zone, Point::new(x, y));
    }

    pub fn set_density(&mut self, zone: ZoneId, density: ZoneDensity) {
        self.densities.insert(zone, density);
    }

    pub fn position(&self, zone: ZoneId) -> Option<Point<f64>> {
        self.positions.get(&zone).copied()
    }

    /// Densities of `zone`, all zero when none were recorded
    pub fn density(&self, zone: ZoneId) -> ZoneDensity {
        self.densities.get(&zone).copied().unwrap_or_default()
    }

    /// Straight-line distance between two zone positions
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownZone`] if either zone has no position
    pub fn distance(&self, from: ZoneId, to: ZoneId) -> Result<f64, Error> {
        let a = self.position(from).ok_or(Error::UnknownZone(from))?;
        let b = self.position(to).ok_or(Error::UnknownZone(to))?;
        Ok(Euclidean.distance(a, b))
    }
}
