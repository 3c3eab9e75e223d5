use serde::{Deserialize, Serialize};

use super::time_bins::TimeBins;
use crate::Error;

/// Settings for turning person days into binned features
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Width of one time bin in minutes
    pub bin_minutes: u32,
    /// Number of bins covering the day
    pub bins_per_day: usize,
    /// Base seed for centroid picks, each day adds its index
    pub seed: u64,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            bin_minutes: 5,
            bins_per_day: 288,
            seed: 0,
        }
    }
}

impl FeatureConfig {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for a zero bin width or bin count
    pub fn validate(&self) -> Result<(), Error> {
        if self.bin_minutes == 0 {
            return Err(Error::InvalidConfig(
                "bin_minutes must be greater than 0".to_string(),
            ));
        }
        if self.bins_per_day == 0 {
            return Err(Error::InvalidConfig(
                "bins_per_day must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the config does not validate
    pub fn time_bins(&self) -> Result<TimeBins, Error> {
        TimeBins::new(self.bin_minutes, self.bins_per_day)
    }
}
