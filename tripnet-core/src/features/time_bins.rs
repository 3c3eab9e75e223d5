use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use fixedbitset::FixedBitSet;

use crate::Error;

/// Fixed-width partition of a day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBins {
    bin_minutes: u32,
    bins: usize,
}

impl Default for TimeBins {
    /// Five minute bins over 24 hours
    fn default() -> Self {
        Self {
            bin_minutes: 5,
            bins: 24 * 12,
        }
    }
}

impl TimeBins {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if either size is zero
    pub fn new(bin_minutes: u32, bins: usize) -> Result<Self, Error> {
        if bin_minutes == 0 || bins == 0 {
            return Err(Error::InvalidConfig(format!(
                "time bins need a positive width and count, got {bins} bins of {bin_minutes} minutes"
            )));
        }
        Ok(Self { bin_minutes, bins })
    }

    pub fn bin_minutes(&self) -> u32 {
        self.bin_minutes
    }

    pub fn len(&self) -> usize {
        self.bins
    }

    pub fn is_empty(&self) -> bool {
        self.bins == 0
    }

    /// Bin holding `minutes` past midnight, `None` outside the day
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn bin_of(&self, minutes: f64) -> Option<usize> {
        if !minutes.is_finite() || minutes < 0.0 {
            return None;
        }
        let bin = (minutes / f64::from(self.bin_minutes)).floor();
        (bin < self.bins as f64).then_some(bin as usize)
    }

    pub fn bin_of_time(&self, time: NaiveTime) -> Option<usize> {
        let minutes = f64::from(time.num_seconds_from_midnight()) / 60.0;
        self.bin_of(minutes)
    }

    /// Minutes from the start of `day` to `time`, negative before the day
    /// starts and past the day length after it ends
    #[allow(clippy::cast_precision_loss)]
    pub fn minutes_from_midnight(time: NaiveDateTime, day: NaiveDate) -> f64 {
        let midnight = day.and_time(NaiveTime::MIN);
        time.signed_duration_since(midnight).num_milliseconds() as f64 / 60_000.0
    }
}

/// Bins during which a trip from `start` to `end` is under way.
///
/// A trip that ends after the day (or whose end cannot be placed) is taken
/// to run through the last bin. `None` when the trip does not start within
/// the day.
pub fn activity_mask(bins: &TimeBins, start: f64, end: f64) -> Option<FixedBitSet> {
    let first = bins.bin_of(start)?;
    let last = bins.bin_of(end).unwrap_or(bins.len() - 1);

    let mut mask = FixedBitSet::with_capacity(bins.len());
    if last >= first {
        mask.insert_range(first..last + 1);
    }
    Some(mask)
}
