use core::time::Duration;

use arrayvec::ArrayVec;

/// Percentiles picked out of a sorted set of samples.
///
/// Percentiles are expressed in hundredths of a percent, so `9950` is the
/// 99.5th percentile.
#[derive(Default)]
pub(crate) struct Percentiles {
    values: ArrayVec<(u32, Duration), 8>,
}

impl Percentiles {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record the given percentile from `samples`, which must be sorted.
    pub(crate) fn insert(&mut self, percentile: u32, samples: &[Duration]) {
        let Some(last) = samples.len().checked_sub(1) else {
            return;
        };

        let index = (samples.len() * percentile as usize / 10000).min(last);

        if let Some(value) = samples.get(index) {
            let _ = self.values.try_push((percentile, *value));
        }
    }

    /// Get a recorded percentile, or zero if it wasn't recorded.
    pub(crate) fn get(&self, percentile: u32) -> Duration {
        self.values
            .iter()
            .find(|(p, _)| *p == percentile)
            .map(|(_, value)| *value)
            .unwrap_or_default()
    }
}
