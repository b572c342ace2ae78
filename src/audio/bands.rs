//! Low/high band classification of a frequency-bin snapshot.

use std::ops::Range;

/// Average and peak magnitude of the low and high halves of a spectrum
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BandLevels {
    pub low_avg: f32,
    pub low_max: f32,
    pub high_avg: f32,
    pub high_max: f32,
}

impl BandLevels {
    /// False when either band was empty (its average is NaN)
    pub fn is_finite(&self) -> bool {
        self.low_avg.is_finite()
            && self.low_max.is_finite()
            && self.high_avg.is_finite()
            && self.high_max.is_finite()
    }
}

/// Bin ranges of the low and high bands for `n` bins.
///
/// Both ranges drop their last element: low is `[0, n/2 - 1)` and high is
/// `[n/2, n - 1)`, so `n - 2` bins are classified when `n` is even.
pub fn band_ranges(n: usize) -> (Range<usize>, Range<usize>) {
    let half = n / 2;
    let low = 0..half.saturating_sub(1);
    let high = half..n.saturating_sub(1).max(half);
    (low, high)
}

/// Split `bins` into low and high bands and measure each.
///
/// Empty bands have a NaN average and a zero peak.
pub fn classify(bins: &[f32]) -> BandLevels {
    let (low, high) = band_ranges(bins.len());
    let (low_avg, low_max) = measure(&bins[low]);
    let (high_avg, high_max) = measure(&bins[high]);

    BandLevels {
        low_avg,
        low_max,
        high_avg,
        high_max,
    }
}

fn measure(band: &[f32]) -> (f32, f32) {
    let avg = band.iter().sum::<f32>() / band.len() as f32;
    let max = band.iter().copied().fold(0.0_f32, f32::max);
    (avg, max)
}
