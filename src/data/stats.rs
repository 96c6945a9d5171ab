use super::model::PowerTable;

// ---------------------------------------------------------------------------
// Per-channel statistics
// ---------------------------------------------------------------------------

/// Summary statistics of one frequency channel across all observations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStats {
    pub mean: f64,
    /// Population standard deviation (divisor R, not R - 1).
    pub std_dev: f64,
    /// `mean / std_dev` under IEEE rules. A constant channel gives ±inf
    /// or NaN; callers must tolerate non-finite values.
    pub snr: f64,
}

/// Compute mean, population standard deviation and SNR for every channel.
///
/// Runs over the whole table regardless of any later index selection.
/// A table with no observations yields NaN for every field.
pub fn channel_stats(table: &PowerTable) -> Vec<ChannelStats> {
    let r = table.num_rows() as f64;
    let c = table.num_channels();

    let mut sums = vec![0.0; c];
    for row in table.rows() {
        for (acc, v) in sums.iter_mut().zip(row) {
            *acc += v;
        }
    }
    let means: Vec<f64> = sums.iter().map(|s| s / r).collect();

    let mut sq_devs = vec![0.0; c];
    for row in table.rows() {
        for ((acc, v), mean) in sq_devs.iter_mut().zip(row).zip(&means) {
            *acc += (v - mean).powi(2);
        }
    }

    means
        .into_iter()
        .zip(sq_devs)
        .map(|(mean, sq)| {
            let std_dev = (sq / r).sqrt();
            ChannelStats {
                mean,
                std_dev,
                snr: mean / std_dev,
            }
        })
        .collect()
}

/// The SNR vector alone, aligned with channel position.
pub fn channel_snr(table: &PowerTable) -> Vec<f64> {
    channel_stats(table).iter().map(|s| s.snr).collect()
}
