//! Domain types for catalog supernovae and their per-band light curves.

use super::loader::CatalogEntry;

/// Luminosity of an absolute-magnitude-zero object, in erg/s.
const ZERO_POINT_LUMINOSITY: f64 = 3.0128e35;

// ---------------------------------------------------------------------------
// Output quantity
// ---------------------------------------------------------------------------

/// What the apparent magnitudes are converted into before output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    AbsoluteMagnitude,
    Luminosity,
}

impl OutputKind {
    /// The plotfile column-description line for this quantity.
    pub fn columns_header(self) -> &'static str {
        match self {
            OutputKind::AbsoluteMagnitude => {
                "#columns: time[days] (relative to peak), Absolute Magnitude[]"
            }
            OutputKind::Luminosity => {
                "#columns: time[days] (relative to peak), Luminosity[erg/s]"
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Light curves
// ---------------------------------------------------------------------------

/// The observations of one supernova in one photometric band.
#[derive(Debug, Clone, PartialEq)]
pub struct LightCurve {
    pub band: String,
    /// Observation times in days; relative to the peak after
    /// `offset_times_by_peak`.
    pub times: Vec<f64>,
    /// Apparent magnitudes as read; absolute magnitudes or luminosities
    /// after `convert`.
    pub values: Vec<f64>,
}

/// One matched supernova: identity plus a light curve per requested band,
/// in request order. A band the supernova was never observed in keeps an
/// empty curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Supernova {
    pub name: String,
    pub sn_type: String,
    lumdist_pc: f64,
    pub curves: Vec<LightCurve>,
}

impl Supernova {
    /// Group the entry's photometry into one curve per requested band.
    /// Observations missing a time, band or magnitude are skipped, as are
    /// ones whose numbers fail to parse.
    pub fn from_entry(
        name: String,
        sn_type: String,
        lumdist_pc: f64,
        entry: &CatalogEntry,
        bands: &[String],
    ) -> Self {
        let mut curves: Vec<LightCurve> = bands
            .iter()
            .map(|band| LightCurve {
                band: band.clone(),
                times: Vec::new(),
                values: Vec::new(),
            })
            .collect();

        for obs in &entry.photometry {
            let (Some(time), Some(band), Some(magnitude)) =
                (&obs.time, &obs.band, &obs.magnitude)
            else {
                continue;
            };
            let Some(slot) = bands.iter().position(|b| b == band) else {
                continue;
            };
            let (Ok(t), Ok(m)) = (time.parse::<f64>(), magnitude.parse::<f64>()) else {
                continue;
            };
            curves[slot].times.push(t);
            curves[slot].values.push(m);
        }

        Supernova {
            name,
            sn_type,
            lumdist_pc,
            curves,
        }
    }

    /// Turn every apparent magnitude into an absolute magnitude via the
    /// distance modulus, then on into a luminosity in erg/s when asked.
    pub fn convert(&mut self, kind: OutputKind) {
        let modulus = 5.0 * (self.lumdist_pc.log10() - 1.0);
        for curve in &mut self.curves {
            for value in &mut curve.values {
                *value -= modulus;
                if kind == OutputKind::Luminosity {
                    *value = ZERO_POINT_LUMINOSITY * 10f64.powf(*value / -2.5);
                }
            }
        }
    }

    /// Shift each curve's times so its peak observation sits at day zero.
    pub fn offset_times_by_peak(&mut self) {
        for curve in &mut self.curves {
            let Some(peak) = peak_index(&curve.values) else {
                continue;
            };
            let t_peak = curve.times[peak];
            for t in &mut curve.times {
                *t -= t_peak;
            }
        }
    }
}

/// Index of the brightest observation: the value largest in magnitude,
/// the earliest winning ties.
fn peak_index(values: &[f64]) -> Option<usize> {
    if values.is_empty() {
        return None;
    }
    let mut index = 0;
    let mut max_mag = 0.0f64;
    for (i, value) in values.iter().enumerate() {
        if value.abs() > max_mag {
            max_mag = value.abs();
            index = i;
        }
    }
    Some(index)
}
