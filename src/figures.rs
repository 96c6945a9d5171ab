use thiserror::Error;

use crate::color::series_palette;
use crate::data::model::PowerTable;
use crate::data::stats::ChannelStats;

// ---------------------------------------------------------------------------
// Figure descriptions
// ---------------------------------------------------------------------------

/// One plotted curve: legend label, RGB colour, points.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    pub label: String,
    pub color: [u8; 3],
    pub points: Vec<[f64; 2]>,
}

/// A renderer-agnostic figure: what to draw, not how. Consumed by both the
/// egui window and the PNG exporter.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureSpec {
    pub id: &'static str,
    /// Empty for the power panels; only the SNR figure carries a title.
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Tick text for positional axes (text row labels); `None` when the
    /// axis values speak for themselves.
    pub x_ticks: Option<Vec<(f64, String)>>,
    pub series: Vec<SeriesSpec>,
    pub show_legend: bool,
}

/// The three diagnostic figures of one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureSet {
    /// Power over time, one curve per selected channel.
    pub time_domain: FigureSpec,
    /// Power across channel positions, one curve per selected observation.
    pub frequency_domain: FigureSpec,
    /// The SNR estimate over all channels.
    pub snr: FigureSpec,
}

/// Curve extraction failures. Selection validation admits one index past
/// the end of each axis, so these are reachable from user input and are
/// fatal rather than recovered.
#[derive(Debug, Error)]
pub enum FigureError {
    #[error("frequency channel index {index} is out of range: table has {channels} channels")]
    ChannelOutOfBounds { index: usize, channels: usize },

    #[error("time index {index} is out of range: table has {rows} observations")]
    TimeOutOfBounds { index: usize, rows: usize },
}

const SNR_COLOR: [u8; 3] = [31, 119, 180];

impl FigureSet {
    /// Assemble all three figures for the given selections.
    pub fn build(
        table: &PowerTable,
        channel_selection: &[usize],
        time_selection: &[usize],
        stats: &[ChannelStats],
    ) -> Result<FigureSet, FigureError> {
        Ok(FigureSet {
            time_domain: time_domain_figure(table, channel_selection)?,
            frequency_domain: frequency_domain_figure(table, time_selection)?,
            snr: snr_figure(stats),
        })
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Upper power panel: the selected channels over the time axis.
fn time_domain_figure(
    table: &PowerTable,
    channels: &[usize],
) -> Result<FigureSpec, FigureError> {
    let (time_axis, x_ticks) = time_axis(table);
    let palette = series_palette(channels.len());

    let mut series = Vec::with_capacity(channels.len());
    for (&ch, &color) in channels.iter().zip(&palette) {
        let column = table.column(ch).ok_or(FigureError::ChannelOutOfBounds {
            index: ch,
            channels: table.num_channels(),
        })?;
        series.push(SeriesSpec {
            label: format!("ch {ch}"),
            color,
            points: time_axis.iter().zip(column).map(|(&x, y)| [x, y]).collect(),
        });
    }

    Ok(FigureSpec {
        id: "time_domain",
        title: String::new(),
        x_label: "Time [unknown]".into(),
        y_label: "Power [unknown]".into(),
        x_ticks,
        series,
        show_legend: true,
    })
}

/// Lower power panel: the selected observations across all channels.
fn frequency_domain_figure(
    table: &PowerTable,
    times: &[usize],
) -> Result<FigureSpec, FigureError> {
    let palette = series_palette(times.len());

    let mut series = Vec::with_capacity(times.len());
    for (&t, &color) in times.iter().zip(&palette) {
        let row = table.row(t).ok_or(FigureError::TimeOutOfBounds {
            index: t,
            rows: table.num_rows(),
        })?;
        series.push(SeriesSpec {
            label: format!("t {t}"),
            color,
            points: row.iter().enumerate().map(|(c, &y)| [c as f64, y]).collect(),
        });
    }

    Ok(FigureSpec {
        id: "frequency_domain",
        title: String::new(),
        x_label: "Frequency Channel".into(),
        y_label: "Power [unknown]".into(),
        x_ticks: None,
        series,
        show_legend: true,
    })
}

/// The SNR estimate per channel position. Channels whose SNR is not
/// finite simply have no point.
fn snr_figure(stats: &[ChannelStats]) -> FigureSpec {
    let points = stats
        .iter()
        .enumerate()
        .filter(|(_, s)| s.snr.is_finite())
        .map(|(c, s)| [c as f64, s.snr])
        .collect();

    FigureSpec {
        id: "snr",
        title: "SNR vs. Frequency Channel".into(),
        x_label: "Frequency Channel".into(),
        y_label: "Estimated Signal-to-Noise Ratio".into(),
        x_ticks: None,
        series: vec![SeriesSpec {
            label: "SNR".into(),
            color: SNR_COLOR,
            points,
        }],
        show_legend: false,
    }
}

/// Numeric row labels when every one of them parses, else positions with
/// the labels as tick text.
fn time_axis(table: &PowerTable) -> (Vec<f64>, Option<Vec<(f64, String)>>) {
    match table.numeric_row_labels() {
        Some(values) => (values, None),
        None => {
            let positions = (0..table.num_rows()).map(|i| i as f64).collect();
            let ticks = table
                .row_labels()
                .iter()
                .enumerate()
                .map(|(i, label)| (i as f64, label.clone()))
                .collect();
            (positions, Some(ticks))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::stats::channel_stats;

    fn table(labels: &[&str], rows: &[&[f64]]) -> PowerTable {
        let width = rows.first().map_or(0, |r| r.len());
        PowerTable::from_rows(
            (0..width).map(|i| format!("c{i}")).collect(),
            labels
                .iter()
                .zip(rows)
                .map(|(l, r)| (l.to_string(), r.to_vec()))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn builds_all_three_figures() {
        let t = table(
            &["0.0", "0.5", "1.0"],
            &[&[1.0, 2.0, 3.0], &[2.0, 3.0, 4.0], &[3.0, 4.0, 5.0]],
        );
        let stats = channel_stats(&t);
        let set = FigureSet::build(&t, &[0, 2], &[1], &stats).unwrap();

        assert_eq!(set.time_domain.series.len(), 2);
        assert_eq!(set.time_domain.series[0].label, "ch 0");
        assert_eq!(set.time_domain.series[1].label, "ch 2");
        assert_eq!(
            set.time_domain.series[1].points,
            vec![[0.0, 3.0], [0.5, 4.0], [1.0, 5.0]]
        );
        assert!(set.time_domain.x_ticks.is_none());

        assert_eq!(set.frequency_domain.series.len(), 1);
        assert_eq!(set.frequency_domain.series[0].label, "t 1");
        assert_eq!(
            set.frequency_domain.series[0].points,
            vec![[0.0, 2.0], [1.0, 3.0], [2.0, 4.0]]
        );

        assert_eq!(set.snr.series.len(), 1);
        assert_eq!(set.snr.series[0].points.len(), 3);
        assert_eq!(set.snr.title, "SNR vs. Frequency Channel");
    }

    #[test]
    fn channel_at_table_width_is_an_error() {
        // Selection validation admits this index; figure assembly is where
        // it must fail.
        let t = table(&["0", "1"], &[&[1.0, 2.0], &[3.0, 4.0]]);
        let stats = channel_stats(&t);

        let err = FigureSet::build(&t, &[0, 2], &[0], &stats).unwrap_err();
        match err {
            FigureError::ChannelOutOfBounds { index, channels } => {
                assert_eq!(index, 2);
                assert_eq!(channels, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn time_at_table_length_is_an_error() {
        let t = table(&["0", "1"], &[&[1.0, 2.0], &[3.0, 4.0]]);
        let stats = channel_stats(&t);

        let err = FigureSet::build(&t, &[0], &[2], &stats).unwrap_err();
        assert!(matches!(
            err,
            FigureError::TimeOutOfBounds { index: 2, rows: 2 }
        ));
    }

    #[test]
    fn nonfinite_snr_points_are_omitted() {
        // Middle channel is constant, so its SNR is not finite.
        let t = table(
            &["0", "1", "2"],
            &[&[1.0, 5.0, 1.0], &[2.0, 5.0, 2.0], &[3.0, 5.0, 3.0]],
        );
        let stats = channel_stats(&t);
        let set = FigureSet::build(&t, &[0], &[0], &stats).unwrap();

        let xs: Vec<f64> = set.snr.series[0].points.iter().map(|p| p[0]).collect();
        assert_eq!(xs, vec![0.0, 2.0]);
    }

    #[test]
    fn text_row_labels_become_tick_text() {
        let t = table(&["dawn", "noon", "dusk"], &[&[1.0], &[2.0], &[3.0]]);
        let stats = channel_stats(&t);
        let set = FigureSet::build(&t, &[0], &[0], &stats).unwrap();

        let ticks = set.time_domain.x_ticks.as_ref().unwrap();
        assert_eq!(ticks[1], (1.0, "noon".to_string()));
        assert_eq!(
            set.time_domain.series[0].points,
            vec![[0.0, 1.0], [1.0, 2.0], [2.0, 3.0]]
        );
    }
}
