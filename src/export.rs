use std::io::Cursor;
use std::ops::Range;
use std::path::Path;

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::coord::Shift;
use plotters::prelude::*;
use thiserror::Error;

use crate::figures::{FigureSet, FigureSpec};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to render figure: {0}")]
    Draw(String),

    #[error("failed to encode png: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to write figure file: {0}")]
    Io(#[from] std::io::Error),
}

impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for ExportError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        ExportError::Draw(format!("{value:?}"))
    }
}

// ---------------------------------------------------------------------------
// PNG export
// ---------------------------------------------------------------------------

const POWER_WIDTH: u32 = 900;
const POWER_HEIGHT: u32 = 800;
const SNR_SIZE: u32 = 700;

/// Render the figure set into `power.png` (both power panels stacked) and
/// `snr.png` under `dir`. This is the sink used when the host saves
/// figures instead of displaying them.
pub fn save_figures(figures: &FigureSet, dir: &Path) -> Result<(), ExportError> {
    std::fs::create_dir_all(dir)?;

    let power = render_power_png(figures)?;
    std::fs::write(dir.join("power.png"), power)?;

    let snr = render_figure_png(&figures.snr, SNR_SIZE, SNR_SIZE)?;
    std::fs::write(dir.join("snr.png"), snr)?;

    log::info!("saved power.png and snr.png to {}", dir.display());
    Ok(())
}

/// Both power panels on one bitmap, stacked vertically.
pub fn render_power_png(figures: &FigureSet) -> Result<Vec<u8>, ExportError> {
    let mut buffer = vec![0u8; (POWER_WIDTH * POWER_HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (POWER_WIDTH, POWER_HEIGHT))
            .into_drawing_area();
        let (upper, lower) = root.split_vertically(POWER_HEIGHT / 2);
        draw_figure(&upper, &figures.time_domain)?;
        draw_figure(&lower, &figures.frequency_domain)?;
        root.present()?;
    }
    encode_png(&buffer, POWER_WIDTH, POWER_HEIGHT)
}

/// One figure alone on a bitmap of the given size.
pub fn render_figure_png(
    spec: &FigureSpec,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, ExportError> {
    let mut buffer = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw_figure(&root, spec)?;
        root.present()?;
    }
    encode_png(&buffer, width, height)
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

fn draw_figure(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    spec: &FigureSpec,
) -> Result<(), ExportError> {
    area.fill(&WHITE)?;

    let (x_range, y_range) = axis_ranges(spec);

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 45);
    if !spec.title.is_empty() {
        builder.caption(&spec.title, ("sans-serif", 22));
    }
    let mut chart = builder.build_cartesian_2d(x_range, y_range)?;

    let tick_formatter = spec.x_ticks.as_ref().map(|ticks| {
        move |x: &f64| {
            ticks
                .iter()
                .find(|(pos, _)| (x - pos).abs() < 1e-9)
                .map(|(_, text)| text.clone())
                .unwrap_or_default()
        }
    });

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str())
        .light_line_style(&BLACK.mix(0.08));
    if let Some(fmt) = &tick_formatter {
        mesh.x_label_formatter(fmt);
    }
    mesh.draw()?;

    for series in &spec.series {
        let [r, g, b] = series.color;
        let color = RGBColor(r, g, b);
        let drawn = chart.draw_series(LineSeries::new(
            series.points.iter().map(|p| (p[0], p[1])),
            &color,
        ))?;
        if spec.show_legend {
            drawn
                .label(series.label.clone())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
        }
    }

    if spec.show_legend {
        chart
            .configure_series_labels()
            .border_style(&BLACK.mix(0.3))
            .background_style(&WHITE.mix(0.9))
            .draw()?;
    }
    Ok(())
}

/// Bounds over the finite coordinates only, with a little margin.
/// Degenerate spans widen so the chart always builds.
fn axis_ranges(spec: &FigureSpec) -> (Range<f64>, Range<f64>) {
    let mut x = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y = (f64::INFINITY, f64::NEG_INFINITY);

    for series in &spec.series {
        for p in &series.points {
            if p[0].is_finite() && p[1].is_finite() {
                x.0 = x.0.min(p[0]);
                x.1 = x.1.max(p[0]);
                y.0 = y.0.min(p[1]);
                y.1 = y.1.max(p[1]);
            }
        }
    }
    (pad_range(x.0, x.1), pad_range(y.0, y.1))
}

fn pad_range(min: f64, max: f64) -> Range<f64> {
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    let span = max - min;
    let pad = if span.abs() < f64::EPSILON {
        0.5
    } else {
        span * 0.05
    };
    (min - pad)..(max + pad)
}

fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ExportError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| ExportError::Draw("failed to assemble image buffer".into()))?;
    let mut output = Vec::new();
    DynamicImage::ImageRgb8(image).write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::PowerTable;
    use crate::data::stats::channel_stats;

    fn small_set() -> FigureSet {
        let table = PowerTable::from_rows(
            vec!["c0".into(), "c1".into()],
            vec![
                ("0".into(), vec![1.0, 4.0]),
                ("1".into(), vec![2.0, 5.0]),
                ("2".into(), vec![3.0, 6.5]),
            ],
        )
        .unwrap();
        let stats = channel_stats(&table);
        FigureSet::build(&table, &[0, 1], &[1], &stats).unwrap()
    }

    #[test]
    fn power_png_has_png_signature() {
        let bytes = render_power_png(&small_set()).unwrap();
        assert_eq!(bytes[..8], [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']);
    }

    #[test]
    fn snr_png_renders_nonempty() {
        let set = small_set();
        let bytes = render_figure_png(&set.snr, 320, 320).unwrap();
        assert!(bytes.len() > 100);
    }

    #[test]
    fn save_writes_both_files() {
        let dir = std::env::temp_dir().join(format!(
            "spectra_scope_export_{}",
            std::process::id()
        ));
        save_figures(&small_set(), &dir).unwrap();

        assert!(dir.join("power.png").is_file());
        assert!(dir.join("snr.png").is_file());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn degenerate_ranges_still_render() {
        // A single flat series must not produce a zero-width chart range.
        let spec = FigureSpec {
            id: "flat",
            title: String::new(),
            x_label: "x".into(),
            y_label: "y".into(),
            x_ticks: None,
            series: vec![crate::figures::SeriesSpec {
                label: "flat".into(),
                color: [10, 20, 30],
                points: vec![[0.0, 2.0], [1.0, 2.0]],
            }],
            show_legend: false,
        };
        let bytes = render_figure_png(&spec, 200, 200).unwrap();
        assert!(!bytes.is_empty());
    }
}
