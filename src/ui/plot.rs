use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::figures::FigureSpec;

// ---------------------------------------------------------------------------
// egui rendering of a figure description
// ---------------------------------------------------------------------------

/// Render one figure as an interactive plot panel of the given height.
pub fn figure(ui: &mut Ui, spec: &FigureSpec, height: f32) {
    let mut plot = Plot::new(spec.id)
        .x_axis_label(spec.x_label.as_str())
        .y_axis_label(spec.y_label.as_str())
        .height(height)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    if spec.show_legend {
        plot = plot.legend(Legend::default());
    }

    // Positional axes label their grid marks with the row text.
    if let Some(ticks) = spec.x_ticks.clone() {
        plot = plot.x_axis_formatter(move |mark, _range| {
            ticks
                .iter()
                .find(|(pos, _)| (mark.value - pos).abs() < 1e-9)
                .map(|(_, text)| text.clone())
                .unwrap_or_default()
        });
    }

    plot.show(ui, |plot_ui| {
        for series in &spec.series {
            let [r, g, b] = series.color;
            let points: PlotPoints = series.points.iter().copied().collect();
            let line = Line::new(points)
                .name(&series.label)
                .color(Color32::from_rgb(r, g, b))
                .width(1.5);
            plot_ui.line(line);
        }
    });
}
