use eframe::egui;

use crate::state::ViewState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ScopeApp {
    pub state: ViewState,
}

impl ScopeApp {
    pub fn new(state: ViewState) -> Self {
        Self { state }
    }
}

impl eframe::App for ScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: file info and toggles ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Floating SNR window ----
        let mut show_snr = self.state.show_snr;
        egui::Window::new("SNR vs. Frequency Channel")
            .open(&mut show_snr)
            .default_size([480.0, 400.0])
            .show(ctx, |ui| {
                plot::figure(ui, &self.state.figures.snr, ui.available_height());
            });
        self.state.show_snr = show_snr;

        // ---- Central panel: the two power panels stacked ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let panel_height = (ui.available_height() - 12.0) / 2.0;
            plot::figure(ui, &self.state.figures.time_domain, panel_height);
            ui.add_space(8.0);
            plot::figure(ui, &self.state.figures.frequency_domain, panel_height);
        });
    }
}
