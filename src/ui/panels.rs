use eframe::egui::Ui;

use crate::state::ViewState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// File name, table dimensions, SNR window toggle.
pub fn top_bar(ui: &mut Ui, state: &mut ViewState) {
    ui.horizontal(|ui| {
        ui.strong(state.file_name.as_str());
        ui.separator();

        ui.label(format!(
            "{} observations × {} frequency channels",
            state.num_rows, state.num_channels
        ));
        ui.separator();

        if ui.selectable_label(state.show_snr, "SNR window").clicked() {
            state.show_snr = !state.show_snr;
        }
    });
}
