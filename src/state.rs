use crate::figures::FigureSet;

// ---------------------------------------------------------------------------
// Window state
// ---------------------------------------------------------------------------

/// Everything the window shows. Assembled once before the event loop
/// starts; the only piece that changes afterwards is the SNR toggle.
pub struct ViewState {
    /// Display name of the loaded file.
    pub file_name: String,
    pub num_rows: usize,
    pub num_channels: usize,
    pub figures: FigureSet,
    /// Whether the floating SNR window is open.
    pub show_snr: bool,
}

impl ViewState {
    pub fn new(
        file_name: String,
        num_rows: usize,
        num_channels: usize,
        figures: FigureSet,
    ) -> Self {
        Self {
            file_name,
            num_rows,
            num_channels,
            figures,
            show_snr: true,
        }
    }
}
