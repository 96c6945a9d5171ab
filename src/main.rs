use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use spectra_scope::app::ScopeApp;
use spectra_scope::cli::Args;
use spectra_scope::data::loader::load_table;
use spectra_scope::data::stats::channel_stats;
use spectra_scope::export::save_figures;
use spectra_scope::figures::FigureSet;
use spectra_scope::select::machine::SelectionDialog;
use spectra_scope::select::prompt::ConsolePrompt;
use spectra_scope::state::ViewState;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let table = load_table(&args.table)
        .with_context(|| format!("loading {}", args.table.display()))?;
    let stats = channel_stats(&table);

    for line in banner_lines(
        &args.table.display().to_string(),
        table.num_rows(),
        table.num_channels(),
    ) {
        println!("{line}");
    }

    let mut prompt = ConsolePrompt;
    let channel_selection = SelectionDialog::new("frequency channel", table.num_channels())
        .run(&mut prompt)
        .context("selecting frequency channel indices")?;
    let time_selection = SelectionDialog::new("time", table.num_rows())
        .run(&mut prompt)
        .context("selecting time indices")?;

    let figures = FigureSet::build(&table, &channel_selection, &time_selection, &stats)
        .context("assembling figures")?;

    if let Some(dir) = &args.save_dir {
        save_figures(&figures, dir)
            .with_context(|| format!("saving figures to {}", dir.display()))?;
        return Ok(());
    }

    let file_name = args
        .table
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.table.display().to_string());
    let state = ViewState::new(file_name, table.num_rows(), table.num_channels(), figures);
    run_window(state)
}

/// The fixed greeting shown before the first dialog: the table dimensions
/// and what the tool is about to ask for.
fn banner_lines(table: &str, rows: usize, channels: usize) -> [String; 3] {
    [
        format!("File {table} has {rows} observations and {channels} frequency channels."),
        "This tool will make two plots of power (one in the time domain and one in the \
         frequency domain) and one plot of SNR vs. frequency channel."
            .to_string(),
        "You will be asked to input the frequency channel indices to plot in the time \
         domain, and the time indices to plot in the frequency domain."
            .to_string(),
    ]
}

fn run_window(state: ViewState) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Spectra Scope – SNR Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(ScopeApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("window failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_names_the_file_and_explains_both_prompts() {
        let lines = banner_lines("data1.csv", 100, 30);
        assert_eq!(
            lines[0],
            "File data1.csv has 100 observations and 30 frequency channels."
        );
        assert_eq!(
            lines[1],
            "This tool will make two plots of power (one in the time domain and one in \
             the frequency domain) and one plot of SNR vs. frequency channel."
        );
        assert_eq!(
            lines[2],
            "You will be asked to input the frequency channel indices to plot in the \
             time domain, and the time indices to plot in the frequency domain."
        );
    }
}
