use std::path::PathBuf;

use spectra_scope::data::loader::load_table;
use spectra_scope::data::stats::channel_stats;
use spectra_scope::figures::{FigureError, FigureSet};
use spectra_scope::select::machine::SelectionDialog;
use spectra_scope::select::prompt::ScriptedPrompt;

// 5 observations x 4 channels with hand-checkable statistics:
//   ch0 = 1..5           mean 3, population std sqrt(2)
//   ch1 = 2 * ch0        mean 6, population std 2*sqrt(2)
//   ch2 constant 5       SNR +inf
//   ch3 constant 0       SNR NaN
const TABLE: &str = "\
time,ch0,ch1,ch2,ch3
0.0,1.0,2.0,5.0,0.0
0.5,2.0,4.0,5.0,0.0
1.0,3.0,6.0,5.0,0.0
1.5,4.0,8.0,5.0,0.0
2.0,5.0,10.0,5.0,0.0
";

fn write_table(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "spectra_scope_pipeline_{name}_{}.csv",
        std::process::id()
    ));
    std::fs::write(&path, TABLE).unwrap();
    path
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn file_to_figures_end_to_end() {
    let path = write_table("full");
    let table = load_table(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(table.num_rows(), 5);
    assert_eq!(table.num_channels(), 4);

    let stats = channel_stats(&table);
    assert_eq!(stats.len(), 4);
    assert!(close(stats[0].mean, 3.0));
    assert!(close(stats[0].std_dev, 2.0_f64.sqrt()));
    assert!(close(stats[0].snr, 3.0 / 2.0_f64.sqrt()));
    assert!(close(stats[1].snr, 6.0 / (2.0 * 2.0_f64.sqrt())));
    assert_eq!(stats[2].snr, f64::INFINITY);
    assert!(stats[3].snr.is_nan());

    // Channel dialog: a half-open range. Time dialog: an explicit list.
    let mut channel_prompt = ScriptedPrompt::new(["range", "0,2,1", "confirm"]);
    let channels = SelectionDialog::new("frequency channel", table.num_channels())
        .run(&mut channel_prompt)
        .unwrap();
    assert_eq!(channels, vec![0, 1]);

    let mut time_prompt = ScriptedPrompt::new(["list", "0,2,4", "confirm"]);
    let times = SelectionDialog::new("time", table.num_rows())
        .run(&mut time_prompt)
        .unwrap();
    assert_eq!(times, vec![0, 2, 4]);

    let set = FigureSet::build(&table, &channels, &times, &stats).unwrap();

    // One curve per selected channel, five points each, on the numeric
    // time axis from the row labels.
    assert_eq!(set.time_domain.series.len(), 2);
    for series in &set.time_domain.series {
        assert_eq!(series.points.len(), 5);
    }
    assert_eq!(set.time_domain.series[0].points[4], [2.0, 5.0]);
    assert!(set.time_domain.x_ticks.is_none());

    // One curve per selected time, one point per channel.
    assert_eq!(set.frequency_domain.series.len(), 3);
    for series in &set.frequency_domain.series {
        assert_eq!(series.points.len(), 4);
    }
    assert_eq!(set.frequency_domain.series[1].points[1], [1.0, 6.0]);

    // SNR points only where the estimate is finite.
    assert_eq!(set.snr.series.len(), 1);
    let xs: Vec<f64> = set.snr.series[0].points.iter().map(|p| p[0]).collect();
    assert_eq!(xs, vec![0.0, 1.0]);
}

#[test]
fn index_admitted_by_validation_fails_at_figures() {
    let path = write_table("phantom");
    let table = load_table(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    // Validation accepts an index equal to the axis size, one past the
    // last real channel.
    let mut prompt = ScriptedPrompt::new(["list", "0,4", "confirm"]);
    let channels = SelectionDialog::new("frequency channel", table.num_channels())
        .run(&mut prompt)
        .unwrap();
    assert_eq!(channels, vec![0, 4]);

    let stats = channel_stats(&table);
    let err = FigureSet::build(&table, &channels, &[0], &stats).unwrap_err();
    assert!(matches!(
        err,
        FigureError::ChannelOutOfBounds {
            index: 4,
            channels: 4
        }
    ));
}

#[test]
fn restart_replays_the_whole_dialog() {
    // A descending list fails validation and the machine starts over from
    // the mode prompt; the second attempt succeeds.
    let mut prompt = ScriptedPrompt::new(["list", "4,2,0", "range", "0,4,2", "confirm"]);
    let selection = SelectionDialog::new("time", 5).run(&mut prompt).unwrap();
    assert_eq!(selection, vec![0, 2]);

    let mode_prompts = prompt
        .transcript
        .iter()
        .filter(|l| l.starts_with("To input a range of time indices"))
        .count();
    assert_eq!(mode_prompts, 2);
}
