use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Power table to analyze (.csv with a header row and a row-label column)
    #[arg(value_name = "TABLE")]
    pub table: PathBuf,

    /// Write power.png and snr.png to this directory instead of opening a window
    #[arg(long, value_name = "DIR")]
    pub save_dir: Option<PathBuf>,
}
