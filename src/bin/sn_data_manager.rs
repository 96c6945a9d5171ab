use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use spectra_scope::catalog::loader::scan_catalog;
use spectra_scope::catalog::output::write_plotfiles;
use spectra_scope::catalog::pick::{pick_from, pick_output_kind};
use spectra_scope::select::prompt::ConsolePrompt;

/// Spectral types the catalog filter accepts.
const SN_TYPES: &[&str] = &["Ia", "Ib", "Ic", "II", "IIn", "IIP", "IIPec"];
/// The classic single-letter photometric bands.
const SN_BANDS: &[&str] = &["U", "B", "V", "R", "I"];

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory scanned for Open Supernova Catalog .json files
    #[arg(value_name = "CATALOG_DIR", default_value = ".")]
    catalog_dir: PathBuf,

    /// Directory the light-curve plotfiles are written to
    #[arg(long, value_name = "DIR", default_value = "plotfiles")]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Welcome to the Supernova Data Manager!");
    println!("The purpose of this program is to organize data");
    println!("according to the user's wishes and output it for");
    println!("subsequent analysis (plotting, etc.)");
    println!();
    println!("We will soon read data from input files");
    println!("(with .json extensions, available for download");
    println!("from The Open Supernova Catalog (https://sne.space))");
    println!("but first you will be asked questions to help us");
    println!("pre-filter the data to be read");
    println!();

    let mut prompt = ConsolePrompt;

    println!("Select from the following list all the spectral types you wish to extract data for:");
    println!("{}", SN_TYPES.join(","));
    println!();
    println!("Supernova files which do not match any of your selected types");
    println!("will not have their data stored.");
    let types = pick_from(&mut prompt, "SN type", SN_TYPES).context("selecting SN types")?;
    println!();

    println!("Select from the following list all the photometric bands you wish to extract data for:");
    println!("{}", SN_BANDS.join(","));
    println!();
    println!("Supernova data which were not observed in any of your selected bands");
    println!("will not be stored; the rest is kept separately per band and finally");
    println!("written out as one file per supernova and observed photometric band.");
    let bands = pick_from(&mut prompt, "photometric band", SN_BANDS)
        .context("selecting photometric bands")?;
    println!();

    let kind = pick_output_kind(&mut prompt).context("choosing the output quantity")?;

    let supernovae = scan_catalog(&args.catalog_dir, &types, &bands, kind)
        .with_context(|| format!("scanning {}", args.catalog_dir.display()))?;
    println!("You have imported data for {} supernova(e)", supernovae.len());
    println!("Now the program will output data to filenames based on the names");
    println!("of the matching supernovae and your requested bands.");

    let written = write_plotfiles(&supernovae, kind, &args.out_dir)
        .with_context(|| format!("writing plotfiles to {}", args.out_dir.display()))?;
    println!("Wrote {written} plotfiles to {}", args.out_dir.display());
    Ok(())
}
