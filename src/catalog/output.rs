//! Write per-band light-curve plotfiles.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::loader::CatalogError;
use super::model::{OutputKind, Supernova};

/// Write one `.dat` plotfile per supernova per requested band into `dir`,
/// named `{supernova}_{band}_band.dat`. Header lines start with `#` so
/// gnuplot ignores them; after a blank separator each data row is a
/// `time  value` pair with the value in scientific notation. A band with
/// no observations still gets its headers-only file. Returns the number
/// of files written.
pub fn write_plotfiles(
    supernovae: &[Supernova],
    kind: OutputKind,
    dir: &Path,
) -> Result<usize, CatalogError> {
    std::fs::create_dir_all(dir)?;

    let mut written = 0;
    for sn in supernovae {
        for curve in &sn.curves {
            let path = dir.join(format!("{}_{}_band.dat", sn.name, curve.band));
            let mut file = File::create(&path)?;
            writeln!(file, "#{} {} band light curve", sn.name, curve.band)?;
            writeln!(file, "{}", kind.columns_header())?;
            writeln!(file)?;
            for (t, v) in curve.times.iter().zip(&curve.values) {
                writeln!(file, "{t}  {v:e}")?;
            }
            log::info!("wrote {}", path.display());
            written += 1;
        }
    }
    Ok(written)
}
