//! Read Open Supernova Catalog files and assemble the matching supernovae.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::model::{OutputKind, Supernova};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("{path}: not a valid catalog file: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}: catalog file holds no supernova entry")]
    NoEntry { path: String },
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// One supernova's record in a catalog file. Every value arrives as a
/// string; fields the manager has no use for are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub name: Option<String>,
    #[serde(default)]
    pub claimedtype: Vec<Quantity>,
    #[serde(default)]
    pub lumdist: Vec<Quantity>,
    #[serde(default)]
    pub photometry: Vec<Photometry>,
}

/// A measured quantity; the catalog wraps each one in value/source pairs.
#[derive(Debug, Clone, Deserialize)]
pub struct Quantity {
    pub value: String,
}

/// One photometric observation. Spectra and other non-photometric rows
/// lack some of these fields and are skipped downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct Photometry {
    pub time: Option<String>,
    pub band: Option<String>,
    pub magnitude: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parse one catalog file. The top-level object maps the supernova's name
/// to its record; the first record is taken.
pub fn load_entry(path: &Path) -> Result<CatalogEntry, CatalogError> {
    let text = std::fs::read_to_string(path)?;
    let file: BTreeMap<String, CatalogEntry> =
        serde_json::from_str(&text).map_err(|source| CatalogError::Json {
            path: path.display().to_string(),
            source,
        })?;
    file.into_values().next().ok_or_else(|| CatalogError::NoEntry {
        path: path.display().to_string(),
    })
}

/// The first claimed type that matches a requested type, in the order the
/// file claims them. Claimed values carry stray spaces ("II P"), so spaces
/// are stripped before comparing.
pub fn matched_type(entry: &CatalogEntry, requested: &[String]) -> Option<String> {
    entry
        .claimedtype
        .iter()
        .map(|q| q.value.replace(' ', ""))
        .find(|t| requested.iter().any(|r| r == t))
}

/// The luminosity distance in parsecs. Catalog files record it in Mpc.
fn lumdist_pc(entry: &CatalogEntry) -> Option<f64> {
    let mpc: f64 = entry.lumdist.first()?.value.trim().parse().ok()?;
    Some(mpc * 1.0e6)
}

/// Scan `dir` for `.json` catalog files and build one converted,
/// peak-offset supernova per file whose claimed type matches a requested
/// type. Files that fail to parse or lack a usable luminosity distance
/// are skipped with a warning; unmatched files are skipped silently.
pub fn scan_catalog(
    dir: &Path,
    requested_types: &[String],
    requested_bands: &[String],
    kind: OutputKind,
) -> Result<Vec<Supernova>, CatalogError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    // Directory order is platform-dependent; sort so runs are repeatable.
    paths.sort();

    let mut supernovae = Vec::new();
    for path in paths {
        log::info!("reading {}", path.display());
        let entry = match load_entry(&path) {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("skipping {}: {err}", path.display());
                continue;
            }
        };

        let Some(sn_type) = matched_type(&entry, requested_types) else {
            log::info!("{}: no claimed type matches a requested type", path.display());
            continue;
        };
        let Some(lumdist) = lumdist_pc(&entry) else {
            log::warn!("skipping {}: no usable luminosity distance", path.display());
            continue;
        };
        let name = entry.name.clone().unwrap_or_else(|| file_stem_name(&path));
        log::info!("matched {name} ({sn_type})");

        let mut sn = Supernova::from_entry(name, sn_type, lumdist, &entry, requested_bands);
        sn.convert(kind);
        sn.offset_times_by_peak();
        supernovae.push(sn);
    }
    Ok(supernovae)
}

fn file_stem_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const IA_FILE: &str = r#"{
  "SN2011fe": {
    "name": "SN2011fe",
    "claimedtype": [ { "value": "Ia" } ],
    "lumdist": [ { "value": "1.0" } ],
    "photometry": [
      { "time": "100.0", "band": "B", "magnitude": "13.0" },
      { "time": "102.0", "band": "B", "magnitude": "11.0" },
      { "time": "104.0", "band": "B", "magnitude": "12.0" },
      { "time": "103.0", "band": "V", "magnitude": "12.5" },
      { "time": "103.5", "instrument": "spectrograph" }
    ]
  }
}"#;

    const IIP_FILE: &str = r#"{
  "SN1987A": {
    "name": "SN1987A",
    "claimedtype": [ { "value": "II P" } ],
    "lumdist": [ { "value": "0.05" } ],
    "photometry": [ { "time": "1.0", "band": "B", "magnitude": "4.0" } ]
  }
}"#;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9 * b.abs().max(1.0)
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "spectra_scope_catalog_{name}_{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn scan_converts_and_offsets_matching_files() {
        let dir = scratch_dir("scan");
        std::fs::write(dir.join("sn2011fe.json"), IA_FILE).unwrap();
        std::fs::write(dir.join("sn1987a.json"), IIP_FILE).unwrap();
        std::fs::write(dir.join("notes.txt"), "not a catalog file").unwrap();

        let found = scan_catalog(
            &dir,
            &strings(&["Ia"]),
            &strings(&["B"]),
            OutputKind::AbsoluteMagnitude,
        )
        .unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(found.len(), 1);
        let sn = &found[0];
        assert_eq!(sn.name, "SN2011fe");
        assert_eq!(sn.sn_type, "Ia");
        // 1 Mpc means a distance modulus of 25; the peak is the 11.0 mag
        // observation at time 102.
        assert_eq!(sn.curves.len(), 1);
        assert_eq!(sn.curves[0].times, vec![-2.0, 0.0, 2.0]);
        assert!(close(sn.curves[0].values[0], -12.0));
        assert!(close(sn.curves[0].values[1], -14.0));
        assert!(close(sn.curves[0].values[2], -13.0));
    }

    #[test]
    fn claimed_type_spaces_are_stripped() {
        let dir = scratch_dir("spaces");
        std::fs::write(dir.join("sn1987a.json"), IIP_FILE).unwrap();

        let found = scan_catalog(
            &dir,
            &strings(&["IIP"]),
            &strings(&["B"]),
            OutputKind::AbsoluteMagnitude,
        )
        .unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].sn_type, "IIP");
    }

    #[test]
    fn first_matching_claimed_type_wins() {
        let entry = CatalogEntry {
            name: None,
            claimedtype: vec![
                Quantity {
                    value: "Candidate".into(),
                },
                Quantity {
                    value: "I a".into(),
                },
                Quantity { value: "II".into() },
            ],
            lumdist: Vec::new(),
            photometry: Vec::new(),
        };
        // "I a" strips to "Ia": the file's claim order decides, not the
        // request order.
        assert_eq!(
            matched_type(&entry, &strings(&["II", "Ia"])),
            Some("Ia".into())
        );
    }

    #[test]
    fn unmatched_and_malformed_files_are_skipped() {
        let dir = scratch_dir("skips");
        std::fs::write(dir.join("sn2011fe.json"), IA_FILE).unwrap();
        std::fs::write(dir.join("broken.json"), "{ not json").unwrap();
        std::fs::write(dir.join("sn1987a.json"), IIP_FILE).unwrap();

        let found = scan_catalog(
            &dir,
            &strings(&["Ia"]),
            &strings(&["B"]),
            OutputKind::AbsoluteMagnitude,
        )
        .unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "SN2011fe");
    }

    #[test]
    fn missing_lumdist_skips_the_file() {
        let dir = scratch_dir("nodist");
        std::fs::write(
            dir.join("sn.json"),
            r#"{ "SNX": { "name": "SNX", "claimedtype": [ { "value": "Ia" } ] } }"#,
        )
        .unwrap();

        let found = scan_catalog(
            &dir,
            &strings(&["Ia"]),
            &strings(&["B"]),
            OutputKind::AbsoluteMagnitude,
        )
        .unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert!(found.is_empty());
    }

    #[test]
    fn load_entry_reports_bad_json_with_the_path() {
        let dir = scratch_dir("badjson");
        let path = dir.join("broken.json");
        std::fs::write(&path, "{").unwrap();

        let err = load_entry(&path).unwrap_err();
        std::fs::remove_dir_all(&dir).unwrap();

        assert!(matches!(err, CatalogError::Json { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn an_empty_object_is_no_entry() {
        let dir = scratch_dir("empty");
        let path = dir.join("empty.json");
        std::fs::write(&path, "{}").unwrap();

        let err = load_entry(&path).unwrap_err();
        std::fs::remove_dir_all(&dir).unwrap();

        assert!(matches!(err, CatalogError::NoEntry { .. }));
    }

    #[test]
    fn a_missing_directory_is_an_io_error() {
        let err = scan_catalog(
            Path::new("/no/such/catalog"),
            &strings(&["Ia"]),
            &strings(&["B"]),
            OutputKind::AbsoluteMagnitude,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
