//! Interactive SNR explorer for tabular spectral power data.
//!
//! The pipeline: load a power table, compute per-channel statistics, walk
//! the user through two console index selections, then render the
//! diagnostic figures in a window or to PNG files.
//!
//! The [`catalog`] module backs the companion `sn_data_manager` binary,
//! which curates Open Supernova Catalog light-curve data into plotfiles.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod color;
pub mod data;
pub mod export;
pub mod figures;
pub mod select;
pub mod state;
pub mod ui;
