//! Data layer: the power table, its loader, and per-channel statistics.
//!
//! Architecture:
//! ```text
//!     .csv
//!       │
//!       ▼
//!  ┌──────────┐
//!  │  loader  │  parse file → PowerTable
//!  └──────────┘
//!       │
//!       ▼
//!  ┌────────────┐
//!  │ PowerTable │  R×C values, row labels, channel names
//!  └────────────┘
//!       │
//!       ▼
//!  ┌──────────┐
//!  │  stats   │  per-channel mean / std → SNR vector
//!  └──────────┘
//! ```

pub mod loader;
pub mod model;
pub mod stats;
