//! Supernova dataset management.
//!
//! The companion `sn_data_manager` binary is driven from here: pick the
//! wanted SN types, photometric bands and output quantity, scan a
//! directory of Open Supernova Catalog files, and write one light-curve
//! plotfile per supernova and band.
//!
//! Architecture:
//! ```text
//!     pick        requested types / bands, output quantity
//!       │
//!       ▼
//!  ┌──────────┐
//!  │  loader  │  *.json → CatalogEntry → matched Supernova
//!  └──────────┘
//!       │
//!       ▼
//!  ┌──────────┐
//!  │  model   │  light curves, magnitude → M / luminosity, peak offset
//!  └──────────┘
//!       │
//!       ▼
//!  ┌──────────┐
//!  │  output  │  {name}_{band}_band.dat plotfiles
//!  └──────────┘
//! ```

pub mod loader;
pub mod model;
pub mod output;
pub mod pick;
