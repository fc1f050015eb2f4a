//! # Ring-Shape Builder
//!
//! Turns each reconstructed calorimeter cluster into a fixed-length vector
//! of ring energies for downstream particle identification.
//!
//! For every configured sampling layer the cluster's hottest cell in that
//! layer becomes the ring center; every cluster cell is then binned into
//! concentric square rings of configurable (Δη, Δφ) step around it. The
//! per-layer patterns are concatenated, in configured-layer order, into one
//! flat feature per cluster.
//!
//! | Term         | Meaning                                                |
//! |--------------|--------------------------------------------------------|
//! | Hot cell     | Highest-energy cell of one layer, the ring center      |
//! | Ring         | One quantized square bin of angular distance           |
//! | Ring pattern | Summed energies of one layer's rings, innermost first  |
//! | Ring shape   | Concatenated patterns of all layers for one cluster    |
//!
//! ## Usage
//!
//! ```rust,ignore
//! use calo_ringer::{RingerBuilder, RingerConfig};
//!
//! let builder = RingerBuilder::new(&RingerConfig::default())?;
//!
//! // Once per event
//! let container = builder.execute(&clusters)?;
//! for rings in &container {
//!     classifier.feed(rings.rings(), rings.cluster());
//! }
//! ```

pub mod builder;
pub mod config;
pub mod ringset;

pub use builder::{CaloRings, CaloRingsContainer, ClusterSource, RingerBuilder};
pub use config::{RingSetSpec, RingerConfig};
pub use ringset::RingSet;
