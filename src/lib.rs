//! # Calo Ringer
//!
//! Ring-shaped energy features from calorimeter clusters, for electron and
//! photon identification in offline event reconstruction.
//!
//! Each reconstructed cluster is reduced to one fixed-length vector: per
//! configured sampling layer, energies are accumulated into concentric
//! square rings around the layer's hottest cell, and the per-layer ring
//! patterns are concatenated in configured-layer order.
//!
//! ## Features
//! - Per-layer ring granularity (ring count, η and φ step) from parallel
//!   property lists, validated once before the first event
//! - Hot-cell center finding with stable first-maximum tie handling
//! - φ binning wrapped across the ±π seam
//! - Optional rayon fan-out over the clusters of one event, with output
//!   identical to the serial path
//! - Per-ring monitoring histograms and mean ring profile
//!
//! ## Architecture
//!
//! ```text
//! Event ──► ClusterSource ──► RingerBuilder ──► CaloRingsContainer
//!                                  │
//!                 ┌────────────────┼───────────────┐
//!                 │  RingSet(PSB)  RingSet(EMB1) … │   one per layer,
//!                 │  center-find + square-ring bin │   per cluster
//!                 └────────────────┬───────────────┘
//!                                  │
//!                        concat patterns ──► CaloRings (+ cluster ref)
//! ```

// Core modules
pub mod error;
pub mod geometry;
pub mod monitoring;
pub mod ringer;

// Integration tests
#[cfg(test)]
mod tests;

// Re-exports from core modules
pub use error::RingerError;
pub use geometry::{delta_phi, CaloCell, CaloCluster, Cell, Cluster, Sampling};
pub use monitoring::{Histogram, RingerMonitor};
pub use ringer::{
    CaloRings, CaloRingsContainer, ClusterSource, RingSet, RingSetSpec, RingerBuilder,
    RingerConfig,
};

/// Result type for ringer operations
pub type RingerResult<T> = Result<T, RingerError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CaloCell, CaloCluster, CaloRings, CaloRingsContainer, Cell, Cluster, ClusterSource,
        RingSet, RingSetSpec, RingerBuilder, RingerConfig, RingerError, RingerMonitor,
        RingerResult, Sampling,
    };
}
