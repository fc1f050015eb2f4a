//! Ring layout configuration
//!
//! The ring layout is declared as parallel property lists, one entry per
//! sampling layer to be ring-shaped: the layer itself, how many rings to
//! accumulate, and the η and φ bin widths of one ring step. The lists are
//! validated together exactly once, before the first event; a mismatch is a
//! configuration error, never a silent truncation.

use crate::error::RingerError;
use crate::geometry::Sampling;
use crate::RingerResult;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Configuration for the ring-shape builder
///
/// `layer_rings`, `n_rings`, `deta_rings` and `dphi_rings` are parallel
/// lists and must have equal length. `same_layer_only` is an optional fifth
/// list: empty means every ring set accumulates cells from all layers (the
/// default), otherwise it must match the others in length and restricts
/// each ring set to cells of its own layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RingerConfig {
    /// Key the ring container is published under
    pub ringer_key: String,
    /// Key of the event cluster collection read as input
    pub cluster_key: String,
    /// Path monitoring histograms are booked under
    pub hist_path: String,
    /// Sampling layer of each ring set
    pub layer_rings: Vec<Sampling>,
    /// Ring count of each ring set
    pub n_rings: Vec<i64>,
    /// η width of one ring step, per ring set
    pub deta_rings: Vec<f64>,
    /// φ width of one ring step, per ring set
    pub dphi_rings: Vec<f64>,
    /// Restrict each ring set to cells of its own layer
    pub same_layer_only: Vec<bool>,
    /// Process clusters of one event in parallel
    pub parallel: bool,
}

impl Default for RingerConfig {
    fn default() -> Self {
        // The standard 100-ring electron/photon layout: 8 presampler rings,
        // a fine 64-ring strip layer, then coarser EM and hadronic sets.
        Self {
            ringer_key: "Rings".to_string(),
            cluster_key: "Clusters".to_string(),
            hist_path: "Event/RingerBuilder".to_string(),
            layer_rings: vec![
                Sampling::PSB,
                Sampling::EMB1,
                Sampling::EMB2,
                Sampling::EMB3,
                Sampling::TileCal1,
                Sampling::TileCal2,
                Sampling::TileCal3,
            ],
            n_rings: vec![8, 64, 8, 8, 4, 4, 4],
            deta_rings: vec![0.025, 0.003125, 0.025, 0.05, 0.1, 0.1, 0.2],
            dphi_rings: vec![
                PI / 32.0,
                PI / 32.0,
                PI / 128.0,
                PI / 128.0,
                PI / 32.0,
                PI / 32.0,
                PI / 32.0,
            ],
            same_layer_only: Vec::new(),
            parallel: false,
        }
    }
}

impl RingerConfig {
    /// Load a configuration from a JSON file.
    ///
    /// Unknown property keys are rejected, not ignored.
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> RingerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Check the parallel lists and build one validated spec per ring set.
    ///
    /// This is the only fail-fast gate of the subsystem: it runs before any
    /// event is processed and rejects unequal list lengths, negative ring
    /// counts and non-positive bin widths.
    pub fn validate(&self) -> RingerResult<Vec<RingSetSpec>> {
        let expected = self.layer_rings.len();

        if self.n_rings.len() != expected {
            return Err(RingerError::LengthMismatch {
                name: "n_rings",
                expected,
                got: self.n_rings.len(),
            });
        }
        if self.deta_rings.len() != expected {
            return Err(RingerError::LengthMismatch {
                name: "deta_rings",
                expected,
                got: self.deta_rings.len(),
            });
        }
        if self.dphi_rings.len() != expected {
            return Err(RingerError::LengthMismatch {
                name: "dphi_rings",
                expected,
                got: self.dphi_rings.len(),
            });
        }
        if !self.same_layer_only.is_empty() && self.same_layer_only.len() != expected {
            return Err(RingerError::LengthMismatch {
                name: "same_layer_only",
                expected,
                got: self.same_layer_only.len(),
            });
        }

        let mut specs = Vec::with_capacity(expected);
        for i in 0..expected {
            let sampling = self.layer_rings[i];
            if self.n_rings[i] < 0 {
                return Err(RingerError::NegativeRingCount {
                    sampling,
                    count: self.n_rings[i],
                });
            }
            if self.deta_rings[i] <= 0.0 {
                return Err(RingerError::NonPositiveWidth {
                    sampling,
                    width: self.deta_rings[i],
                });
            }
            if self.dphi_rings[i] <= 0.0 {
                return Err(RingerError::NonPositiveWidth {
                    sampling,
                    width: self.dphi_rings[i],
                });
            }
            specs.push(RingSetSpec {
                sampling,
                n_rings: self.n_rings[i] as usize,
                deta: self.deta_rings[i],
                dphi: self.dphi_rings[i],
                same_layer_only: self.same_layer_only.get(i).copied().unwrap_or(false),
            });
        }

        Ok(specs)
    }
}

/// Validated layout of one ring set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingSetSpec {
    /// Sampling layer the ring center is searched in
    pub sampling: Sampling,
    /// Number of concentric rings
    pub n_rings: usize,
    /// η width of one ring step
    pub deta: f64,
    /// φ width of one ring step
    pub dphi: f64,
    /// Accumulate only cells of `sampling` instead of all cluster cells
    pub same_layer_only: bool,
}
