//! Per-layer ring accumulation
//!
//! A `RingSet` is the mutable scratch state for one sampling layer of one
//! cluster. Its lifecycle is strict: reset, seed the center from the
//! hottest cell of its layer, feed every cluster cell through `add`, read
//! the accumulated pattern out once. It never carries state from one
//! cluster into the next.
//!
//! Rings are concentric squares in (Δη, Δφ) space: a cell lands in ring
//! `max(floor(|Δη|/wη), floor(|Δφ|/wφ))` relative to the center, which is
//! cheap to evaluate and matches the coarse granularity of the readout. Δφ
//! is wrapped into (−π, π] before binning so the ±π seam does not split a
//! shower in two.

use super::config::RingSetSpec;
use crate::geometry::{delta_phi, Cell, Cluster, Sampling};

/// Energy accumulator for the concentric rings of one sampling layer
#[derive(Debug, Clone)]
pub struct RingSet {
    spec: RingSetSpec,
    center: Option<(f64, f64)>,
    pattern: Vec<f64>,
}

impl RingSet {
    pub fn new(spec: RingSetSpec) -> Self {
        Self {
            center: None,
            pattern: vec![0.0; spec.n_rings],
            spec,
        }
    }

    /// Sampling layer this ring set is centered in
    pub fn sampling(&self) -> Sampling {
        self.spec.sampling
    }

    /// Number of rings
    pub fn n_rings(&self) -> usize {
        self.pattern.len()
    }

    /// Chosen ring center (η₀, φ₀), if the layer had any cell
    pub fn center(&self) -> Option<(f64, f64)> {
        self.center
    }

    /// Reset for the next cluster
    pub fn clear(&mut self) {
        self.center = None;
        for ring in &mut self.pattern {
            *ring = 0.0;
        }
    }

    /// Center the rings on the hottest cell of this layer.
    ///
    /// The first cell encountered at the maximum energy wins. A cluster
    /// with no cell in this layer leaves the center unset; the pattern then
    /// stays all-zero, `add` becomes a no-op.
    pub fn locate_center<C: Cluster>(&mut self, cluster: &C) {
        let mut hot: Option<&C::Cell> = None;
        for cell in cluster.cells() {
            if cell.sampling() != self.spec.sampling {
                continue;
            }
            match hot {
                Some(h) if cell.energy() <= h.energy() => {}
                _ => hot = Some(cell),
            }
        }
        self.center = hot.map(|cell| (cell.eta(), cell.phi()));
    }

    /// Accumulate one cell into the ring it falls in.
    ///
    /// A cell whose ring index reaches past the configured window is
    /// dropped without effect. Each call touches at most one ring.
    pub fn add(&mut self, cell: &impl Cell) {
        let Some((eta0, phi0)) = self.center else {
            return;
        };
        if self.spec.same_layer_only && cell.sampling() != self.spec.sampling {
            return;
        }

        let deta = (cell.eta() - eta0).abs();
        let dphi = delta_phi(cell.phi(), phi0).abs();
        let bin_eta = (deta / self.spec.deta).floor();
        let bin_phi = (dphi / self.spec.dphi).floor();
        let ring = bin_eta.max(bin_phi) as usize;

        if ring < self.pattern.len() {
            self.pattern[ring] += cell.energy();
        }
    }

    /// Accumulated ring energies, index 0 = innermost ring
    pub fn pattern(&self) -> &[f64] {
        &self.pattern
    }
}
