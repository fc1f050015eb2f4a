//! Ring-shape monitoring
//!
//! Accumulates the per-ring energy distribution across events and derives
//! the mean ring profile from it. Energies are recorded in GeV; the builder
//! works in MeV, the conversion happens at fill time.

use crate::geometry::Cluster;
use crate::ringer::CaloRingsContainer;
use serde::{Deserialize, Serialize};

const MEV_PER_GEV: f64 = 1.0e3;

// ═══════════════════════════════════════════════════════════════════════════
// HISTOGRAM
// ═══════════════════════════════════════════════════════════════════════════

/// Histogram with uniform bins and under/overflow tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Histogram {
    /// Bin edges
    pub edges: Vec<f64>,
    /// Bin counts
    pub counts: Vec<u64>,
    /// Total entries
    pub total: u64,
    /// Underflow count
    pub underflow: u64,
    /// Overflow count
    pub overflow: u64,
    /// Sum of values (for mean)
    sum: f64,
    /// Sum of squared values (for variance)
    sum_sq: f64,
}

impl Histogram {
    /// Create a histogram with uniform bins
    pub fn new(min: f64, max: f64, n_bins: usize) -> Self {
        let step = (max - min) / n_bins as f64;
        let edges: Vec<f64> = (0..=n_bins).map(|i| min + i as f64 * step).collect();
        Self {
            edges,
            counts: vec![0; n_bins],
            total: 0,
            underflow: 0,
            overflow: 0,
            sum: 0.0,
            sum_sq: 0.0,
        }
    }

    /// Fill histogram with a value
    pub fn fill(&mut self, value: f64) {
        self.total += 1;
        self.sum += value;
        self.sum_sq += value * value;

        if value < self.edges[0] {
            self.underflow += 1;
            return;
        }
        if value >= *self.edges.last().unwrap() {
            self.overflow += 1;
            return;
        }

        let bin = self.edges.partition_point(|&e| e <= value) - 1;
        if bin < self.counts.len() {
            self.counts[bin] += 1;
        }
    }

    /// Get mean
    pub fn mean(&self) -> f64 {
        if self.total > 0 {
            self.sum / self.total as f64
        } else {
            0.0
        }
    }

    /// Get variance
    pub fn variance(&self) -> f64 {
        if self.total > 1 {
            let mean = self.mean();
            self.sum_sq / self.total as f64 - mean * mean
        } else {
            0.0
        }
    }

    /// Get standard deviation
    pub fn std(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Get bin center for a given index
    pub fn bin_center(&self, bin: usize) -> f64 {
        if bin < self.counts.len() {
            (self.edges[bin] + self.edges[bin + 1]) / 2.0
        } else {
            0.0
        }
    }

    /// Reset histogram
    pub fn reset(&mut self) {
        for c in &mut self.counts {
            *c = 0;
        }
        self.total = 0;
        self.underflow = 0;
        self.overflow = 0;
        self.sum = 0.0;
        self.sum_sq = 0.0;
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// RINGER MONITOR
// ═══════════════════════════════════════════════════════════════════════════

/// Per-ring energy distributions accumulated across events
///
/// One histogram per ring, filled from every produced container. The ring
/// profile is the vector of per-ring mean energies, the standard end-of-job
/// summary of the ring shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingerMonitor {
    hist_path: String,
    rings: Vec<Histogram>,
    n_filled: u64,
}

impl RingerMonitor {
    /// Book one 150-bin [0, 150) GeV histogram per ring under `hist_path`
    pub fn new(hist_path: &str, total_rings: usize) -> Self {
        Self {
            hist_path: hist_path.to_string(),
            rings: (0..total_rings)
                .map(|_| Histogram::new(0.0, 150.0, 150))
                .collect(),
            n_filled: 0,
        }
    }

    /// Path the histograms are booked under
    pub fn hist_path(&self) -> &str {
        &self.hist_path
    }

    /// Number of ring shapes filled so far
    pub fn n_filled(&self) -> u64 {
        self.n_filled
    }

    /// Per-ring histograms, in ring order
    pub fn ring_histograms(&self) -> &[Histogram] {
        &self.rings
    }

    /// Fill the per-ring histograms from one event's container
    pub fn fill<C: Cluster>(&mut self, container: &CaloRingsContainer<'_, C>) {
        for rings in container {
            for (hist, &energy) in self.rings.iter_mut().zip(rings.rings()) {
                hist.fill(energy / MEV_PER_GEV);
            }
            self.n_filled += 1;
        }
    }

    /// Mean energy per ring in GeV, in ring order
    pub fn ring_profile(&self) -> Vec<f64> {
        self.rings.iter().map(Histogram::mean).collect()
    }

    /// Reset all histograms
    pub fn reset(&mut self) {
        for hist in &mut self.rings {
            hist.reset();
        }
        self.n_filled = 0;
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let profile = self.ring_profile();
        let (hottest, peak) = profile
            .iter()
            .enumerate()
            .fold((0, 0.0), |(bi, be), (i, &e)| {
                if e > be {
                    (i, e)
                } else {
                    (bi, be)
                }
            });

        format!(
            "Ringer Monitor @ '{}'\n\
             ├─ rings: {}\n\
             ├─ shapes filled: {}\n\
             ├─ hottest ring: {} (<E> = {:.3} GeV)\n\
             └─ outermost ring <E>: {:.3} GeV",
            self.hist_path,
            self.rings.len(),
            self.n_filled,
            hottest,
            peak,
            profile.last().copied().unwrap_or(0.0)
        )
    }
}
