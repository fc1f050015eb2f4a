//! Ring-shape builder orchestration
//!
//! One `execute` call processes one event: every cluster of the event is
//! ring-shaped against every configured ring set, and the per-layer
//! patterns are concatenated into one flat feature per cluster.
//!
//! ```text
//!   clusters ──► per cluster ──► RingSet(layer 0) ─┐
//!                               RingSet(layer 1) ─┼─► concat ──► CaloRings
//!                               ...               ─┘
//!                                                        │
//!                          CaloRingsContainer ◄──────────┘  (event order)
//! ```
//!
//! Clusters of one event are independent; with `parallel` enabled they are
//! fanned out over rayon workers, each owning its private ring sets. The
//! container order is the cluster iteration order either way, so the output
//! is bit-identical between the serial and the parallel path.

use super::config::{RingSetSpec, RingerConfig};
use super::ringset::RingSet;
use crate::error::RingerError;
use crate::geometry::Cluster;
use crate::RingerResult;
use log::debug;
use rayon::prelude::*;

// ═══════════════════════════════════════════════════════════════════════════
// INPUT BOUNDARY
// ═══════════════════════════════════════════════════════════════════════════

/// Read-only handle yielding the cluster collection of the current event.
///
/// Returning `None` means the collection could not be obtained; the event
/// then produces no ring container at all.
pub trait ClusterSource {
    type Cluster: Cluster;

    /// Ordered clusters of the current event
    fn clusters(&self) -> Option<&[Self::Cluster]>;
}

impl<C: Cluster> ClusterSource for Vec<C> {
    type Cluster = C;

    fn clusters(&self) -> Option<&[C]> {
        Some(self)
    }
}

impl<C: Cluster> ClusterSource for [C] {
    type Cluster = C;

    fn clusters(&self) -> Option<&[C]> {
        Some(self)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// RING FEATURES
// ═══════════════════════════════════════════════════════════════════════════

/// Ring-shape feature of one cluster
///
/// The flat ring sequence is the concatenation of every configured layer's
/// pattern, in configured-layer order; its length is the builder's total
/// ring count. The cluster reference points back at the input the feature
/// was computed from.
#[derive(Debug, Clone)]
pub struct CaloRings<'a, C: Cluster> {
    rings: Vec<f64>,
    cluster: &'a C,
}

impl<'a, C: Cluster> CaloRings<'a, C> {
    /// Ring energies, innermost ring of the first configured layer first
    pub fn rings(&self) -> &[f64] {
        &self.rings
    }

    /// The cluster this feature was computed from
    pub fn cluster(&self) -> &'a C {
        self.cluster
    }
}

/// Event-scoped, ordered collection of ring features
///
/// One entry per input cluster, in cluster iteration order. The container
/// is populated once by the builder and read-only afterwards.
#[derive(Debug, Clone)]
pub struct CaloRingsContainer<'a, C: Cluster> {
    entries: Vec<CaloRings<'a, C>>,
}

impl<'a, C: Cluster> CaloRingsContainer<'a, C> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CaloRings<'a, C>> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CaloRings<'a, C>> {
        self.entries.iter()
    }
}

impl<'a, 'c, C: Cluster> IntoIterator for &'c CaloRingsContainer<'a, C> {
    type Item = &'c CaloRings<'a, C>;
    type IntoIter = std::slice::Iter<'c, CaloRings<'a, C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BUILDER
// ═══════════════════════════════════════════════════════════════════════════

/// Builds one `CaloRingsContainer` per event from validated configuration
#[derive(Debug, Clone)]
pub struct RingerBuilder {
    specs: Vec<RingSetSpec>,
    total_rings: usize,
    ringer_key: String,
    cluster_key: String,
    hist_path: String,
    parallel: bool,
}

impl RingerBuilder {
    /// Validate the configuration and set up the builder.
    ///
    /// Fails before any event is processed when the parallel configuration
    /// lists disagree; see [`RingerConfig::validate`].
    pub fn new(config: &RingerConfig) -> RingerResult<Self> {
        let specs = config.validate()?;
        let total_rings = specs.iter().map(|s| s.n_rings).sum();
        debug!(
            "ringer '{}': {} ring sets, {} rings total",
            config.ringer_key,
            specs.len(),
            total_rings
        );
        Ok(Self {
            specs,
            total_rings,
            ringer_key: config.ringer_key.clone(),
            cluster_key: config.cluster_key.clone(),
            hist_path: config.hist_path.clone(),
            parallel: config.parallel,
        })
    }

    /// Total ring count over all configured layers, the length of every
    /// produced ring sequence
    pub fn total_rings(&self) -> usize {
        self.total_rings
    }

    /// Validated per-layer ring specs, in configured order
    pub fn specs(&self) -> &[RingSetSpec] {
        &self.specs
    }

    /// Key the produced container is published under
    pub fn ringer_key(&self) -> &str {
        &self.ringer_key
    }

    /// Path monitoring histograms are booked under
    pub fn hist_path(&self) -> &str {
        &self.hist_path
    }

    /// Build ring shapes for every cluster of the current event.
    ///
    /// The returned container has exactly one entry per input cluster, in
    /// input order. An unobtainable cluster collection aborts the event
    /// with [`RingerError::MissingInput`] and produces nothing.
    pub fn execute<'a, S>(
        &self,
        source: &'a S,
    ) -> RingerResult<CaloRingsContainer<'a, S::Cluster>>
    where
        S: ClusterSource + ?Sized,
        S::Cluster: Sync,
    {
        let clusters = source
            .clusters()
            .ok_or_else(|| RingerError::MissingInput(self.cluster_key.clone()))?;

        let entries: Vec<CaloRings<'a, S::Cluster>> = if self.parallel {
            clusters
                .par_iter()
                .map(|cluster| self.build_cluster(cluster))
                .collect()
        } else {
            clusters
                .iter()
                .map(|cluster| self.build_cluster(cluster))
                .collect()
        };

        debug!(
            "ringer '{}': built {} ring shapes",
            self.ringer_key,
            entries.len()
        );
        Ok(CaloRingsContainer { entries })
    }

    /// Ring-shape a single cluster against every configured layer
    fn build_cluster<'a, C: Cluster>(&self, cluster: &'a C) -> CaloRings<'a, C> {
        let mut rings = Vec::with_capacity(self.total_rings);

        for spec in &self.specs {
            let mut ring_set = RingSet::new(*spec);
            ring_set.locate_center(cluster);
            for cell in cluster.cells() {
                ring_set.add(cell);
            }
            rings.extend_from_slice(ring_set.pattern());
        }

        CaloRings { rings, cluster }
    }
}
