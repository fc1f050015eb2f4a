//! Integration tests for the ring-shape pipeline
//!
//! End-to-end checks from configuration through builder to container and
//! monitoring, on constructed multi-layer events.

use crate::geometry::{CaloCell, CaloCluster, Cell, Sampling};
use crate::monitoring::RingerMonitor;
use crate::ringer::{RingerBuilder, RingerConfig};
use std::f64::consts::PI;

fn two_layer_config() -> RingerConfig {
    RingerConfig {
        layer_rings: vec![Sampling::EMB2, Sampling::TileCal1],
        n_rings: vec![4, 2],
        deta_rings: vec![0.025, 0.1],
        dphi_rings: vec![0.025, 0.1],
        ..Default::default()
    }
}

/// Deterministic shower-like cluster around (eta, phi)
fn shower(eta: f64, phi: f64, core_energy: f64) -> CaloCluster {
    let mut cells = vec![CaloCell::new(eta, phi, core_energy, Sampling::EMB2)];
    for i in 1..6 {
        let offset = i as f64 * 0.02;
        cells.push(CaloCell::new(
            eta + offset,
            phi,
            core_energy / (i + 1) as f64,
            Sampling::EMB2,
        ));
        cells.push(CaloCell::new(
            eta,
            phi - offset,
            core_energy / (i + 2) as f64,
            Sampling::TileCal1,
        ));
    }
    CaloCluster::new(cells)
}

// ═══════════════════════════════════════════════════════════════════════════
// PIPELINE TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod pipeline_tests {
    use super::*;

    #[test]
    fn test_full_pipeline_shapes_every_cluster() {
        let _ = env_logger::builder().is_test(true).try_init();

        let builder = RingerBuilder::new(&two_layer_config()).unwrap();
        let clusters: Vec<CaloCluster> = (0..10)
            .map(|i| shower(-1.0 + i as f64 * 0.2, i as f64 * 0.5 - PI, 5000.0))
            .collect();

        let container = builder.execute(&clusters).unwrap();
        assert_eq!(container.len(), clusters.len());

        for (i, rings) in container.iter().enumerate() {
            assert_eq!(rings.rings().len(), 6);
            assert!(std::ptr::eq(rings.cluster(), &clusters[i]));
            // Every shower deposits energy somewhere inside the window
            assert!(rings.rings().iter().sum::<f64>() > 0.0);
        }
    }

    #[test]
    fn test_idempotent_rerun_is_bit_identical() {
        let builder = RingerBuilder::new(&two_layer_config()).unwrap();
        let clusters: Vec<CaloCluster> =
            (0..8).map(|i| shower(i as f64 * 0.3, 0.0, 3000.0)).collect();

        let first = builder.execute(&clusters).unwrap();
        let second = builder.execute(&clusters).unwrap();

        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.rings(), b.rings());
        }
    }

    #[test]
    fn test_windowed_energy_conservation_per_layer() {
        // One EM layer, all cells in-window except one forced outside
        let config = RingerConfig {
            layer_rings: vec![Sampling::EMB2],
            n_rings: vec![4],
            deta_rings: vec![0.025],
            dphi_rings: vec![0.025],
            ..Default::default()
        };
        let builder = RingerBuilder::new(&config).unwrap();

        let inside = [
            CaloCell::new(0.0, 0.0, 8000.0, Sampling::EMB2),
            CaloCell::new(0.03, 0.0, 1000.0, Sampling::EMB2),
            CaloCell::new(0.0, -0.06, 500.0, Sampling::EMB2),
        ];
        let outside = CaloCell::new(0.5, 0.0, 9999.0, Sampling::TileCal1);

        let mut cells = inside.to_vec();
        cells.push(outside);
        let clusters = vec![CaloCluster::new(cells)];

        let container = builder.execute(&clusters).unwrap();
        let total: f64 = container.get(0).unwrap().rings().iter().sum();
        let expected: f64 = inside.iter().map(|c| c.energy()).sum();
        assert!((total - expected).abs() < 1e-9);
    }

    #[test]
    fn test_cluster_with_empty_layer_still_shaped() {
        // No TileCal1 cell at all: the second layer's slice must be zeros
        let builder = RingerBuilder::new(&two_layer_config()).unwrap();
        let clusters = vec![CaloCluster::new(vec![CaloCell::new(
            0.2,
            0.1,
            6000.0,
            Sampling::EMB2,
        )])];

        let container = builder.execute(&clusters).unwrap();
        let rings = container.get(0).unwrap().rings();
        assert!((rings[0] - 6000.0).abs() < 1e-9);
        assert_eq!(&rings[4..], &[0.0, 0.0]);
    }

    #[test]
    fn test_event_isolation_across_runs() {
        // Containers of consecutive events never share or carry state
        let builder = RingerBuilder::new(&two_layer_config()).unwrap();

        let event_a = vec![shower(0.0, 0.0, 4000.0)];
        let event_b: Vec<CaloCluster> = Vec::new();

        let a = builder.execute(&event_a).unwrap();
        let b = builder.execute(&event_b).unwrap();
        assert_eq!(a.len(), 1);
        assert!(b.is_empty());

        let a_again = builder.execute(&event_a).unwrap();
        assert_eq!(
            a.get(0).unwrap().rings(),
            a_again.get(0).unwrap().rings()
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// MONITORING TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod monitoring_tests {
    use super::*;

    #[test]
    fn test_monitor_accumulates_across_events() {
        let builder = RingerBuilder::new(&two_layer_config()).unwrap();
        let mut monitor = RingerMonitor::new(builder.hist_path(), builder.total_rings());

        for event in 0..3 {
            let clusters: Vec<CaloCluster> = (0..4)
                .map(|i| shower(event as f64 * 0.1, i as f64 * 0.4, 2000.0))
                .collect();
            let container = builder.execute(&clusters).unwrap();
            monitor.fill(&container);
        }

        assert_eq!(monitor.n_filled(), 12);
        let profile = monitor.ring_profile();
        assert_eq!(profile.len(), builder.total_rings());
        // The innermost EM ring carries the shower core
        assert!(profile[0] > 0.0);
        println!("{}", monitor.summary());
    }

    #[test]
    fn test_monitor_converts_to_gev() {
        let config = RingerConfig {
            layer_rings: vec![Sampling::EMB2],
            n_rings: vec![1],
            deta_rings: vec![0.1],
            dphi_rings: vec![0.1],
            ..Default::default()
        };
        let builder = RingerBuilder::new(&config).unwrap();
        let mut monitor = RingerMonitor::new(builder.hist_path(), builder.total_rings());

        // 12 GeV deposit, stored in MeV
        let clusters = vec![CaloCluster::new(vec![CaloCell::new(
            0.0,
            0.0,
            12_000.0,
            Sampling::EMB2,
        )])];
        monitor.fill(&builder.execute(&clusters).unwrap());

        assert!((monitor.ring_profile()[0] - 12.0).abs() < 1e-12);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CONFIG ROUND-TRIP TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_builder_from_json_config() {
        let json = serde_json::to_string(&two_layer_config()).unwrap();
        let config: RingerConfig = serde_json::from_str(&json).unwrap();

        let builder = RingerBuilder::new(&config).unwrap();
        assert_eq!(builder.total_rings(), 6);
        assert_eq!(builder.ringer_key(), "Rings");
    }

    #[test]
    fn test_builder_from_json_file() {
        let path = std::env::temp_dir().join("calo_ringer_config.json");
        std::fs::write(&path, serde_json::to_string(&two_layer_config()).unwrap()).unwrap();

        let config = RingerConfig::from_json_file(&path).unwrap();
        let builder = RingerBuilder::new(&config).unwrap();
        assert_eq!(builder.total_rings(), 6);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_invalid_config_never_builds() {
        let config = RingerConfig {
            deta_rings: vec![0.025],
            ..two_layer_config()
        };
        assert!(RingerBuilder::new(&config).is_err());
    }
}
