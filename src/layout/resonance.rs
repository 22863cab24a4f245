//! Connection graph and the single resonance sweep.

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::model::{NodeConnection, SegmentId, SpatialNode};

/// Source integrity above this resonates and propagates.
const RESONANCE_THRESHOLD: f64 = 85.0;
/// Boosted target integrity above this resonates.
const TARGET_THRESHOLD: f64 = 90.0;
const BOOST_SCALE: f64 = 15.0;
const SOURCE_ENERGY: f64 = 10.0;
const TARGET_ENERGY: f64 = 5.0;
/// Forward structural links per anchor.
const STRUCTURAL_FAN_OUT: usize = 2;

/// Spine edges to successors plus forward anchor-to-anchor links.
pub fn connect(nodes: &mut [SpatialNode]) {
    let anchors: Vec<usize> = nodes
        .iter()
        .enumerate()
        .filter(|(_, n)| n.is_anchor())
        .map(|(i, _)| i)
        .collect();

    for idx in 0..nodes.len() {
        if let Some(next) = nodes.get(idx + 1).map(|n| n.id) {
            nodes[idx].connections.push(NodeConnection::spine(next));
        }
        if nodes[idx].is_anchor() {
            let targets: SmallVec<[SegmentId; STRUCTURAL_FAN_OUT]> = anchors
                .iter()
                .filter(|&&a| a > idx)
                .take(STRUCTURAL_FAN_OUT)
                .map(|&a| nodes[a].id)
                .collect();
            nodes[idx]
                .connections
                .extend(targets.into_iter().map(NodeConnection::structural));
        }
    }
}

/// One ordered sweep. Boosts land immediately, so a node raised by an
/// earlier source is seen at its raised integrity when its own turn comes.
///
/// Returns the total energy released.
pub fn propagate(nodes: &mut [SpatialNode]) -> f64 {
    let index: HashMap<SegmentId, usize> = nodes.iter().enumerate().map(|(i, n)| (n.id, i)).collect();
    let mut total_energy = 0.0;

    for idx in 0..nodes.len() {
        if nodes[idx].theta_integrity <= RESONANCE_THRESHOLD {
            continue;
        }
        nodes[idx].is_resonating = true;
        total_energy += SOURCE_ENERGY;

        let source_integrity = nodes[idx].theta_integrity;
        let edges = nodes[idx].connections.clone();
        for edge in &edges {
            let Some(&target) = index.get(&edge.target_id) else { continue };
            let boost = (source_integrity / 100.0) * edge.strength * BOOST_SCALE;
            if nodes[target].boost(boost) > TARGET_THRESHOLD {
                nodes[target].is_resonating = true;
                total_energy += TARGET_ENERGY;
            }
        }
    }
    total_energy
}

/// `min(100, avg × 0.7 + (energy / N) × 2)` rounded to one decimal; 0 for no nodes.
pub fn system_resonance(nodes: &[SpatialNode], total_energy: f64) -> f64 {
    if nodes.is_empty() {
        return 0.0;
    }
    let count = nodes.len() as f64;
    let avg_integrity = nodes.iter().map(|n| n.theta_integrity).sum::<f64>() / count;
    let score = (avg_integrity * 0.7 + (total_energy / count) * 2.0).min(100.0);
    round_one_decimal(score)
}

/// Nearest one-decimal value of the exact binary `x`, ties upward. Exact ties
/// only occur at quarters (`.25`, `.75`); everything else goes through the
/// exact decimal formatter.
fn round_one_decimal(x: f64) -> f64 {
    let quarters = x * 4.0;
    if quarters.fract() == 0.0 && quarters.rem_euclid(2.0) == 1.0 {
        return (x * 10.0).round() / 10.0;
    }
    format!("{x:.1}").parse().unwrap_or(x)
}
