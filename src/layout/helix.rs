//! Helix geometry: global shape parameters and per-node placement.

use std::f64::consts::PI;

use crate::model::{OperationType, ShapeRole, SpatialNode, Stage2Data, Stage2Output, Vector3};

const BASE_ROTATIONS: f64 = 2.5;
const COMPLEXITY_ROTATIONS: f64 = 3.5;
const DENSITY_CAP: usize = 40;
const BASE_HEIGHT: f64 = 600.0;
const HEIGHT_PER_NODE: f64 = 45.0;
const HELIX_VARIANCE: f64 = 40.0;

/// Shape parameters derived from the whole Stage 2 output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelixShape {
    pub count: usize,
    pub complexity_ratio: f64,
    pub density_factor: f64,
    pub rotations: f64,
    pub total_height: f64,
    pub total_angle: f64,
}

impl HelixShape {
    pub fn from_stage2(stage2: &Stage2Output) -> Self {
        let count = stage2.len();
        let complex_ops = stage2
            .iter()
            .filter(|d| d.has_operation(OperationType::Fusion) || d.has_operation(OperationType::Threshold))
            .count();
        let complexity_ratio = if count > 0 { complex_ops as f64 / count as f64 } else { 0.0 };
        let density_factor = count.min(DENSITY_CAP) as f64;
        let rotations = BASE_ROTATIONS + complexity_ratio * COMPLEXITY_ROTATIONS + density_factor / 8.0;
        let total_height = BASE_HEIGHT + density_factor * HEIGHT_PER_NODE;

        Self {
            count,
            complexity_ratio,
            density_factor,
            rotations,
            total_height,
            total_angle: 2.0 * PI * rotations,
        }
    }

    /// Normalised position along the helix, 0 at the first node, 1 at the last.
    pub fn t(&self, index: usize) -> f64 {
        index as f64 / self.count.saturating_sub(1).max(1) as f64
    }
}

/// Role by operation content, checked FUSION → THRESHOLD → DIFFUSION.
pub fn role_for(data: &Stage2Data) -> ShapeRole {
    if data.has_operation(OperationType::Fusion) {
        ShapeRole::StructuralAnchor
    } else if data.has_operation(OperationType::Threshold) {
        ShapeRole::CriticalJunction
    } else if data.has_operation(OperationType::Diffusion) {
        ShapeRole::DiffractionPoint
    } else {
        ShapeRole::DataVertex
    }
}

fn base_radius(role: ShapeRole, t: f64) -> f64 {
    match role {
        ShapeRole::StructuralAnchor => 320.0,
        ShapeRole::CriticalJunction => 260.0,
        ShapeRole::DiffractionPoint => 120.0,
        ShapeRole::DataVertex => 180.0 + (t * 8.0 * PI).sin() * 20.0,
    }
}

/// Whole degrees in 0..360.
fn theta_degrees(theta: f64) -> u16 {
    (theta.to_degrees().round() as u64 % 360) as u16
}

/// Place the `index`-th entry on the helix. Connections are left empty.
pub fn place(shape: &HelixShape, index: usize, data: &Stage2Data) -> SpatialNode {
    let t = shape.t(index);
    let theta = t * shape.total_angle;
    let role = role_for(data);
    let radius = base_radius(role, t) + (2.0 * theta).cos() * HELIX_VARIANCE;

    let pos = Vector3 {
        x: (theta.cos() * radius).round() as i64,
        y: (t * shape.total_height - shape.total_height / 2.0).round() as i64,
        z: (theta.sin() * radius).round() as i64,
    };
    SpatialNode::new(data.segment_id, role, theta_degrees(theta), pos)
}
