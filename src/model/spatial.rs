//! Spatial nodes and their directed connections in the helix layout.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::SegmentId;

/// Upper bound on outgoing edges: one spine edge plus two structural edges.
pub const MAX_CONNECTIONS: usize = 3;

/// Labels every node carries in `universal_alignment`.
pub const UNIVERSAL_ALIGNMENT: [&str; 2] = ["Conservation", "Duality"];

/// Integer 3D coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

/// Edge kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionType {
    /// Link to the immediate successor in document order.
    Spine,
    /// Link between Structural Anchors.
    Structural,
}

/// A directed edge, owned by its source node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConnection {
    pub target_id: SegmentId,
    /// 0–1.
    pub strength: f64,
    #[serde(rename = "type")]
    pub kind: ConnectionType,
}

impl NodeConnection {
    pub fn spine(target_id: SegmentId) -> Self {
        Self { target_id, strength: 1.0, kind: ConnectionType::Spine }
    }

    pub fn structural(target_id: SegmentId) -> Self {
        Self { target_id, strength: 0.9, kind: ConnectionType::Structural }
    }
}

/// Role a node plays in the helix, chosen from its operation types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeRole {
    #[serde(rename = "Structural Anchor")]
    StructuralAnchor,
    #[serde(rename = "Critical Junction")]
    CriticalJunction,
    #[serde(rename = "Diffraction Point")]
    DiffractionPoint,
    #[serde(rename = "Data Vertex")]
    DataVertex,
}

impl ShapeRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeRole::StructuralAnchor => "Structural Anchor",
            ShapeRole::CriticalJunction => "Critical Junction",
            ShapeRole::DiffractionPoint => "Diffraction Point",
            ShapeRole::DataVertex => "Data Vertex",
        }
    }

    /// Starting `theta_integrity` for a node of this role.
    pub fn base_integrity(self) -> f64 {
        match self {
            ShapeRole::StructuralAnchor => 95.0,
            ShapeRole::CriticalJunction => 88.0,
            ShapeRole::DiffractionPoint => 80.0,
            ShapeRole::DataVertex => 75.0,
        }
    }
}

impl fmt::Display for ShapeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A segment's position, role and integrity in the helix layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialNode {
    pub id: SegmentId,
    /// Whole degrees, 0–359.
    pub theta_angle: u16,
    /// Clamped to [0, 100] on every mutation.
    pub theta_integrity: f64,
    pub spatial_pos: Vector3,
    pub shape_role: ShapeRole,
    pub universal_alignment: Vec<String>,
    pub connections: SmallVec<[NodeConnection; MAX_CONNECTIONS]>,
    pub is_resonating: bool,
}

impl SpatialNode {
    pub fn new(id: SegmentId, role: ShapeRole, theta_angle: u16, spatial_pos: Vector3) -> Self {
        Self {
            id,
            theta_angle,
            theta_integrity: role.base_integrity(),
            spatial_pos,
            shape_role: role,
            universal_alignment: UNIVERSAL_ALIGNMENT.iter().map(|s| s.to_string()).collect(),
            connections: SmallVec::new(),
            is_resonating: false,
        }
    }

    pub fn is_anchor(&self) -> bool {
        self.shape_role == ShapeRole::StructuralAnchor
    }

    /// Add `amount` to the integrity, clamped to [0, 100]. Returns the new value.
    pub fn boost(&mut self, amount: f64) -> f64 {
        self.theta_integrity = (self.theta_integrity + amount).clamp(0.0, 100.0);
        self.theta_integrity
    }

    pub fn connections_of(&self, kind: ConnectionType) -> impl Iterator<Item = &NodeConnection> {
        self.connections.iter().filter(move |c| c.kind == kind)
    }
}
