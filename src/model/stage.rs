//! Per-stage outputs and the combined [`ProcessingResult`].
//!
//! Keyed outputs are held as `Vec`s in document order and serialize as JSON
//! objects keyed by segment id.

use serde::{Deserialize, Serialize};

use super::keyed::{self, Keyed};
use super::{CombinationNode, Label, LogicOperation, OperationType, Segment, SegmentId, SpatialNode};

impl Keyed for Segment {
    fn key(&self) -> SegmentId { self.id }
}

impl Keyed for SpatialNode {
    fn key(&self) -> SegmentId { self.id }
}

impl Keyed for Stage2Data {
    fn key(&self) -> SegmentId { self.segment_id }
}

fn find<T: Keyed>(items: &[T], id: SegmentId) -> Option<&T> {
    items.iter().find(|item| item.key() == id)
}

// ============================================================================
// Stage 1
// ============================================================================

/// Ordered map segment id → [`Segment`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stage1Output {
    #[serde(with = "keyed")]
    pub segments: Vec<Segment>,
}

impl Stage1Output {
    pub fn len(&self) -> usize { self.segments.len() }
    pub fn is_empty(&self) -> bool { self.segments.is_empty() }
    pub fn get(&self, id: SegmentId) -> Option<&Segment> { find(&self.segments, id) }
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> { self.segments.iter() }
    pub fn ids(&self) -> impl Iterator<Item = SegmentId> + '_ { self.segments.iter().map(|s| s.id) }
}

// ============================================================================
// Stage 2
// ============================================================================

/// Operations derived for one segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage2Data {
    pub segment_id: SegmentId,
    /// The segment's labels, unchanged.
    pub base_properties: Vec<Label>,
    pub operations: Vec<LogicOperation>,
}

impl Stage2Data {
    pub fn has_operation(&self, kind: OperationType) -> bool {
        self.operations.iter().any(|op| op.is(kind))
    }

    /// First label's category, or `"unknown"`.
    pub fn category(&self) -> &str {
        super::primary_category(&self.base_properties)
    }
}

/// Ordered map segment id → [`Stage2Data`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stage2Output {
    #[serde(with = "keyed")]
    pub entries: Vec<Stage2Data>,
}

impl Stage2Output {
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn get(&self, id: SegmentId) -> Option<&Stage2Data> { find(&self.entries, id) }
    pub fn iter(&self) -> std::slice::Iter<'_, Stage2Data> { self.entries.iter() }

    pub fn operation_count(&self) -> usize {
        self.entries.iter().map(|e| e.operations.len()).sum()
    }
}

// ============================================================================
// Stage 3
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Stage3Output {
    #[serde(with = "keyed")]
    pub nodes: Vec<SpatialNode>,
    /// 0–100, one decimal.
    pub system_resonance: f64,
}

impl Stage3Output {
    pub fn get(&self, id: SegmentId) -> Option<&SpatialNode> { find(&self.nodes, id) }
    pub fn ids(&self) -> impl Iterator<Item = SegmentId> + '_ { self.nodes.iter().map(|n| n.id) }
}

// ============================================================================
// Stage 4
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Stage4Output {
    pub quantum_nodes: Vec<CombinationNode>,
    /// Informational only, [0, 100).
    pub entropy_level: f64,
}

// ============================================================================
// Combined
// ============================================================================

/// Everything one `process` call produces.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub stage1: Stage1Output,
    pub stage2: Stage2Output,
    pub stage3: Stage3Output,
    pub stage4: Stage4Output,
}
