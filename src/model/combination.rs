//! Cross-category combination records produced by the pairing stage.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::SegmentId;

/// Gate label attached to a combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateType {
    And,
    Or,
    Xor,
    Nand,
    Cnot,
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GateType::And => "AND",
            GateType::Or => "OR",
            GateType::Xor => "XOR",
            GateType::Nand => "NAND",
            GateType::Cnot => "CNOT",
        };
        f.write_str(s)
    }
}

/// A pairing of two segments from different categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationNode {
    /// `quantum_<i>_<j>`, positions of the two sources in document order.
    pub id: String,
    #[serde(rename = "sourceA_id")]
    pub source_a_id: SegmentId,
    #[serde(rename = "sourceB_id")]
    pub source_b_id: SegmentId,
    #[serde(rename = "gateType")]
    pub gate_type: GateType,
    pub hypothetical_output: String,
    /// 0–1.
    pub probability: f64,
    /// `"<CATEGORY_A> + <CATEGORY_B>"`.
    pub category_mix: String,
    pub stability_description: String,
}

impl CombinationNode {
    pub fn sources(&self) -> (SegmentId, SegmentId) {
        (self.source_a_id, self.source_b_id)
    }
}
