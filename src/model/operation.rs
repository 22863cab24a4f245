//! Logic operations derived from a segment's labels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of symbolic transformation a rule records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationType {
    Fusion,
    Diffusion,
    Threshold,
    Conservation,
    Emergence,
}

impl OperationType {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationType::Fusion => "FUSION",
            OperationType::Diffusion => "DIFFUSION",
            OperationType::Threshold => "THRESHOLD",
            OperationType::Conservation => "CONSERVATION",
            OperationType::Emergence => "EMERGENCE",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification tag attached to every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UniversalBase {
    Space,
    Time,
    MassEnergy,
    ChargeField,
    Entropy,
}

impl UniversalBase {
    pub fn as_str(self) -> &'static str {
        match self {
            UniversalBase::Space => "SPACE",
            UniversalBase::Time => "TIME",
            UniversalBase::MassEnergy => "MASS_ENERGY",
            UniversalBase::ChargeField => "CHARGE_FIELD",
            UniversalBase::Entropy => "ENTROPY",
        }
    }
}

impl fmt::Display for UniversalBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule-derived operation recorded against one segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicOperation {
    #[serde(rename = "type")]
    pub kind: OperationType,
    pub inputs: Vec<String>,
    pub output: String,
    pub description: String,
    pub rule: String,
    pub universal_base: UniversalBase,
    /// 0–100.
    pub noise_reduction: u8,
}

impl LogicOperation {
    pub fn is(&self, kind: OperationType) -> bool {
        self.kind == kind
    }
}
