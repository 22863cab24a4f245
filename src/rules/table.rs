//! The built-in rule table and the category → base fallback table.

use crate::model::{OperationType, UniversalBase};
use super::{Condition, OperationTemplate, Rule};

/// Rules in evaluation order.
pub const STANDARD_RULES: &[Rule] = &[
    // Information / entropy
    Rule {
        condition: Condition::Any(&["creation date", "modification date"]),
        emits: OperationTemplate {
            kind: OperationType::Threshold,
            inputs: &["Creation", "Mod Date"],
            output: "Causality Verified",
            description: "Creation < Modification",
            rule: "Temporal Logic",
            universal_base: UniversalBase::Time,
            noise_reduction: 95,
        },
    },
    Rule {
        condition: Condition::Any(&["size on disk", "compression"]),
        emits: OperationTemplate {
            kind: OperationType::Conservation,
            inputs: &["Size", "Compression"],
            output: "Shannon Entropy",
            description: "Size * Ratio = Information",
            rule: "Conservation of Info",
            universal_base: UniversalBase::Entropy,
            noise_reduction: 88,
        },
    },
    // Space
    Rule {
        condition: Condition::Any(&["radius"]),
        emits: OperationTemplate {
            kind: OperationType::Diffusion,
            inputs: &["Radius"],
            output: "Diameter / Circumference",
            description: "r → 2r → 2πr",
            rule: "Geometric Chain",
            universal_base: UniversalBase::Space,
            noise_reduction: 100,
        },
    },
    Rule {
        condition: Condition::All(&["length", "width"]),
        emits: OperationTemplate {
            kind: OperationType::Fusion,
            inputs: &["Length", "Width"],
            output: "Area (2D Space)",
            description: "Euclidean Product",
            rule: "Dimensional Emergence",
            universal_base: UniversalBase::Space,
            noise_reduction: 92,
        },
    },
    // Mass-energy
    Rule {
        condition: Condition::All(&["mass", "volume"]),
        emits: OperationTemplate {
            kind: OperationType::Fusion,
            inputs: &["Mass", "Volume"],
            output: "Density",
            description: "Mass / Volume",
            rule: "Material Definition",
            universal_base: UniversalBase::MassEnergy,
            noise_reduction: 90,
        },
    },
    Rule {
        condition: Condition::Any(&["temperature", "melting point"]),
        emits: OperationTemplate {
            kind: OperationType::Threshold,
            inputs: &["Temp", "Melting Pt"],
            output: "Phase State",
            description: "T > Melting → Liquid",
            rule: "Phase Transition",
            universal_base: UniversalBase::MassEnergy,
            noise_reduction: 85,
        },
    },
    // Time / waves
    Rule {
        condition: Condition::Any(&["frame rate", "duration"]),
        emits: OperationTemplate {
            kind: OperationType::Conservation,
            inputs: &["FPS", "Duration"],
            output: "Total Frame Count",
            description: "Rate * Time = Quantity",
            rule: "Temporal Integration",
            universal_base: UniversalBase::Time,
            noise_reduction: 98,
        },
    },
    Rule {
        condition: Condition::Any(&["frequency", "wavelength"]),
        emits: OperationTemplate {
            kind: OperationType::Emergence,
            inputs: &["Frequency"],
            output: "Wave Energy",
            description: "E = hf",
            rule: "Wave-Particle Duality",
            universal_base: UniversalBase::ChargeField,
            noise_reduction: 80,
        },
    },
];

/// Category → base for the fallback operation. Unlisted categories map to ENTROPY.
pub const FALLBACK_BASES: &[(&str, UniversalBase)] = &[
    ("physics", UniversalBase::MassEnergy),
    ("material", UniversalBase::MassEnergy),
    ("biological", UniversalBase::MassEnergy),
    ("geometry", UniversalBase::Space),
    ("numerical", UniversalBase::Space),
    ("video", UniversalBase::Time),
    ("audio", UniversalBase::Time),
];

pub const FALLBACK_OUTPUT: &str = "Universal Projection";
pub const FALLBACK_DESCRIPTION: &str = "Mapping to Core Observable";
pub const FALLBACK_RULE: &str = "Universal Connection";
pub const FALLBACK_NOISE_REDUCTION: u8 = 60;
