//! # Spatial Layout Engine (Stage 3)
//!
//! ```text
//! Stage2Output → HelixShape → place() per entry → connect() → propagate()
//!                 (global)     (role, position)    (spine,     (one ordered
//!                                                  structural)  sweep)
//! ```
//!
//! Positions and roles are fixed at placement. Integrity and resonance flags
//! are mutated only by the single sweep in [`resonance::propagate`].

pub mod helix;
pub mod resonance;

use tracing::debug;

use crate::model::{SpatialNode, Stage2Output, Stage3Output};

pub use helix::{HelixShape, role_for};

/// Lay out every Stage 2 entry, in order, and run the resonance sweep.
pub fn distribute(stage2: &Stage2Output) -> Stage3Output {
    let shape = HelixShape::from_stage2(stage2);

    let mut nodes: Vec<SpatialNode> = stage2
        .iter()
        .enumerate()
        .map(|(index, data)| helix::place(&shape, index, data))
        .collect();

    resonance::connect(&mut nodes);
    let total_energy = resonance::propagate(&mut nodes);
    let system_resonance = resonance::system_resonance(&nodes, total_energy);

    debug!(
        nodes = nodes.len(),
        rotations = shape.rotations,
        total_energy,
        system_resonance,
        "stage 3: distributed nodes"
    );
    Stage3Output { nodes, system_resonance }
}
