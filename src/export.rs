//! Export a [`ProcessingResult`] for a presentation layer or a log.
//!
//! ```text
//! ProcessingResult → export_json()   → keyed JSON (wire field names)
//!                  → export_report() → plain-text per-stage summary
//! ```

use std::io::Write;

use crate::model::*;
use crate::Result;

/// Write the result as pretty-printed JSON.
///
/// Keyed stages serialize as objects in document order.
pub fn export_json(result: &ProcessingResult, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)?;
    Ok(())
}

/// Write a plain-text summary, one section per stage.
pub fn export_report(result: &ProcessingResult, writer: &mut dyn Write) -> Result<()> {
    // Header
    writeln!(writer, "// theta-lattice report")?;
    writeln!(writer, "// Segments: {}", result.stage1.len())?;
    writeln!(writer, "// Operations: {}", result.stage2.operation_count())?;
    writeln!(writer, "// Resonance: {:.1}", result.stage3.system_resonance)?;
    writeln!(writer, "// Combinations: {}", result.stage4.quantum_nodes.len())?;
    writeln!(writer)?;

    writeln!(writer, "== Stage 1: segments")?;
    for segment in result.stage1.iter() {
        writeln!(writer, "{} \"{}\"", segment.id, segment.text.trim())?;
        for label in &segment.labels {
            writeln!(writer, "    {}", format_label(label))?;
        }
    }
    writeln!(writer)?;

    writeln!(writer, "== Stage 2: operations")?;
    for data in result.stage2.iter() {
        for op in &data.operations {
            writeln!(
                writer,
                "{} {} [{}] -> {} ({}, {}, {}%)",
                data.segment_id,
                op.kind,
                op.inputs.join(", "),
                op.output,
                op.rule,
                op.universal_base,
                op.noise_reduction,
            )?;
        }
    }
    writeln!(writer)?;

    writeln!(writer, "== Stage 3: nodes")?;
    for node in &result.stage3.nodes {
        let p = node.spatial_pos;
        writeln!(
            writer,
            "{} {} θ={}° integrity={:.2}{} pos=({}, {}, {}) -> {}",
            node.id,
            node.shape_role,
            node.theta_angle,
            node.theta_integrity,
            if node.is_resonating { " resonating" } else { "" },
            p.x,
            p.y,
            p.z,
            format_connections(node),
        )?;
    }
    writeln!(writer)?;

    writeln!(writer, "== Stage 4: combinations (entropy {:.2})", result.stage4.entropy_level)?;
    for node in &result.stage4.quantum_nodes {
        writeln!(
            writer,
            "{} {} x {} {} {} p={:.2} [{}]",
            node.id,
            node.source_a_id,
            node.source_b_id,
            node.gate_type,
            node.hypothetical_output,
            node.probability,
            node.category_mix,
        )?;
    }
    Ok(())
}

fn format_label(label: &Label) -> String {
    match label.value {
        Some(v) => format!("{}/{} = {}", label.category, label.property, v),
        None => format!("{}/{}", label.category, label.property),
    }
}

fn format_connections(node: &SpatialNode) -> String {
    if node.connections.is_empty() {
        return "none".to_string();
    }
    let parts: Vec<String> = node
        .connections
        .iter()
        .map(|c| {
            let kind = match c.kind {
                ConnectionType::Spine => "spine",
                ConnectionType::Structural => "structural",
            };
            format!("{}:{}", kind, c.target_id)
        })
        .collect();
    parts.join(", ")
}
