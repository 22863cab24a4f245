//! Edge-case tests: degenerate input, injected fixtures, caps and limits.

use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use theta_lattice::rules::{Condition, OperationTemplate, Rule};
use theta_lattice::{
    ConnectionType, OperationType, Pipeline, PipelineConfig, RuleSet, SegmentId, ShapeRole,
    Taxonomy, UniversalBase,
};

fn pipeline() -> Pipeline {
    Pipeline::new().unwrap()
}

// ============================================================================
// Degenerate documents
// ============================================================================

#[test]
fn test_empty_document() {
    let result = pipeline().process("");
    assert!(result.stage1.is_empty());
    assert!(result.stage2.is_empty());
    assert!(result.stage3.nodes.is_empty());
    assert_eq!(result.stage3.system_resonance, 0.0);
    assert!(result.stage4.quantum_nodes.is_empty());
}

#[test]
fn test_whitespace_only_document() {
    let result = pipeline().process("  \n\t  ");
    assert!(result.stage1.is_empty());
    assert!(result.stage3.nodes.is_empty());
}

#[test]
fn test_unterminated_text_is_one_segment() {
    let result = pipeline().process("no terminator at all here");
    assert_eq!(result.stage1.len(), 1);
    assert_eq!(result.stage1.segments[0].text, "no terminator at all here");
}

#[test]
fn test_terminator_runs_without_whitespace_do_not_split() {
    let result = pipeline().process("Wait...what?! Really.");
    let texts: Vec<&str> = result.stage1.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["Wait...what?!", "Really."]);
}

#[test]
fn test_unlabelled_segments_produce_no_operations() {
    let pipeline = pipeline().with_taxonomy(Taxonomy::empty());
    let result = pipeline.process("One. Two. Three.");
    assert_eq!(result.stage1.len(), 3);
    assert!(result.stage2.iter().all(|d| d.operations.is_empty()));
    assert!(result.stage3.nodes.iter().all(|n| n.shape_role == ShapeRole::DataVertex));
    // 75 × 0.7, nothing resonates
    assert_eq!(result.stage3.system_resonance, 52.5);
    // every category is "unknown": no pairs qualify
    assert!(result.stage4.quantum_nodes.is_empty());
}

// ============================================================================
// Numeric values
// ============================================================================

#[test]
fn test_malformed_number_keeps_leading_digits() {
    let tax = Taxonomy::new([("material", ["mass"])]).unwrap();
    let result = pipeline().with_taxonomy(tax).process("The mass is 5.x units.");
    assert_eq!(result.stage1.segments[0].labels[0].value, Some(5.0));
}

#[test]
fn test_non_ascii_digit_is_skipped_for_value() {
    let tax = Taxonomy::new([("material", ["mass"])]).unwrap();
    let result = pipeline().with_taxonomy(tax).process("The mass is \u{0663} or 5 kg.");
    assert_eq!(result.stage1.segments[0].labels[0].value, Some(5.0));
}

#[test]
fn test_property_without_number_has_no_value() {
    let tax = Taxonomy::new([("material", ["mass"])]).unwrap();
    let result = pipeline().with_taxonomy(tax).process("Mass matters.");
    let label = &result.stage1.segments[0].labels[0];
    assert_eq!(label.property, "mass");
    assert_eq!(label.value, None);
}

// ============================================================================
// Injected rule sets
// ============================================================================

#[test]
fn test_custom_rule_set() {
    let tax = Taxonomy::new([("audio", ["pitch", "tempo"])]).unwrap();
    let rules = RuleSet::new([Rule {
        condition: Condition::All(&["pitch", "tempo"]),
        emits: OperationTemplate {
            kind: OperationType::Fusion,
            inputs: &["Pitch", "Tempo"],
            output: "Groove",
            description: "Pitch × Tempo",
            rule: "Rhythm",
            universal_base: UniversalBase::Time,
            noise_reduction: 70,
        },
    }]);
    let pipeline = pipeline().with_taxonomy(tax).with_rules(rules);
    let result = pipeline.process("Pitch 440 and tempo 120. Only the pitch.");

    assert_eq!(result.stage2.entries[0].operations[0].output, "Groove");
    let fallback = &result.stage2.entries[1].operations;
    assert_eq!(fallback.len(), 1);
    assert_eq!(fallback[0].output, "Universal Projection");
    assert_eq!(fallback[0].universal_base, UniversalBase::Time);
}

// ============================================================================
// Layout limits
// ============================================================================

#[test]
fn test_anchor_edges_across_long_document() {
    let tax = Taxonomy::new([("material", vec!["mass", "volume"]), ("text", vec!["color"])]).unwrap();
    let sentences: Vec<&str> = (0..10)
        .map(|i| if i % 3 == 0 { "Mass 1 and volume 2." } else { "The color is blue." })
        .collect();
    let result = pipeline().with_taxonomy(tax).process(&sentences.join(" "));

    let anchors: Vec<usize> = result
        .stage3
        .nodes
        .iter()
        .enumerate()
        .filter(|(_, n)| n.shape_role == ShapeRole::StructuralAnchor)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(anchors, vec![0, 3, 6, 9]);

    let structural = |i: usize| -> Vec<SegmentId> {
        result.stage3.nodes[i]
            .connections_of(ConnectionType::Structural)
            .map(|c| c.target_id)
            .collect()
    };
    assert_eq!(structural(0), vec![SegmentId(3), SegmentId(6)]);
    assert_eq!(structural(6), vec![SegmentId(9)]);
    assert!(structural(9).is_empty());

    for node in &result.stage3.nodes {
        assert!((0.0..=100.0).contains(&node.theta_integrity));
        assert!(node.theta_angle < 360);
        for edge in &node.connections {
            assert!(result.stage3.get(edge.target_id).is_some());
            assert!(edge.target_id > node.id);
        }
    }
}

#[test]
fn test_large_document_caps_combinations() {
    let doc: Vec<String> = (0..60)
        .map(|i| match i % 3 {
            0 => format!("The pitch is {i}."),
            1 => format!("The color is {i}."),
            _ => format!("The genus is {i}."),
        })
        .collect();
    let config = PipelineConfig::default().with_fallback_skip_probability(0.0);
    let pipeline = pipeline().with_config(config).unwrap();
    let result = pipeline.process_with_rng(&doc.join(" "), &mut StdRng::seed_from_u64(5));

    assert_eq!(result.stage3.nodes.len(), 60);
    assert_eq!(result.stage4.quantum_nodes.len(), 24);
    assert!((0.0..=100.0).contains(&result.stage3.system_resonance));
}

#[test]
fn test_invalid_config_rejected() {
    let config = PipelineConfig::default().with_fallback_skip_probability(-0.1);
    assert!(pipeline().with_config(config).is_err());
}
