//! End-to-end tests for JSON and report export.

use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use theta_lattice::export::{export_json, export_report};
use theta_lattice::{Pipeline, PipelineConfig, ProcessingResult};

const DOC: &str = "The genus Homo is studied. The class name is Human. The force is 10 N. \
                   A mass of 2 and a volume of 4.";

fn run() -> ProcessingResult {
    let pipeline = Pipeline::new()
        .unwrap()
        .with_config(PipelineConfig::default().with_fallback_skip_probability(1.0))
        .unwrap();
    pipeline.process_with_rng(DOC, &mut StdRng::seed_from_u64(11))
}

fn json_text(result: &ProcessingResult) -> String {
    let mut buf = Vec::new();
    export_json(result, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

// ============================================================================
// JSON
// ============================================================================

#[test]
fn test_json_uses_wire_field_names() {
    let value: serde_json::Value = serde_json::from_str(&json_text(&run())).unwrap();

    let label = &value["stage1"]["shard_3"]["labels"][0];
    assert!(label["category"].is_string());

    let data = &value["stage2"]["shard_0"];
    assert_eq!(data["segmentId"], "shard_0");
    assert_eq!(data["baseProperties"][0]["property"], "genus");
    assert_eq!(data["operations"][0]["type"], "DIFFUSION");
    assert_eq!(data["operations"][0]["universalBase"], "MASS_ENERGY");
    assert!(data["operations"][0]["noiseReduction"].is_u64());

    let node = &value["stage3"]["nodes"]["shard_3"];
    assert_eq!(node["shape_role"], "Structural Anchor");
    assert!(node["theta_angle"].is_u64());
    assert!(node["spatial_pos"]["x"].is_i64());
    assert_eq!(node["universal_alignment"][0], "Conservation");
    assert!(value["stage3"]["system_resonance"].is_f64());

    let spine = &value["stage3"]["nodes"]["shard_0"]["connections"][0];
    assert_eq!(spine["targetId"], "shard_1");
    assert_eq!(spine["type"], "SPINE");

    let combo = &value["stage4"]["quantum_nodes"][0];
    assert_eq!(combo["id"], "quantum_0_1");
    assert_eq!(combo["sourceA_id"], "shard_0");
    assert_eq!(combo["sourceB_id"], "shard_1");
    assert_eq!(combo["gateType"], "XOR");
    assert!(value["stage4"]["entropy_level"].is_f64());
}

#[test]
fn test_json_keys_follow_document_order() {
    let mut doc: Vec<String> = (0..12).map(|i| format!("The radius is {i}.")).collect();
    doc.push("The end.".into());
    let result = Pipeline::new().unwrap().process(&doc.join(" "));
    let text = json_text(&result);

    // shard_10 would sort before shard_2 lexically
    let p2 = text.find("\"shard_2\": {").unwrap();
    let p10 = text.find("\"shard_10\": {").unwrap();
    assert!(p2 < p10);
}

#[test]
fn test_json_reads_back() {
    let result = run();
    let back: ProcessingResult = serde_json::from_str(&json_text(&result)).unwrap();
    assert_eq!(back.stage1, result.stage1);
    assert_eq!(back.stage2, result.stage2);
    assert_eq!(back.stage4.quantum_nodes, result.stage4.quantum_nodes);
    assert_eq!(back.stage3.ids().collect::<Vec<_>>(), result.stage3.ids().collect::<Vec<_>>());
}

#[test]
fn test_json_rejects_mismatched_key() {
    let text = r#"{"shard_0": {"id": "shard_1", "text": "x", "labels": []}}"#;
    assert!(serde_json::from_str::<theta_lattice::Stage1Output>(text).is_err());
}

// ============================================================================
// Report
// ============================================================================

#[test]
fn test_report_sections() {
    let result = run();
    let mut buf = Vec::new();
    export_report(&result, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();

    assert!(text.starts_with("// theta-lattice report\n"));
    assert!(text.contains("// Segments: 4"));
    for section in ["== Stage 1", "== Stage 2", "== Stage 3", "== Stage 4"] {
        assert!(text.contains(section), "missing {section}");
    }
    assert!(text.contains("shard_0 \"The genus Homo is studied.\""));
    assert!(text.contains("FUSION [Mass, Volume] -> Density"));
    assert!(text.contains("Structural Anchor"));
    assert!(text.contains("spine:shard_1"));
    assert!(text.contains("quantum_0_1 shard_0 x shard_1 XOR Bio-Digital Entropy p=0.95"));
}
