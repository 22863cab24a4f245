//! # Pairing Engine (Stage 4)
//!
//! Every unordered pair of segments from different categories is looked up
//! in a static table keyed on the sorted category pair. Unlisted pairs take
//! a random fallback. Emission stops at the configured cap.

use hashbrown::HashMap;
use rand::Rng;
use tracing::{debug, trace};

use crate::config::PipelineConfig;
use crate::model::{
    CombinationNode, GateType, SegmentId, Stage2Data, Stage2Output, Stage3Output, Stage4Output,
    primary_property,
};

/// A special-cased category pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombinationRule {
    /// Sorted ascending.
    pub categories: (&'static str, &'static str),
    pub gate: GateType,
    pub output: &'static str,
    pub probability: f64,
    pub description: &'static str,
}

pub const STANDARD_COMBINATIONS: &[CombinationRule] = &[
    CombinationRule {
        categories: ("biological", "software"),
        gate: GateType::Xor,
        output: "Bio-Digital Entropy",
        probability: 0.95,
        description: "Reducing genetic mutation and code compilation to pure Information Entropy.",
    },
    CombinationRule {
        categories: ("physics", "software"),
        gate: GateType::And,
        output: "Simulation Energy",
        probability: 0.88,
        description: "Calculating the Energy cost of enforcing conservation laws in a digital system.",
    },
    CombinationRule {
        categories: ("audio", "geometry"),
        gate: GateType::Cnot,
        output: "Acoustic Force",
        probability: 0.75,
        description: "Sound waves exerting Force on geometric structures (Cymatics) in Space.",
    },
    CombinationRule {
        categories: ("computer_file", "material"),
        gate: GateType::Nand,
        output: "Matter Information",
        probability: 0.65,
        description: "Encoding Information bits into the Mass states of physical matter.",
    },
    CombinationRule {
        categories: ("environmental", "text"),
        gate: GateType::Or,
        output: "System Entropy",
        probability: 0.45,
        description: "Reading environmental chaos as high Entropy data streams.",
    },
    CombinationRule {
        categories: ("physics", "video"),
        gate: GateType::And,
        output: "Light Energy",
        probability: 0.81,
        description: "Frame rate synchronized with photon Energy distribution over Time.",
    },
];

/// Ordered lookup table of special-cased pairs.
#[derive(Debug, Clone)]
pub struct CombinationTable {
    rules: Vec<CombinationRule>,
}

impl Default for CombinationTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl CombinationTable {
    pub fn standard() -> Self {
        Self::new(STANDARD_COMBINATIONS.iter().copied())
    }

    /// Pair names are normalised to sorted order on insert.
    pub fn new(rules: impl IntoIterator<Item = CombinationRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|mut r| {
                let (a, b) = r.categories;
                if b < a {
                    r.categories = (b, a);
                }
                r
            })
            .collect();
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Entry for the unordered pair `{a, b}`.
    pub fn lookup(&self, a: &str, b: &str) -> Option<&CombinationRule> {
        let key = if a <= b { (a, b) } else { (b, a) };
        self.rules.iter().find(|r| r.categories == key)
    }
}

/// Gate, output, probability and description before ids are attached.
#[derive(Debug, Clone, PartialEq)]
struct Reduction {
    gate: GateType,
    output: String,
    probability: f64,
    description: String,
}

fn reduce<R: Rng>(
    a: &Stage2Data,
    b: &Stage2Data,
    table: &CombinationTable,
    skip_probability: f64,
    rng: &mut R,
) -> Option<Reduction> {
    if let Some(rule) = table.lookup(a.category(), b.category()) {
        return Some(Reduction {
            gate: rule.gate,
            output: rule.output.to_owned(),
            probability: rule.probability,
            description: rule.description.to_owned(),
        });
    }

    if rng.random::<f64>() < skip_probability {
        return None;
    }
    let prop_a = primary_property(&a.base_properties);
    let prop_b = primary_property(&b.base_properties);
    Some(Reduction {
        gate: GateType::Xor,
        output: format!("Vector-{prop_a}"),
        probability: rng.random::<f64>(),
        description: format!("Reducing {prop_a} and {prop_b} to fundamental Force vectors in Space-Time."),
    })
}

/// Pair every cross-category couple of Stage 3 nodes (i < j, document order).
pub fn combine<R: Rng>(
    stage2: &Stage2Output,
    stage3: &Stage3Output,
    table: &CombinationTable,
    config: &PipelineConfig,
    rng: &mut R,
) -> Stage4Output {
    let ids: Vec<SegmentId> = stage3.ids().collect();
    let by_id: HashMap<SegmentId, &Stage2Data> = stage2.iter().map(|d| (d.segment_id, d)).collect();
    let mut quantum_nodes = Vec::new();

    'pairs: for i in 0..ids.len() {
        for j in (i + 1)..ids.len() {
            if quantum_nodes.len() >= config.max_combinations {
                break 'pairs;
            }
            let (Some(&a), Some(&b)) = (by_id.get(&ids[i]), by_id.get(&ids[j])) else {
                continue;
            };
            let (cat_a, cat_b) = (a.category(), b.category());
            if cat_a == cat_b {
                continue;
            }
            let Some(reduction) = reduce(a, b, table, config.fallback_skip_probability, rng) else {
                trace!(a = %ids[i], b = %ids[j], "fallback skipped pair");
                continue;
            };
            quantum_nodes.push(CombinationNode {
                id: format!("quantum_{i}_{j}"),
                source_a_id: ids[i],
                source_b_id: ids[j],
                gate_type: reduction.gate,
                hypothetical_output: reduction.output,
                probability: reduction.probability,
                category_mix: format!("{} + {}", cat_a.to_uppercase(), cat_b.to_uppercase()),
                stability_description: reduction.description,
            });
        }
    }

    let entropy_level = rng.random::<f64>() * 100.0;
    debug!(combinations = quantum_nodes.len(), entropy_level, "stage 4: combined segments");
    Stage4Output { quantum_nodes, entropy_level }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Label;
    use crate::layout;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn stage2(categories: &[Option<(&str, &str)>]) -> Stage2Output {
        Stage2Output {
            entries: categories
                .iter()
                .enumerate()
                .map(|(i, c)| Stage2Data {
                    segment_id: SegmentId(i),
                    base_properties: c.map(|(cat, prop)| vec![Label::new(cat, prop)]).unwrap_or_default(),
                    operations: Vec::new(),
                })
                .collect(),
        }
    }

    fn run(s2: &Stage2Output, config: &PipelineConfig, seed: u64) -> Stage4Output {
        let s3 = layout::distribute(s2);
        combine(s2, &s3, &CombinationTable::standard(), config, &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_lookup_is_order_independent() {
        let table = CombinationTable::standard();
        assert_eq!(table.len(), 6);
        assert_eq!(table.lookup("software", "biological").unwrap().output, "Bio-Digital Entropy");
        assert_eq!(table.lookup("video", "physics").unwrap().gate, GateType::And);
        assert!(table.lookup("text", "text").is_none());
    }

    #[test]
    fn test_new_sorts_pairs() {
        let table = CombinationTable::new([CombinationRule {
            categories: ("zeta", "alpha"),
            gate: GateType::Or,
            output: "Z",
            probability: 0.1,
            description: "",
        }]);
        assert_eq!(table.lookup("alpha", "zeta").unwrap().categories, ("alpha", "zeta"));
    }

    #[test]
    fn test_table_hit_is_deterministic() {
        let s2 = stage2(&[Some(("biological", "genus")), Some(("software", "class name"))]);
        let out = run(&s2, &PipelineConfig::default(), 1);
        assert_eq!(out.quantum_nodes.len(), 1);
        let node = &out.quantum_nodes[0];
        assert_eq!(node.id, "quantum_0_1");
        assert_eq!(node.gate_type, GateType::Xor);
        assert_eq!(node.probability, 0.95);
        assert_eq!(node.category_mix, "BIOLOGICAL + SOFTWARE");
        assert!((0.0..100.0).contains(&out.entropy_level));
    }

    #[test]
    fn test_category_mix_keeps_source_order() {
        let s2 = stage2(&[Some(("software", "scope")), Some(("physics", "force"))]);
        let out = run(&s2, &PipelineConfig::default(), 1);
        assert_eq!(out.quantum_nodes[0].category_mix, "SOFTWARE + PHYSICS");
        assert_eq!(out.quantum_nodes[0].hypothetical_output, "Simulation Energy");
    }

    #[test]
    fn test_same_category_pairs_skipped() {
        let s2 = stage2(&[Some(("text", "color")), Some(("text", "case")), None, None]);
        let config = PipelineConfig::default().with_fallback_skip_probability(0.0);
        let out = run(&s2, &config, 3);
        let pairs: Vec<_> = out.quantum_nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(pairs, vec!["quantum_0_2", "quantum_0_3", "quantum_1_2", "quantum_1_3"]);
    }

    #[test]
    fn test_fallback_content() {
        let s2 = stage2(&[Some(("text", "color")), None]);
        let config = PipelineConfig::default().with_fallback_skip_probability(0.0);
        let out = run(&s2, &config, 9);
        let node = &out.quantum_nodes[0];
        assert_eq!(node.gate_type, GateType::Xor);
        assert_eq!(node.hypothetical_output, "Vector-color");
        assert_eq!(
            node.stability_description,
            "Reducing color and unknown to fundamental Force vectors in Space-Time."
        );
        assert_eq!(node.category_mix, "TEXT + UNKNOWN");
        assert!((0.0..1.0).contains(&node.probability));
    }

    #[test]
    fn test_fallback_always_skipped() {
        let s2 = stage2(&[Some(("text", "color")), Some(("audio", "pitch")), None]);
        let config = PipelineConfig::default().with_fallback_skip_probability(1.0);
        assert!(run(&s2, &config, 5).quantum_nodes.is_empty());
    }

    #[test]
    fn test_cap_truncates_in_enumeration_order() {
        let cats: Vec<_> = (0..12)
            .map(|i| if i % 2 == 0 { Some(("physics", "force")) } else { Some(("software", "scope")) })
            .collect();
        let s2 = stage2(&cats);
        let out = run(&s2, &PipelineConfig::default(), 11);
        // 36 qualifying pairs, every one a table hit
        assert_eq!(out.quantum_nodes.len(), 24);
        assert_eq!(out.quantum_nodes[0].id, "quantum_0_1");
        assert_eq!(out.quantum_nodes[5].id, "quantum_0_11");
        assert_eq!(out.quantum_nodes[6].id, "quantum_1_2");

        let capped = run(&s2, &PipelineConfig::default().with_max_combinations(0), 11);
        assert!(capped.quantum_nodes.is_empty());
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let s2 = stage2(&[Some(("text", "color")), Some(("audio", "pitch")), Some(("image", "gamma")), None]);
        let config = PipelineConfig::default();
        assert_eq!(run(&s2, &config, 42), run(&s2, &config, 42));
    }
}
