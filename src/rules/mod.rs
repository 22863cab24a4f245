//! # Rule Engine (Stage 2)
//!
//! Each segment is evaluated on its own against an ordered rule list. Every
//! matching rule emits one operation, in rule order. A labelled segment that
//! matches nothing gets a single fallback DIFFUSION operation.

pub mod table;

use tracing::{debug, trace};

use crate::model::{Label, LogicOperation, OperationType, Segment, Stage1Output, Stage2Data, Stage2Output, UniversalBase};

/// Presence test over lower-cased property names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// At least one of the names is present.
    Any(&'static [&'static str]),
    /// Every name is present.
    All(&'static [&'static str]),
}

impl Condition {
    pub fn matches(&self, present: &[String]) -> bool {
        let has = |name: &&str| present.iter().any(|p| p.as_str() == *name);
        match self {
            Condition::Any(names) => names.iter().any(has),
            Condition::All(names) => !names.is_empty() && names.iter().all(has),
        }
    }
}

/// Literal content of the operation a rule emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationTemplate {
    pub kind: OperationType,
    pub inputs: &'static [&'static str],
    pub output: &'static str,
    pub description: &'static str,
    pub rule: &'static str,
    pub universal_base: UniversalBase,
    pub noise_reduction: u8,
}

impl OperationTemplate {
    pub fn instantiate(&self) -> LogicOperation {
        LogicOperation {
            kind: self.kind,
            inputs: self.inputs.iter().map(|s| s.to_string()).collect(),
            output: self.output.to_owned(),
            description: self.description.to_owned(),
            rule: self.rule.to_owned(),
            universal_base: self.universal_base,
            noise_reduction: self.noise_reduction,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub condition: Condition,
    pub emits: OperationTemplate,
}

/// Ordered rules plus the fallback base table.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
    fallback_bases: Vec<(String, UniversalBase)>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleSet {
    /// The built-in eight rules and fallback table.
    pub fn standard() -> Self {
        Self::new(table::STANDARD_RULES.iter().copied())
    }

    /// Custom rules with the built-in fallback table.
    pub fn new(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
            fallback_bases: table::FALLBACK_BASES
                .iter()
                .map(|(c, b)| (c.to_string(), *b))
                .collect(),
        }
    }

    pub fn with_fallback_base(mut self, category: impl Into<String>, base: UniversalBase) -> Self {
        let category = category.into();
        match self.fallback_bases.iter_mut().find(|(c, _)| *c == category) {
            Some(entry) => entry.1 = base,
            None => self.fallback_bases.push((category, base)),
        }
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Base used by the fallback operation for `category`.
    pub fn fallback_base(&self, category: &str) -> UniversalBase {
        self.fallback_bases
            .iter()
            .find(|(c, _)| c == category)
            .map_or(UniversalBase::Entropy, |(_, b)| *b)
    }

    /// Operations for one segment's labels.
    pub fn evaluate(&self, labels: &[Label]) -> Vec<LogicOperation> {
        let present: Vec<String> = labels.iter().map(|l| l.property.to_lowercase()).collect();

        let mut operations: Vec<LogicOperation> = self
            .rules
            .iter()
            .filter(|rule| rule.condition.matches(&present))
            .map(|rule| rule.emits.instantiate())
            .collect();

        if operations.is_empty() {
            if let Some(first) = labels.first() {
                trace!(category = %first.category, "no rule matched, using fallback");
                operations.push(self.fallback(first));
            }
        }
        operations
    }

    fn fallback(&self, first: &Label) -> LogicOperation {
        LogicOperation {
            kind: OperationType::Diffusion,
            inputs: vec![first.property.clone()],
            output: table::FALLBACK_OUTPUT.to_owned(),
            description: table::FALLBACK_DESCRIPTION.to_owned(),
            rule: table::FALLBACK_RULE.to_owned(),
            universal_base: self.fallback_base(&first.category),
            noise_reduction: table::FALLBACK_NOISE_REDUCTION,
        }
    }

    fn derive_segment(&self, segment: &Segment) -> Stage2Data {
        Stage2Data {
            segment_id: segment.id,
            base_properties: segment.labels.clone(),
            operations: self.evaluate(&segment.labels),
        }
    }
}

/// Run the rule set over every segment of Stage 1.
pub fn derive(stage1: &Stage1Output, rules: &RuleSet) -> Stage2Output {
    let entries: Vec<Stage2Data> = stage1.iter().map(|s| rules.derive_segment(s)).collect();
    let out = Stage2Output { entries };
    debug!(
        segments = out.len(),
        operations = out.operation_count(),
        "stage 2: derived logic operations"
    );
    out
}
