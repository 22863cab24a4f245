//! # theta-lattice — Four-Stage Text Lattice Pipeline
//!
//! Turns free-form prose into tagged segments, rule-derived logic
//! operations, a helix-shaped resonance graph and a set of cross-domain
//! combinations.
//!
//! ## Design Principles
//!
//! 1. **Stages are pure functions**: each stage reads the previous output and
//!    owns what it returns. No shared state between calls.
//! 2. **Tables are data**: taxonomy, rule table and combination table are
//!    injected values, not globals.
//! 3. **Randomness is injected**: only Stage 4 draws random numbers, from the
//!    caller's RNG or one seeded from [`PipelineConfig::seed`].
//! 4. **Clean DTOs**: [`model`] types cross every boundary and serialize with
//!    the field names a presentation layer expects.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use theta_lattice::Pipeline;
//!
//! # fn example() -> theta_lattice::Result<()> {
//! let pipeline = Pipeline::new()?;
//! let result = pipeline.process("The particle has a mass of 5.0 kg and a volume of 0.5 m3.");
//!
//! for data in result.stage2.iter() {
//!     for op in &data.operations {
//!         println!("{} {} -> {}", data.segment_id, op.kind, op.output);
//!     }
//! }
//! println!("resonance {}", result.stage3.system_resonance);
//! # Ok(())
//! # }
//! ```
//!
//! ## Stages
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | 1 | [`segmenter`] | segments with taxonomy labels |
//! | 2 | [`rules`] | logic operations per segment |
//! | 3 | [`layout`] | helix nodes, connections, resonance |
//! | 4 | [`pairing`] | cross-category combinations |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod taxonomy;
pub mod segmenter;
pub mod rules;
pub mod layout;
pub mod pairing;
pub mod config;
pub mod source;
pub mod export;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{
    Segment, SegmentId, Label, LogicOperation, OperationType, UniversalBase,
    SpatialNode, NodeConnection, ConnectionType, ShapeRole, Vector3,
    CombinationNode, GateType,
    Stage1Output, Stage2Data, Stage2Output, Stage3Output, Stage4Output,
    ProcessingResult,
};
pub use taxonomy::Taxonomy;
pub use rules::RuleSet;
pub use pairing::CombinationTable;
pub use config::PipelineConfig;
pub use source::{DescriptionSource, ManualEntry};

// ============================================================================
// Pipeline handle
// ============================================================================

/// The primary entry point. A `Pipeline` holds the immutable tables every
/// stage consults and runs documents through all four stages.
#[derive(Debug, Clone)]
pub struct Pipeline {
    taxonomy: Taxonomy,
    rules: RuleSet,
    combinations: CombinationTable,
    config: PipelineConfig,
}

impl Pipeline {
    /// Pipeline with the built-in tables and default config.
    pub fn new() -> Result<Self> {
        Ok(Self {
            taxonomy: Taxonomy::standard()?,
            rules: RuleSet::standard(),
            combinations: CombinationTable::standard(),
            config: PipelineConfig::default(),
        })
    }

    /// Replace the configuration. Fails if it does not validate.
    pub fn with_config(mut self, config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn with_taxonomy(mut self, taxonomy: Taxonomy) -> Self {
        self.taxonomy = taxonomy;
        self
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_combinations(mut self, combinations: CombinationTable) -> Self {
        self.combinations = combinations;
        self
    }

    pub fn taxonomy(&self) -> &Taxonomy { &self.taxonomy }
    pub fn rules(&self) -> &RuleSet { &self.rules }
    pub fn combinations(&self) -> &CombinationTable { &self.combinations }
    pub fn config(&self) -> &PipelineConfig { &self.config }

    /// Run all four stages.
    ///
    /// Stage 4 draws from an RNG seeded with `config.seed` when set, and
    /// from the thread RNG otherwise.
    pub fn process(&self, document: &str) -> ProcessingResult {
        match self.config.seed {
            Some(seed) => self.process_with_rng(document, &mut StdRng::seed_from_u64(seed)),
            None => self.process_with_rng(document, &mut rand::rng()),
        }
    }

    /// Run all four stages with a caller-supplied RNG for Stage 4.
    pub fn process_with_rng<R: Rng>(&self, document: &str, rng: &mut R) -> ProcessingResult {
        // Stage 1: Segment + tag
        let stage1 = segmenter::segment(document, &self.taxonomy);

        // Stage 2: Rules
        let stage2 = rules::derive(&stage1, &self.rules);

        // Stage 3: Layout + resonance
        let stage3 = layout::distribute(&stage2);

        // Stage 4: Pairing
        let stage4 = pairing::combine(&stage2, &stage3, &self.combinations, &self.config, rng);

        debug!(
            segments = stage1.len(),
            resonance = stage3.system_resonance,
            combinations = stage4.quantum_nodes.len(),
            "processed document"
        );
        ProcessingResult { stage1, stage2, stage3, stage4 }
    }

    /// Ask `source` for a description of `payload`, then process it.
    pub async fn process_source<S>(&self, source: &S, payload: &str, mime_type: &str) -> Result<ProcessingResult>
    where
        S: DescriptionSource + ?Sized,
    {
        let text = source.describe(payload, mime_type).await?;
        Ok(self.process(&text))
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid segment id: {0}")]
    InvalidSegmentId(String),

    #[error("Description source error: {0}")]
    Source(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
