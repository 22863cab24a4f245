//! Description sources: anything that turns a payload into plain prose for
//! the pipeline.
//!
//! The pipeline only needs "a text string". Where the text comes from (manual
//! entry, an image description service, a simulated analyzer) is behind
//! [`DescriptionSource`].
//!
//! | Source | Feature | Description |
//! |--------|---------|-------------|
//! | `ManualEntry` | (default) | Fixed text, returned immediately |
//! | `SimulatedAnalyzer` | `simulation` | Canned image description after a delay |

use async_trait::async_trait;

use crate::Result;

/// Produces a text description of an opaque payload.
#[async_trait]
pub trait DescriptionSource: Send + Sync {
    /// Describe `payload` (e.g. base64 image data) of the given MIME type.
    async fn describe(&self, payload: &str, mime_type: &str) -> Result<String>;
}

/// Text typed in by hand. Ignores the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualEntry(pub String);

impl ManualEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

#[async_trait]
impl DescriptionSource for ManualEntry {
    async fn describe(&self, _payload: &str, _mime_type: &str) -> Result<String> {
        Ok(self.0.clone())
    }
}

#[cfg(feature = "simulation")]
pub use simulated::{SimulatedAnalyzer, SIMULATED_DESCRIPTION};

#[cfg(feature = "simulation")]
mod simulated {
    use std::time::Duration;

    use async_trait::async_trait;
    use tracing::debug;

    use super::DescriptionSource;
    use crate::{Error, Result};

    /// What the simulated analyzer reports for every image.
    pub const SIMULATED_DESCRIPTION: &str = "[SIMULATION MODE]
    Observed Object: Visual Data Artifact.
    Dimensions: Variable Resolution (Detected).
    Color Space: RGB Spectrum / Light Intensity Map.
    Material Composition: Digital Information Lattice.
    Geometry: Complex Euclidean forms detected in 2D projection.
    Estimated Entropy: 8.4 bits/pixel (High Complexity).
    Energy Signature: Static potential awaiting kinetic processing.
    Structure: Hierarchy of visual elements detected, ready for logical atomization.
    Note: Real-time image analysis is disabled in this public demo version.
    ";

    /// Stand-in for an image analysis service: sleeps, then returns
    /// [`SIMULATED_DESCRIPTION`]. No network access.
    #[derive(Debug, Clone)]
    pub struct SimulatedAnalyzer {
        delay: Duration,
    }

    impl Default for SimulatedAnalyzer {
        fn default() -> Self {
            Self { delay: Duration::from_millis(1500) }
        }
    }

    impl SimulatedAnalyzer {
        pub fn with_delay(delay: Duration) -> Self {
            Self { delay }
        }

        pub fn delay(&self) -> Duration {
            self.delay
        }
    }

    #[async_trait]
    impl DescriptionSource for SimulatedAnalyzer {
        async fn describe(&self, payload: &str, mime_type: &str) -> Result<String> {
            if !mime_type.starts_with("image/") {
                return Err(Error::Source(format!("unsupported MIME type '{mime_type}'")));
            }
            debug!(bytes = payload.len(), mime_type, delay_ms = self.delay.as_millis() as u64, "simulating image analysis");
            tokio::time::sleep(self.delay).await;
            Ok(SIMULATED_DESCRIPTION.to_owned())
        }
    }
}
