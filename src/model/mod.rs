//! # Pipeline Data Model
//!
//! Plain DTOs that cross every stage boundary:
//! segmenter → rules → layout → pairing → caller.
//!
//! Design rule: this module is pure data. No I/O, no state, no async and
//! no knowledge of the taxonomy or rule tables.

pub mod segment;
pub mod operation;
pub mod spatial;
pub mod combination;
pub mod stage;
pub(crate) mod keyed;

pub use segment::{Segment, SegmentId, Label, UNKNOWN_CATEGORY, primary_category, primary_property};
pub use operation::{LogicOperation, OperationType, UniversalBase};
pub use spatial::{
    SpatialNode, NodeConnection, ConnectionType, ShapeRole, Vector3,
    MAX_CONNECTIONS, UNIVERSAL_ALIGNMENT,
};
pub use combination::{CombinationNode, GateType};
pub use stage::{
    Stage1Output, Stage2Data, Stage2Output, Stage3Output, Stage4Output,
    ProcessingResult,
};
