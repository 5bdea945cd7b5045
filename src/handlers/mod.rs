//! The two entry points the state machine invokes.
//!
//! Both are stateless: nothing flows between them except through the
//! orchestrator.

pub mod reporter;
pub mod splitter;

pub use reporter::{ChunkOutput, ChunkReporter};
pub use splitter::{SplitResponse, split_doc};
