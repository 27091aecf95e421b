//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "create a project" or "add a target".

mod materializer;
pub mod scaffold_service;
pub mod target_service;

pub use materializer::{IDE_SYNC_TASK, IdeSync};
pub use scaffold_service::{DestinationState, GRADLE_PROJECT_FILES, ScaffoldReport, ScaffoldService};
pub use target_service::{TargetChanges, TargetOutcome, TargetReport, TargetService};
