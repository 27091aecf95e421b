//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `composables-adapters`
//! implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateSource`: Bundled project template tree
//!   - `BuildTool`: Gradle invocations for IDE metadata
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{BuildTool, Filesystem, TemplateSource};

#[cfg(test)]
pub use output::{MockBuildTool, MockFilesystem, MockTemplateSource};
