//! Composables Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the
//! `composables` Compose Multiplatform project generator, following
//! hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         composables-cli (CLI)           │
//! │        (Implements Driving Ports)       │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services           │
//! │     (ScaffoldService, TargetService)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (TemplateSource, Filesystem, BuildTool) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    composables-adapters (Infrastructure)│
//! │ (EmbeddedTemplates, LocalFilesystem, …) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (TargetSet, ProjectIdentity, patching)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use composables_core::prelude::*;
//!
//! # fn run(service: ScaffoldService) -> ComposablesResult<()> {
//! let identity = ProjectIdentity::new("com.example.app", "My App", "composeApp")?;
//! let targets: TargetSet = "android,jvm".parse()?;
//! service.materialize(Path::new("./myapp"), &identity, &targets)?;
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, DestinationState, IdeSync, ScaffoldReport, ScaffoldService,
        TargetOutcome, TargetReport, TargetService,
        ports::{BuildTool, Filesystem, TemplateSource},
    };
    pub use crate::domain::{
        DomainError, Platform, ProjectIdentity, ProjectStructure, TargetSet, TemplatePath,
    };
    pub use crate::error::{ComposablesError, ComposablesResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
