pub mod common;
pub mod identity;
pub mod project_structure;

pub use crate::domain::DomainError;
pub use identity::ProjectIdentity;
pub use project_structure::ProjectStructure;
