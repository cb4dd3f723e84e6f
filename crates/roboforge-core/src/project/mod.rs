//! Project materialization from template archives.
//!
//! This module provides:
//! - Generation options and the fixed project-type set
//! - Extraction planning (filtering, ordering, destination remapping)
//! - `${key}` substitution for build descriptors
//! - The generator itself plus the build tool bootstrap seam

pub mod bootstrap;
pub mod generate;
pub mod options;
pub mod plan;
pub mod substitute;

pub use bootstrap::{GradleBootstrap, WrapperBootstrap};
pub use generate::ProjectGenerator;
pub use options::{ProjectOptions, ProjectType};
pub use plan::ExtractionPlan;
pub use substitute::SubstitutionTable;
