//! Per-application CycloneDX SBOM generation for multi-application Go repositories.
//!
//! Each buildable application under the applications directory (default `cmd/`) gets
//! its own SBOM listing the modules that application actually uses. Whether a module is
//! an indirect dependency is taken from the repository-wide module list.
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`SbomGeneratorError`)
//! - [`config`]: Generator configuration (`SbomGeneratorConfig`, builder)
//! - [`types`]: Domain types (`ModuleRecord`, `EffectiveModule`, `ModuleKey`, `AppModuleSet`, `GlobalIndirectIndex`)
//! - [`discover`]: Application discovery
//! - [`resolver`]: Module resolution (`ModuleLister` trait, `GoListClient`, stream decoding)
//! - [`join`]: Indirect-dependency attribution
//! - [`sbom`]: CycloneDX 1.6 synthesis and document writer
//! - [`detect`]: Project-type detection
//! - [`generator`]: Main orchestrator (`SbomGenerator`, `SbomGeneratorBuilder`, `RunSummary`)
//!
//! # Architecture
//!
//! ```text
//! go list -m -json all ------> GlobalIndirectIndex --------------+
//!                                                                 |
//! cmd/<app>/main.go --> Application --> go list -json -deps --> AppModuleSet
//!                                                                 |
//!                                                          join::attribute
//!                                                                 |
//!                                                        cyclonedx::synthesize
//!                                                                 |
//!                                                        sbom-<app>.json
//! ```

pub mod config;
pub mod detect;
pub mod discover;
pub mod error;
pub mod generator;
pub mod join;
pub mod resolver;
pub mod sbom;
pub mod types;

// --- Public API Re-exports ---

// Generator (main orchestrator)
pub use generator::{AppFailure, GeneratedSbom, RunSummary, SbomGenerator, SbomGeneratorBuilder};

// Configuration
pub use config::{SbomGeneratorConfig, SbomGeneratorConfigBuilder};

// Error
pub use error::{ResolutionScope, SbomGeneratorError};

// Types
pub use types::{
    AppModuleSet, Application, AttributedModule, EffectiveModule, GlobalIndirectIndex,
    ModuleKey, ModuleRecord, Replacement,
};

// Resolver
pub use resolver::{GoListClient, ModuleLister, ModuleResolver};

// SBOM
pub use sbom::{SbomDocument, SynthesisOptions};

// Detection
pub use detect::{ProjectKind, ProjectTypes, detect_project_types};
