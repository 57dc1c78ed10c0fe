//! # relic-core
//!
//! Core types, collaborator traits, and error types for relic.
//!
//! This crate provides the foundational types shared across all relic crates:
//! - Package records flowing through the pipeline (candidates, enriched and
//!   resolved packages)
//! - Registry metadata and runtime tag classification
//! - Override entries (`[]` or `[owner, name, url]`)
//! - Traits for the external collaborators the pipeline pulls from
//! - Cross-cutting error types

pub mod errors;
pub mod metadata;
pub mod overrides;
pub mod package;
pub mod sources;

pub use errors::CoreError;
pub use metadata::{MetadataInfo, RegistryMetadata, ReleaseArtifact, RuntimeTags};
pub use overrides::OverrideEntry;
pub use package::{EnrichedCandidate, PackageCandidate, RepoIdentity, ResolvedPackage};
pub use sources::{ClassificationStore, CompatibilityOracle, MetadataSource, StarSource};
