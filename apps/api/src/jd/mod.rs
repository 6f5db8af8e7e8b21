// Job-description analysis: keyword ranking and the metadata resolver
// (model-backed, with a deterministic heuristic fallback).

pub mod handlers;
pub mod heuristics;
pub mod keywords;
pub mod metadata;
pub mod prompts;
pub mod resolver;

pub use metadata::{JobDescriptionMetadata, RoleLevel, ValidationContext};
pub use resolver::MetadataResolver;
