use std::sync::Arc;

use crate::config::Config;
use crate::generation::SectionGenerator;
use crate::jd::MetadataResolver;
use crate::render::PdfCompiler;
use crate::validation::SectionValidators;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Owns the process-lifetime JD metadata cache.
    pub resolver: Arc<MetadataResolver>,
    pub sections: Arc<SectionGenerator>,
    /// Built once from `config.validation`.
    pub validators: Arc<SectionValidators>,
    pub pdf: PdfCompiler,
}
