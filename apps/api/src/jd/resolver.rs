//! Job Description Metadata Resolver.
//!
//! Primary path asks the model for a fixed-shape JSON object. Any failure
//! (transport, missing object, bad JSON) falls back to the regex heuristics;
//! callers always get metadata back, never an error.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};

use super::heuristics::infer_metadata;
use super::metadata::JobDescriptionMetadata;
use super::prompts::JD_ANALYSIS_PROMPT_TEMPLATE;
use crate::llm_client::{complete_json, prompts::JSON_ONLY_SYSTEM, LlmError, TextGenerator};

const CACHE_KEY_CHARS: usize = 200;
const ANALYSIS_TEMPERATURE: f32 = 0.3;

/// Resolves and caches metadata per job description.
///
/// The cache lives for the process and is keyed by the trimmed first 200
/// characters of the description. Only model results are cached, so a
/// transient outage does not pin heuristic output.
pub struct MetadataResolver {
    generator: Arc<dyn TextGenerator>,
    cache: Mutex<HashMap<String, JobDescriptionMetadata>>,
}

impl MetadataResolver {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub async fn resolve(&self, jd_text: &str) -> JobDescriptionMetadata {
        let key = cache_key(jd_text);
        let cached = self.cache_lock().get(&key).cloned();
        if let Some(hit) = cached {
            debug!("JD metadata cache hit");
            return hit;
        }

        match self.analyze(jd_text).await {
            Ok(metadata) => {
                self.cache_lock().insert(key, metadata.clone());
                metadata
            }
            Err(e) => {
                warn!("JD analysis failed, using heuristic fallback: {e}");
                infer_metadata(jd_text)
            }
        }
    }

    async fn analyze(&self, jd_text: &str) -> Result<JobDescriptionMetadata, LlmError> {
        let prompt = JD_ANALYSIS_PROMPT_TEMPLATE.replace("{jd_text}", jd_text);
        let metadata: JobDescriptionMetadata = complete_json(
            self.generator.as_ref(),
            &prompt,
            JSON_ONLY_SYSTEM,
            ANALYSIS_TEMPERATURE,
        )
        .await?;
        Ok(metadata.normalized())
    }

    fn cache_lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, JobDescriptionMetadata>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn cache_key(jd_text: &str) -> String {
    jd_text
        .chars()
        .take(CACHE_KEY_CHARS)
        .collect::<String>()
        .trim()
        .to_string()
}
