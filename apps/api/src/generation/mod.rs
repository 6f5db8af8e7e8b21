// Resume tailoring: per-section generation through the model and the
// end-to-end pipeline that applies and validates the result.
// All model calls go through llm_client::TextGenerator.

pub mod generator;
pub mod handlers;
pub mod pipeline;
pub mod prompts;

pub use generator::SectionGenerator;
