pub mod archive;
pub mod export;
pub mod extractor;
pub mod normalize;
pub mod pipeline;
pub mod translit;

// Re-export main types for convenient access
pub use normalize::{IdentityNormalizer, Normalize};
pub use pipeline::{InputSource, PipelineConfig, PipelineOutput, RunStats};
pub use translit::transliterate;
