pub mod input;
pub mod segmenter;
pub mod squeeze;

// Re-export main types for convenient access
pub use segmenter::{
    segment, ConfigError, SegmenterOptions, SentenceSegmenter, DEFAULT_SEGMENTER,
};

// Re-export the squeeze helpers alongside the module
pub use squeeze::{squeeze, squeeze_seq};
