//! GPS coordinate extraction pipeline
//!
//! The pipeline runs in four stages: pattern scanning over raw text,
//! range validation with degree-level deduplication, record assembly
//! (context windows, timestamps, status classification), and metric
//! deduplication with partitioning into the output sets.

pub mod assemble;
pub mod context;
pub mod patterns;
pub mod validate;

use crate::config::ExtractorConfig;
use crate::error::{Result, TrackxError};
use crate::models::{Extraction, RawCoordinateCandidate};

pub use context::ContextPatterns;
pub use patterns::CoordinatePatterns;

/// Characters of text quoted back when nothing could be extracted
const ERROR_SAMPLE_CHARS: usize = 200;

/// The extraction engine. Compiles every pattern once at construction;
/// all handles live here instead of in module-level statics so callers
/// control when compilation happens and reuse the engine across runs.
#[derive(Debug)]
pub struct GpsExtractor {
    coordinates: CoordinatePatterns,
    context: ContextPatterns,
    config: ExtractorConfig,
}

impl GpsExtractor {
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            coordinates: CoordinatePatterns::new()?,
            context: ContextPatterns::new()?,
            config,
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(ExtractorConfig::default())
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Scan, validate and degree-deduplicate, preserving scan order
    pub fn candidates(&self, text: &str) -> Vec<RawCoordinateCandidate> {
        validate::validate_and_dedup(self.coordinates.scan(text), self.config.dedup_degrees)
    }

    /// Run the full pipeline over a single block of text
    pub fn extract_from_text(&self, text: &str) -> Result<Extraction> {
        let candidates = self.candidates(text);
        self.finish(text, candidates)
    }

    /// Run the full pipeline over page-split text. The joined document is
    /// scanned first; if that yields nothing, each page is scanned on its
    /// own before giving up, since some layouts only match in isolation.
    pub fn extract_from_pages(&self, pages: &[String]) -> Result<Extraction> {
        let full = pages.join("\n");
        let mut candidates = self.candidates(&full);

        if candidates.is_empty() && pages.len() > 1 {
            tracing::debug!(pages = pages.len(), "document scan empty, retrying per page");
            for page in pages {
                candidates.extend(self.coordinates.scan(page));
            }
            candidates = validate::validate_and_dedup(candidates, self.config.dedup_degrees);
        }

        self.finish(&full, candidates)
    }

    fn finish(&self, text: &str, candidates: Vec<RawCoordinateCandidate>) -> Result<Extraction> {
        if candidates.is_empty() {
            return Err(TrackxError::NoCoordinatesFound { sample: text_sample(text) });
        }

        tracing::debug!(candidates = candidates.len(), "assembling GPS records");

        let timestamps = self.context.collect_timestamps(text);
        let records =
            assemble::assemble_records(text, &candidates, &timestamps, &self.context, &self.config);
        let unique = assemble::dedup_by_distance(records, self.config.dedup_radius_m);

        Ok(assemble::partition(unique))
    }
}

fn text_sample(text: &str) -> String {
    text.chars().take(ERROR_SAMPLE_CHARS).collect()
}
