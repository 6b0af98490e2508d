//! Dataset classification and pricing engine
//!
//! Given an uploaded file's content and metadata, produce a structured
//! analysis report: subject-matter categories, data-type tags, a sensitivity
//! score, record/column estimates, and a suggested price. A generative text
//! model can optionally enrich the report; the deterministic analyzer is
//! always the fallback and is complete on its own.

pub mod analyzer;
pub mod classify;
pub mod enrichment;
pub mod keywords;
pub mod narrative;
pub mod pricing;
pub mod report;
pub mod shape;

pub use analyzer::Analyzer;
pub use enrichment::{Enrichment, GeminiEnrichment};
pub use report::{AnalyzeInput, DatasetAnalysis};
pub use shape::{FileFormat, ParsedShape};
