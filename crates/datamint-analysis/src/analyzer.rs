//! The analysis entry point: deterministic classification with optional
//! generative enrichment layered in front of it.

use std::sync::Arc;

use crate::enrichment::Enrichment;
use crate::report::{AnalyzeInput, DatasetAnalysis};
use crate::shape::{FileFormat, ParsedShape};
use crate::{classify, narrative, pricing};

/// Stateless dataset analyzer.
///
/// `analyze` is pure and never fails. `analyze_with_enrichment` consults the
/// configured text model first and silently falls back on any failure.
#[derive(Clone)]
pub struct Analyzer {
    enrichment: Option<Arc<dyn Enrichment>>,
}

impl Analyzer {
    pub fn new(enrichment: Option<Arc<dyn Enrichment>>) -> Self {
        Self { enrichment }
    }

    pub fn deterministic() -> Self {
        Self { enrichment: None }
    }

    /// Deterministic single-pass analysis. Same input always produces the
    /// same report.
    pub fn analyze(&self, input: &AnalyzeInput) -> DatasetAnalysis {
        let format = FileFormat::detect(&input.content_type, &input.file_name);
        let shape = ParsedShape::extract(format, &input.content);

        let categories = classify::categories(&shape.field_names, &input.content);
        let data_types = classify::data_types(&shape.field_names);
        let sensitivity = classify::sensitivity_score(&shape.field_names, &input.content);
        let price = pricing::suggested_price(input.size_bytes, shape.record_count);

        let mut report = DatasetAnalysis {
            summary: narrative::summary(format, &input.file_name, &shape),
            data_quality: narrative::data_quality(&shape),
            use_cases: narrative::use_cases(&categories),
            pricing_reasoning: narrative::pricing_reasoning(
                input.size_bytes,
                shape.record_count,
                &price,
            ),
            key_insights: narrative::key_insights(&shape, &categories, sensitivity),
            suggested_price_eth: price,
            sensitivity_score: sensitivity,
            record_count: shape.record_count,
            column_count: shape.field_names.len() as u64,
            categories,
            data_types,
        };
        report.normalize();
        report
    }

    /// Try the enrichment model once; on any failure fall back to the
    /// deterministic path. The caller always gets a complete report.
    pub async fn analyze_with_enrichment(&self, input: &AnalyzeInput) -> DatasetAnalysis {
        if let Some(enrichment) = &self.enrichment {
            match enrichment.analyze(input).await {
                Ok(mut report) => {
                    report.normalize();
                    return report;
                }
                Err(err) => {
                    tracing::warn!(
                        file_name = %input.file_name,
                        error = %err,
                        "enrichment failed, using deterministic analysis"
                    );
                }
            }
        }
        self.analyze(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;

    fn input(file_name: &str, content_type: &str, size: u64, content: &str) -> AnalyzeInput {
        AnalyzeInput {
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            size_bytes: size,
            content: content.to_string(),
        }
    }

    fn csv_with_rows(header: &str, rows: usize) -> String {
        let mut content = String::from(header);
        content.push('\n');
        for i in 0..rows {
            content.push_str(&format!("{},user{}@example.com,{}\n", i, i, i * 10));
        }
        content
    }

    #[test]
    fn csv_financial_scenario() {
        let content = csv_with_rows("id,email,amount", 100);
        let report =
            Analyzer::deterministic().analyze(&input("tx.csv", "text/csv", 5 * 1024, &content));
        assert!(report.categories.contains(&"financial".to_string()));
        assert!(report.sensitivity_score >= 2);
        assert_eq!(report.column_count, 3);
        assert_eq!(report.record_count, 100);
    }

    #[test]
    fn json_location_scenario() {
        let content = r#"[
            {"lat": 1.0, "lng": 2.0, "city": "a"},
            {"lat": 1.1, "lng": 2.1, "city": "b"},
            {"lat": 1.2, "lng": 2.2, "city": "c"},
            {"lat": 1.3, "lng": 2.3, "city": "d"},
            {"lat": 1.4, "lng": 2.4, "city": "e"}
        ]"#;
        let report = Analyzer::deterministic().analyze(&input(
            "points.json",
            "application/json",
            2 * 1024,
            content,
        ));
        assert!(report.categories.contains(&"location".to_string()));
        assert!(report.data_types.contains(&"geospatial".to_string()));
        assert_eq!(report.record_count, 5);
        assert_eq!(report.column_count, 3);
    }

    #[test]
    fn empty_csv_scenario() {
        let report = Analyzer::deterministic().analyze(&input("empty.csv", "", 0, ""));
        assert_eq!(report.record_count, 0);
        assert_eq!(report.column_count, 0);
        assert_eq!(report.categories, vec!["general"]);
        assert_eq!(report.suggested_price_eth, "0.0010");
    }

    #[test]
    fn malformed_json_scenario() {
        let report = Analyzer::deterministic().analyze(&input(
            "broken.json",
            "application/json",
            10,
            "{not valid",
        ));
        assert_eq!(report.record_count, 0);
        assert_eq!(report.column_count, 0);
        assert!(report.summary.contains("could not be parsed"));
    }

    #[test]
    fn analysis_is_idempotent() {
        let content = csv_with_rows("id,email,amount", 50);
        let analyzer = Analyzer::deterministic();
        let req = input("tx.csv", "text/csv", 4096, &content);
        assert_eq!(analyzer.analyze(&req), analyzer.analyze(&req));
    }

    #[test]
    fn report_invariants_hold_for_varied_inputs() {
        let inputs = vec![
            input("a.csv", "text/csv", 0, ""),
            input("b.json", "application/json", 100, "[]"),
            input("c.json", "application/json", 100, "{not valid"),
            input("d.bin", "application/octet-stream", 500, "\u{fffd}\u{fffd}"),
            input("e.csv", "text/csv", 200_000_000, &csv_with_rows("ssn,password", 5)),
        ];
        for req in inputs {
            let report = Analyzer::deterministic().analyze(&req);
            assert!(!report.summary.is_empty());
            assert!(!report.categories.is_empty());
            assert!(!report.data_types.is_empty());
            assert!((1..=5).contains(&report.sensitivity_score));
            let price: f64 = report.suggested_price_eth.parse().unwrap();
            assert!(price > 0.0 && price <= 0.05);
        }
    }

    struct FailingEnrichment;

    #[async_trait]
    impl Enrichment for FailingEnrichment {
        async fn analyze(&self, _input: &AnalyzeInput) -> Result<DatasetAnalysis> {
            anyhow::bail!("service unavailable")
        }
    }

    struct CannedEnrichment(DatasetAnalysis);

    #[async_trait]
    impl Enrichment for CannedEnrichment {
        async fn analyze(&self, _input: &AnalyzeInput) -> Result<DatasetAnalysis> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn enrichment_failure_falls_back_silently() {
        let analyzer = Analyzer::new(Some(Arc::new(FailingEnrichment)));
        let content = csv_with_rows("id,email,amount", 10);
        let report = analyzer
            .analyze_with_enrichment(&input("tx.csv", "text/csv", 1024, &content))
            .await;
        assert_eq!(report.record_count, 10);
        assert!(report.categories.contains(&"financial".to_string()));
    }

    #[tokio::test]
    async fn enriched_output_is_normalized() {
        let canned = DatasetAnalysis {
            summary: "Model summary".to_string(),
            categories: vec![],
            data_quality: "good".to_string(),
            use_cases: vec![],
            suggested_price_eth: "0.9".to_string(),
            pricing_reasoning: String::new(),
            sensitivity_score: 0,
            key_insights: vec![],
            record_count: 10,
            column_count: 2,
            data_types: vec![],
        };
        let analyzer = Analyzer::new(Some(Arc::new(CannedEnrichment(canned))));
        let report = analyzer
            .analyze_with_enrichment(&input("x.csv", "text/csv", 10, "a,b\n1,2"))
            .await;
        assert_eq!(report.categories, vec!["general"]);
        assert_eq!(report.data_types, vec!["mixed"]);
        assert_eq!(report.sensitivity_score, 1);
        assert_eq!(report.suggested_price_eth, "0.0500");
    }
}
