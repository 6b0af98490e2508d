//! Generative enrichment of dataset analysis using Google's Gemini API.
//!
//! The model is asked to emit a JSON object matching the report schema. Any
//! failure here (network, quota, malformed output) is surfaced as an error to
//! the analyzer, which falls back to the deterministic path.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::report::{AnalyzeInput, DatasetAnalysis};
use crate::shape::{FileFormat, ParsedShape};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const SAMPLE_CHARS: usize = 2000;

/// A text model that can produce a full analysis report for an upload.
#[async_trait]
pub trait Enrichment: Send + Sync {
    async fn analyze(&self, input: &AnalyzeInput) -> Result<DatasetAnalysis>;
}

/// Gemini-backed enrichment client.
pub struct GeminiEnrichment {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
}

// generateContent request/response structures
#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiEnrichment {
    pub fn new(api_key: String, model: String, timeout_secs: u64) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client for Gemini enrichment")?;

        Ok(Self {
            http_client,
            api_key,
            model,
        })
    }

    /// Build the analysis prompt: file metadata, a content sample, and the
    /// exact JSON schema the model must fill in.
    fn build_prompt(input: &AnalyzeInput) -> String {
        let format = FileFormat::detect(&input.content_type, &input.file_name);
        let shape = ParsedShape::extract(format, &input.content);
        let sample: String = input.content.chars().take(SAMPLE_CHARS).collect();

        format!(
            r#"Analyze this dataset and respond with ONLY a JSON object, no other text.

File: {file_name}
Type: {content_type}
Size: {size} bytes
Detected fields: {fields}
Detected records: {records}

Content sample:
{sample}

Respond with a JSON object with exactly these keys:
{{
  "summary": "2-3 sentence description of the dataset",
  "categories": ["subject-matter tags such as health, financial, location, ecommerce, social, technology, general"],
  "dataQuality": "brief quality assessment",
  "useCases": ["2-4 potential commercial use cases"],
  "suggestedPriceETH": "price between 0.001 and 0.05 as a string",
  "pricingReasoning": "one sentence explaining the price",
  "sensitivityScore": 1,
  "keyInsights": ["2-3 notable observations"],
  "recordCount": {records},
  "columnCount": {columns},
  "dataTypes": ["tags such as temporal, identifier, textual, numerical, contact, geospatial, mixed"]
}}"#,
            file_name = input.file_name,
            content_type = input.content_type,
            size = input.size_bytes,
            fields = shape.field_names.join(", "),
            records = shape.record_count,
            columns = shape.field_names.len(),
            sample = sample,
        )
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .http_client
            .post(format!(
                "{}/{}:generateContent?key={}",
                API_BASE, self.model, self.api_key
            ))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "Gemini API request failed: {} - {}",
                status,
                error_text
            ));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .context("Failed to parse Gemini API response")?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(anyhow::anyhow!("Gemini API returned no content"));
        }
        Ok(text)
    }

    /// Extract the first balanced `{...}` object from the model's text and
    /// parse it as a report. Models often wrap JSON in prose or code fences.
    fn parse_report(text: &str) -> Result<DatasetAnalysis> {
        let json_text =
            extract_json_object(text).context("No JSON object found in model response")?;
        serde_json::from_str(json_text).context("Failed to parse model response as a report")
    }
}

/// First balanced `{...}` substring, tracking string literals and escapes so
/// braces inside quoted values do not confuse the depth count.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

#[async_trait]
impl Enrichment for GeminiEnrichment {
    async fn analyze(&self, input: &AnalyzeInput) -> Result<DatasetAnalysis> {
        tracing::debug!(
            file_name = %input.file_name,
            model = %self.model,
            "requesting generative analysis"
        );

        let prompt = Self::build_prompt(input);
        let text = self.generate(&prompt).await?;
        let report = Self::parse_report(&text)?;

        tracing::debug!(file_name = %input.file_name, "generative analysis succeeded");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT_JSON: &str = r#"{
        "summary": "Transaction log with buyer emails.",
        "categories": ["financial"],
        "dataQuality": "clean",
        "useCases": ["fraud detection"],
        "suggestedPriceETH": "0.0030",
        "pricingReasoning": "small but structured",
        "sensitivityScore": 2,
        "keyInsights": ["contains contact data"],
        "recordCount": 100,
        "columnCount": 3,
        "dataTypes": ["identifier", "contact", "numerical"]
    }"#;

    #[test]
    fn extracts_plain_object() {
        let found = extract_json_object(r#"{"a": 1}"#).unwrap();
        assert_eq!(found, r#"{"a": 1}"#);
    }

    #[test]
    fn extracts_object_from_surrounding_prose() {
        let text = format!("Here is the analysis:\n```json\n{}\n```\nHope that helps!", REPORT_JSON);
        let found = extract_json_object(&text).unwrap();
        let report: DatasetAnalysis = serde_json::from_str(found).unwrap();
        assert_eq!(report.record_count, 100);
    }

    #[test]
    fn braces_inside_strings_do_not_break_extraction() {
        let text = r#"note {"msg": "unmatched } brace and \" quote", "n": {"x": 1}} trailing"#;
        let found = extract_json_object(text).unwrap();
        assert_eq!(
            found,
            r#"{"msg": "unmatched } brace and \" quote", "n": {"x": 1}}"#
        );
    }

    #[test]
    fn no_object_yields_none() {
        assert!(extract_json_object("no json here").is_none());
        assert!(extract_json_object("{truncated").is_none());
    }

    #[test]
    fn parse_report_rejects_wrong_shape() {
        assert!(GeminiEnrichment::parse_report(r#"{"unexpected": true}"#).is_err());
    }

    #[test]
    fn prompt_includes_metadata_and_schema() {
        let input = AnalyzeInput {
            file_name: "tx.csv".to_string(),
            content_type: "text/csv".to_string(),
            size_bytes: 512,
            content: "id,email,amount\n1,a@x.com,5\n".to_string(),
        };
        let prompt = GeminiEnrichment::build_prompt(&input);
        assert!(prompt.contains("tx.csv"));
        assert!(prompt.contains("suggestedPriceETH"));
        assert!(prompt.contains("id, email, amount"));
    }
}
