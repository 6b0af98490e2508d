//! Human-readable text synthesis for analysis reports.
//!
//! Pure presentation: describes the structural facts computed elsewhere and
//! never alters categories, counts, or price.

use crate::shape::{FileFormat, ParsedShape};

pub fn summary(format: FileFormat, file_name: &str, shape: &ParsedShape) -> String {
    match format {
        FileFormat::Csv => format!(
            "CSV dataset \"{}\" with {} columns and {} data records.",
            file_name,
            shape.field_names.len(),
            shape.record_count
        ),
        FileFormat::Json if shape.unparsed => format!(
            "JSON file \"{}\" could not be parsed; analyzed by size only.",
            file_name
        ),
        FileFormat::Json => format!(
            "JSON dataset \"{}\" containing {} records with {} fields.",
            file_name,
            shape.record_count,
            shape.field_names.len()
        ),
        FileFormat::Generic => format!(
            "Data file \"{}\" analyzed by size and content keywords.",
            file_name
        ),
    }
}

pub fn data_quality(shape: &ParsedShape) -> String {
    if shape.unparsed {
        "Structure could not be verified; manual review recommended.".to_string()
    } else if shape.record_count == 0 {
        "No data records detected.".to_string()
    } else if shape.field_names.is_empty() {
        "Records present but field structure is unclear.".to_string()
    } else {
        format!(
            "Well-structured data with {} consistent fields across {} records.",
            shape.field_names.len(),
            shape.record_count
        )
    }
}

pub fn use_cases(categories: &[String]) -> Vec<String> {
    let mut cases = Vec::new();
    for category in categories {
        match category.as_str() {
            "health" => cases.push("Health research and wellness product development".to_string()),
            "financial" => cases.push("Financial modeling and spending-pattern analysis".to_string()),
            "location" => cases.push("Geographic analysis and location-based services".to_string()),
            "ecommerce" => cases.push("Consumer behavior and market research".to_string()),
            "social" => cases.push("Social trend analysis and engagement studies".to_string()),
            "technology" => cases.push("Web analytics and user-experience research".to_string()),
            _ => {}
        }
    }
    if cases.is_empty() {
        cases.push("General data analysis and machine-learning training".to_string());
    }
    cases
}

pub fn key_insights(shape: &ParsedShape, categories: &[String], sensitivity: u8) -> Vec<String> {
    let mut insights = vec![format!(
        "Contains {} records across {} fields",
        shape.record_count,
        shape.field_names.len()
    )];
    if categories.iter().any(|c| c != "general") {
        insights.push(format!("Covers {} subject area(s)", categories.len()));
    }
    if sensitivity >= 3 {
        insights.push("Contains potentially sensitive information".to_string());
    }
    insights
}

pub fn pricing_reasoning(size_bytes: u64, record_count: u64, price: &str) -> String {
    format!(
        "Priced at {} based on a {} byte file with {} records; larger files and higher record counts command higher prices.",
        price, size_bytes, record_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparsed_json_summary_mentions_parse_failure() {
        let shape = ParsedShape {
            field_names: vec![],
            record_count: 0,
            unparsed: true,
        };
        let text = summary(FileFormat::Json, "broken.json", &shape);
        assert!(text.contains("could not be parsed"));
    }

    #[test]
    fn use_cases_always_non_empty() {
        assert!(!use_cases(&["general".to_string()]).is_empty());
        assert!(!use_cases(&[]).is_empty());
        let cases = use_cases(&["financial".to_string(), "location".to_string()]);
        assert_eq!(cases.len(), 2);
    }
}
