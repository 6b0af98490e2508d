//! Structural parsing of uploaded content into field names and record counts.
//!
//! Parsing never fails: malformed input degrades to an empty shape so the
//! analysis request can still complete.

use serde_json::Value;

/// Which structural parser applies to an upload.
///
/// Decided from the declared MIME type first, the filename extension second.
/// No content sniffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
    Generic,
}

impl FileFormat {
    pub fn detect(content_type: &str, file_name: &str) -> Self {
        let mime = content_type.to_lowercase();
        if mime.contains("csv") {
            return FileFormat::Csv;
        }
        if mime.contains("json") {
            return FileFormat::Json;
        }
        let name = file_name.to_lowercase();
        if name.ends_with(".csv") {
            FileFormat::Csv
        } else if name.ends_with(".json") {
            FileFormat::Json
        } else {
            FileFormat::Generic
        }
    }
}

/// Field names and record count extracted from the raw content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedShape {
    pub field_names: Vec<String>,
    pub record_count: u64,
    /// Set when a JSON payload failed to parse
    pub unparsed: bool,
}

impl ParsedShape {
    pub fn extract(format: FileFormat, content: &str) -> Self {
        match format {
            FileFormat::Csv => Self::from_csv(content),
            FileFormat::Json => Self::from_json(content),
            FileFormat::Generic => ParsedShape::default(),
        }
    }

    /// Plain comma-split on the first non-blank line. Quoted fields containing
    /// commas are not handled; reports stay reproducible against existing
    /// listings that were analyzed the same way.
    fn from_csv(content: &str) -> Self {
        let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
        let field_names = match lines.first() {
            Some(header) => header.split(',').map(|t| t.trim().to_string()).collect(),
            None => Vec::new(),
        };
        ParsedShape {
            field_names,
            record_count: lines.len().saturating_sub(1) as u64,
            unparsed: false,
        }
    }

    fn from_json(content: &str) -> Self {
        match serde_json::from_str::<Value>(content) {
            Ok(Value::Array(items)) => {
                let field_names = items
                    .first()
                    .and_then(|v| v.as_object())
                    .map(|obj| obj.keys().cloned().collect())
                    .unwrap_or_default();
                ParsedShape {
                    field_names,
                    record_count: items.len() as u64,
                    unparsed: false,
                }
            }
            Ok(Value::Object(obj)) => ParsedShape {
                field_names: obj.keys().cloned().collect(),
                record_count: 1,
                unparsed: false,
            },
            Ok(_) => ParsedShape {
                field_names: Vec::new(),
                record_count: 1,
                unparsed: false,
            },
            Err(_) => ParsedShape {
                field_names: Vec::new(),
                record_count: 0,
                unparsed: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_format_from_mime_then_extension() {
        assert_eq!(FileFormat::detect("text/csv", "data.bin"), FileFormat::Csv);
        assert_eq!(
            FileFormat::detect("application/json", "data.txt"),
            FileFormat::Json
        );
        assert_eq!(FileFormat::detect("", "export.CSV"), FileFormat::Csv);
        assert_eq!(FileFormat::detect("", "export.json"), FileFormat::Json);
        assert_eq!(
            FileFormat::detect("application/octet-stream", "blob.dat"),
            FileFormat::Generic
        );
    }

    #[test]
    fn csv_counts_records_excluding_header() {
        let content = "id,email,amount\n1,a@x.com,5\n\n2,b@x.com,7\n";
        let shape = ParsedShape::extract(FileFormat::Csv, content);
        assert_eq!(shape.field_names, vec!["id", "email", "amount"]);
        assert_eq!(shape.record_count, 2);
    }

    #[test]
    fn csv_empty_file_yields_empty_shape() {
        let shape = ParsedShape::extract(FileFormat::Csv, "");
        assert!(shape.field_names.is_empty());
        assert_eq!(shape.record_count, 0);
    }

    #[test]
    fn csv_header_only_has_zero_records() {
        let shape = ParsedShape::extract(FileFormat::Csv, "a, b ,c\n");
        assert_eq!(shape.field_names, vec!["a", "b", "c"]);
        assert_eq!(shape.record_count, 0);
    }

    #[test]
    fn json_array_uses_first_element_keys() {
        let content = r#"[{"lat":1,"lng":2,"city":"x"},{"lat":3,"lng":4,"city":"y"}]"#;
        let shape = ParsedShape::extract(FileFormat::Json, content);
        assert_eq!(shape.record_count, 2);
        assert_eq!(shape.field_names.len(), 3);
    }

    #[test]
    fn json_single_object_counts_one_record() {
        let shape = ParsedShape::extract(FileFormat::Json, r#"{"name":"a","age":3}"#);
        assert_eq!(shape.record_count, 1);
        assert_eq!(shape.field_names.len(), 2);
    }

    #[test]
    fn json_empty_array_is_empty_shape() {
        let shape = ParsedShape::extract(FileFormat::Json, "[]");
        assert_eq!(shape.record_count, 0);
        assert!(shape.field_names.is_empty());
    }

    #[test]
    fn malformed_json_degrades_without_error() {
        let shape = ParsedShape::extract(FileFormat::Json, "{not valid");
        assert!(shape.unparsed);
        assert_eq!(shape.record_count, 0);
        assert!(shape.field_names.is_empty());
    }
}
