//! Category, data-type, and sensitivity classification over field names and
//! raw content. All functions are pure and never fail.

use crate::keywords::{CATEGORY_KEYWORDS, DATA_TYPE_RULES, SENSITIVE_KEYWORDS};

/// Subject-matter categories matched by the keyword table.
///
/// A category matches when any of its keywords appears as a substring of any
/// field name or of the whole content (case-insensitive). Falls back to
/// `general` when nothing matches.
pub fn categories(field_names: &[String], content: &str) -> Vec<String> {
    let content_lower = content.to_lowercase();
    let fields_lower: Vec<String> = field_names.iter().map(|f| f.to_lowercase()).collect();

    let mut matched: Vec<String> = CATEGORY_KEYWORDS
        .iter()
        .filter(|(_, keywords)| {
            keywords.iter().any(|kw| {
                fields_lower.iter().any(|f| f.contains(kw)) || content_lower.contains(kw)
            })
        })
        .map(|(category, _)| category.to_string())
        .collect();

    if matched.is_empty() {
        matched.push("general".to_string());
    }
    matched
}

/// Data-type tags inferred from field names alone. Falls back to `mixed`.
pub fn data_types(field_names: &[String]) -> Vec<String> {
    let fields_lower: Vec<String> = field_names.iter().map(|f| f.to_lowercase()).collect();

    let mut matched: Vec<String> = DATA_TYPE_RULES
        .iter()
        .filter(|(_, fragments)| {
            fragments
                .iter()
                .any(|frag| fields_lower.iter().any(|f| f.contains(frag)))
        })
        .map(|(tag, _)| tag.to_string())
        .collect();

    if matched.is_empty() {
        matched.push("mixed".to_string());
    }
    matched
}

/// Sensitivity score in [1, 5].
///
/// Starts at 1 and gains 0.5 for each sensitive keyword found in a field name
/// or in the content, rounded half-away-from-zero then clamped. Monotone in
/// the number of keyword hits and saturating at 5.
pub fn sensitivity_score(field_names: &[String], content: &str) -> u8 {
    let content_lower = content.to_lowercase();
    let fields_lower: Vec<String> = field_names.iter().map(|f| f.to_lowercase()).collect();

    let hits = SENSITIVE_KEYWORDS
        .iter()
        .filter(|kw| fields_lower.iter().any(|f| f.contains(*kw)) || content_lower.contains(*kw))
        .count();

    let score = (1.0 + hits as f64 * 0.5).round();
    score.clamp(1.0, 5.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn amount_field_is_financial() {
        let cats = categories(&fields(&["id", "email", "amount"]), "");
        assert!(cats.contains(&"financial".to_string()));
    }

    #[test]
    fn lat_lng_fields_are_location() {
        let cats = categories(&fields(&["lat", "lng", "city"]), "");
        assert!(cats.contains(&"location".to_string()));
    }

    #[test]
    fn content_match_alone_is_enough() {
        let cats = categories(&[], "patient visited the clinic for a blood test");
        assert!(cats.contains(&"health".to_string()));
    }

    #[test]
    fn no_match_defaults_to_general() {
        assert_eq!(categories(&[], ""), vec!["general"]);
    }

    #[test]
    fn multiple_categories_accumulate() {
        let cats = categories(&fields(&["price", "address"]), "");
        assert!(cats.contains(&"financial".to_string()));
        assert!(cats.contains(&"location".to_string()));
    }

    #[test]
    fn data_types_union_over_fields() {
        let types = data_types(&fields(&["order_id", "created_at", "amount", "email"]));
        assert!(types.contains(&"identifier".to_string()));
        assert!(types.contains(&"temporal".to_string()));
        assert!(types.contains(&"numerical".to_string()));
        assert!(types.contains(&"contact".to_string()));
    }

    #[test]
    fn one_field_can_contribute_multiple_tags() {
        let types = data_types(&fields(&["price_id"]));
        assert!(types.contains(&"identifier".to_string()));
        assert!(types.contains(&"numerical".to_string()));
    }

    #[test]
    fn data_types_default_to_mixed() {
        assert_eq!(data_types(&[]), vec!["mixed"]);
        assert_eq!(data_types(&fields(&["foo", "bar"])), vec!["mixed"]);
    }

    #[test]
    fn sensitivity_floor_is_one() {
        assert_eq!(sensitivity_score(&[], ""), 1);
    }

    #[test]
    fn email_field_scores_at_least_two() {
        // one hit: 1 + 0.5 rounds up to 2
        assert_eq!(sensitivity_score(&fields(&["id", "email", "amount"]), ""), 2);
    }

    #[test]
    fn sensitivity_saturates_at_five() {
        let content = "email phone address ssn credit password personal private \
                       medical health financial bank account passport license";
        assert_eq!(sensitivity_score(&[], content), 5);
    }

    #[test]
    fn sensitivity_is_monotone_in_keyword_hits() {
        let mut previous = 0;
        let mut content = String::new();
        for kw in crate::keywords::SENSITIVE_KEYWORDS {
            content.push_str(kw);
            content.push(' ');
            let score = sensitivity_score(&[], &content);
            assert!(score >= previous);
            assert!((1..=5).contains(&score));
            previous = score;
        }
    }
}
