//! Suggested-price calculation: additive size and record-count tiers over a
//! base price, capped at a maximum.

const BASE_PRICE: f64 = 0.001;
const MAX_PRICE: f64 = 0.05;

const MB: u64 = 1024 * 1024;

/// Suggested price for a dataset, as a string with four fractional digits.
///
/// Tiers stack: a 120MB file earns all three size increments. The result is
/// monotone in both inputs and always in (0, 0.05].
pub fn suggested_price(size_bytes: u64, record_count: u64) -> String {
    let mut price = BASE_PRICE;

    if size_bytes > 10 * MB {
        price += 0.002;
    }
    if size_bytes > 50 * MB {
        price += 0.005;
    }
    if size_bytes > 100 * MB {
        price += 0.01;
    }

    if record_count > 1_000 {
        price += 0.001;
    }
    if record_count > 10_000 {
        price += 0.003;
    }
    if record_count > 100_000 {
        price += 0.007;
    }

    format!("{:.4}", price.min(MAX_PRICE))
}

/// Coerce an externally supplied price string back into the valid range.
/// Unparsable or out-of-range values fall back to the base price or the cap.
pub fn normalize_price(raw: &str) -> String {
    match raw.trim().parse::<f64>() {
        Ok(p) if p > 0.0 => format!("{:.4}", p.min(MAX_PRICE)),
        _ => format!("{:.4}", BASE_PRICE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_price_for_small_empty_file() {
        assert_eq!(suggested_price(0, 0), "0.0010");
        assert_eq!(suggested_price(5 * 1024, 100), "0.0010");
    }

    #[test]
    fn size_tiers_stack() {
        assert_eq!(suggested_price(11 * MB, 0), "0.0030");
        assert_eq!(suggested_price(51 * MB, 0), "0.0080");
        assert_eq!(suggested_price(120 * MB, 0), "0.0180");
    }

    #[test]
    fn record_tiers_stack() {
        assert_eq!(suggested_price(0, 1_001), "0.0020");
        assert_eq!(suggested_price(0, 10_001), "0.0050");
        assert_eq!(suggested_price(0, 150_000), "0.0120");
    }

    #[test]
    fn combined_tiers_sum() {
        // 120MB + 150k records: 0.001 + 0.017 + 0.011 = 0.029, under the cap
        assert_eq!(suggested_price(120 * MB, 150_000), "0.0290");
    }

    #[test]
    fn price_never_exceeds_cap() {
        for size in [0, 10 * MB, 120 * MB, u64::MAX / 2] {
            for records in [0, 1_000, 200_000, u64::MAX / 2] {
                let price: f64 = suggested_price(size, records).parse().unwrap();
                assert!(price > 0.0 && price <= 0.05);
            }
        }
    }

    #[test]
    fn price_is_monotone_in_each_input() {
        let sizes = [0u64, 10 * MB, 11 * MB, 50 * MB, 51 * MB, 100 * MB, 101 * MB];
        let records = [0u64, 1_000, 1_001, 10_000, 10_001, 100_000, 100_001];
        for window in sizes.windows(2) {
            let a: f64 = suggested_price(window[0], 500).parse().unwrap();
            let b: f64 = suggested_price(window[1], 500).parse().unwrap();
            assert!(b >= a);
        }
        for window in records.windows(2) {
            let a: f64 = suggested_price(MB, window[0]).parse().unwrap();
            let b: f64 = suggested_price(MB, window[1]).parse().unwrap();
            assert!(b >= a);
        }
    }

    #[test]
    fn normalize_price_clamps_and_defaults() {
        assert_eq!(normalize_price("0.003"), "0.0030");
        assert_eq!(normalize_price("0.2"), "0.0500");
        assert_eq!(normalize_price("-1"), "0.0010");
        assert_eq!(normalize_price("not a number"), "0.0010");
    }
}
