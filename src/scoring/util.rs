//! Small shared helpers for the scoring pipeline

/// Round to 2 decimal places (all monetary/percentage results use this)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a dollar amount with thousands separators, no cents.
/// Used in match reasons and distress signals: 650000.0 -> "650,000".
pub fn format_amount(value: f64) -> String {
    let whole = value.round().abs() as i64;
    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0.0 {
        format!("-{}", out)
    } else {
        out
    }
}

/// Keywords from `keywords` found in `text` (case-insensitive substring
/// match - deliberately not NLP), in keyword-list order.
pub fn matched_keywords<'a>(text: &str, keywords: &'a [String]) -> Vec<&'a str> {
    let lower = text.to_lowercase();
    keywords
        .iter()
        .filter(|k| !k.is_empty() && lower.contains(k.to_lowercase().as_str()))
        .map(|k| k.as_str())
        .collect()
}

/// Standard amortization formula: fixed monthly payment for a loan of
/// `principal` at `annual_rate` over `term_years`.
pub fn monthly_mortgage_payment(principal: f64, annual_rate: f64, term_years: u32) -> f64 {
    if principal <= 0.0 || term_years == 0 {
        return 0.0;
    }
    let n = (term_years * 12) as i32;
    if annual_rate <= 0.0 {
        return principal / f64::from(n);
    }
    let r = annual_rate / 12.0;
    let factor = (1.0 + r).powi(n);
    principal * (r * factor) / (factor - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(11.191), 11.19);
        assert_eq!(round2(-56_000.004), -56_000.0);
        assert_eq!(round2(250.0), 250.0);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(650_000.0), "650,000");
        assert_eq!(format_amount(1_250_000.0), "1,250,000");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(-15_000.0), "-15,000");
    }

    #[test]
    fn test_matched_keywords() {
        let keywords: Vec<String> = ["motivated", "as-is", "fixer"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let found = matched_keywords("Motivated seller! Sold AS-IS.", &keywords);
        assert_eq!(found, vec!["motivated", "as-is"]);

        assert!(matched_keywords("freshly renovated", &keywords).is_empty());
    }

    #[test]
    fn test_monthly_mortgage_payment() {
        // $320,000 at 7% over 30 years ~= $2,129.21/month
        let payment = monthly_mortgage_payment(320_000.0, 0.07, 30);
        assert!((payment - 2129.21).abs() < 0.5, "payment was {}", payment);
    }

    #[test]
    fn test_mortgage_zero_rate() {
        let payment = monthly_mortgage_payment(360_000.0, 0.0, 30);
        assert!((payment - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mortgage_degenerate_inputs() {
        assert_eq!(monthly_mortgage_payment(0.0, 0.07, 30), 0.0);
        assert_eq!(monthly_mortgage_payment(100_000.0, 0.07, 0), 0.0);
    }
}
