//! Investment metric derivation - ARV, flip profit, rental cash flow
//!
//! Pure functions of (property, baseline, config). Money is f64 dollars
//! throughout; every result field is rounded to 2 decimals.

use crate::config::ScoringConfig;
use crate::scoring::types::{InvestmentMetricsResult, MarketBaselineSnapshot, PropertyRecord};
use crate::scoring::util::{matched_keywords, monthly_mortgage_payment, round2};
use tracing::warn;

/// Share of after-repair value that caps a flip purchase (the 70% rule)
const FLIP_ARV_RATIO: f64 = 0.70;
/// Monthly rent as a share of market value (the 1% rule)
const RENT_RATIO: f64 = 0.01;
/// Annual taxes estimated as a share of list price when not supplied
const TAX_EST_RATIO: f64 = 0.012;
/// Annual insurance as a share of list price
const INSURANCE_RATIO: f64 = 0.004;
/// Maintenance reserve as a share of annual rental income
const MAINTENANCE_RATIO: f64 = 0.10;
/// Vacancy reserve as a share of annual rental income
const VACANCY_RATIO: f64 = 0.08;

/// Derive financial metrics for a single property against its market
/// baseline.
///
/// A non-positive price or living area returns the all-zero degraded
/// result - logged, never raised, so one bad record cannot abort a batch.
pub fn derive_metrics(
    property: &PropertyRecord,
    baseline: &MarketBaselineSnapshot,
    config: &ScoringConfig,
) -> InvestmentMetricsResult {
    if !property.has_scorable_financials() {
        warn!(
            "Cannot derive metrics for {} - price {} / area {} not positive",
            property.address, property.list_price, property.living_area_sqft
        );
        return InvestmentMetricsResult::default();
    }

    let price = property.list_price;
    let sqft = property.living_area_sqft;

    let market_value = baseline.median_price_per_sqft * sqft;
    let rehab = price * rehab_pct(&property.description, config);
    // 70% rule: max flip purchase is 70% of ARV minus rehab cost
    let profit = (market_value * FLIP_ARV_RATIO - rehab) - price;

    // 1% rule rental model
    let monthly_rent = market_value * RENT_RATIO;
    let rental_income = monthly_rent * 12.0;

    let taxes = property.annual_taxes.unwrap_or(price * TAX_EST_RATIO);
    let hoa = property.hoa_monthly.unwrap_or(0.0) * 12.0;
    let insurance = price * INSURANCE_RATIO;
    let maintenance = rental_income * MAINTENANCE_RATIO;
    let vacancy = rental_income * VACANCY_RATIO;
    let expenses = taxes + hoa + insurance + maintenance + vacancy;
    // NOI floors at zero; the deal's downside shows up in the return
    // percentages, not as negative income
    let noi = (rental_income - expenses).max(0.0);

    let cap_rate = noi / price * 100.0;

    let down_payment = price * config.financing.down_payment_pct;
    let loan = price - down_payment;
    let annual_mortgage = monthly_mortgage_payment(
        loan,
        config.financing.annual_interest_rate,
        config.financing.term_years,
    ) * 12.0;
    let cash_on_cash = (noi - annual_mortgage) / down_payment * 100.0;

    let grm = if rental_income > 0.0 {
        price / rental_income
    } else {
        0.0
    };

    InvestmentMetricsResult {
        estimated_market_value: round2(market_value),
        estimated_profit: round2(profit),
        rehab_estimate: round2(rehab),
        cap_rate: round2(cap_rate),
        cash_on_cash_return: round2(cash_on_cash),
        gross_rent_multiplier: round2(grm),
        estimated_monthly_rent: round2(monthly_rent),
        annual_rental_income: round2(rental_income),
        annual_expenses: round2(expenses),
        annual_noi: round2(noi),
        price_per_sqft: round2(price / sqft),
        market_price_per_sqft: round2(baseline.median_price_per_sqft),
    }
}

/// Rehab estimate tier from a keyword scan of the listing description:
/// heavy keywords -> 20%, moderate -> 10%, otherwise 5% of list price.
fn rehab_pct(description: &str, config: &ScoringConfig) -> f64 {
    if !matched_keywords(description, &config.rehab.heavy_keywords).is_empty() {
        config.rehab.heavy_pct
    } else if !matched_keywords(description, &config.rehab.moderate_keywords).is_empty() {
        config.rehab.moderate_pct
    } else {
        config.rehab.default_pct
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::types::MarketTrend;

    fn baseline(median: f64) -> MarketBaselineSnapshot {
        MarketBaselineSnapshot {
            avg_price_per_sqft: median,
            median_price_per_sqft: median,
            avg_days_on_market: 30.0,
            peer_count: 5,
            trend: MarketTrend::Stable,
        }
    }

    fn property(price: f64, sqft: f64, description: &str) -> PropertyRecord {
        PropertyRecord {
            address: "1 Test St".to_string(),
            list_price: price,
            living_area_sqft: sqft,
            description: description.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_degraded_zero_price() {
        let config = ScoringConfig::default();
        let result = derive_metrics(&property(0.0, 2000.0, ""), &baseline(250.0), &config);
        assert_eq!(result, InvestmentMetricsResult::default());
    }

    #[test]
    fn test_degraded_zero_area() {
        let config = ScoringConfig::default();
        let result = derive_metrics(&property(400_000.0, 0.0, ""), &baseline(250.0), &config);
        assert_eq!(result, InvestmentMetricsResult::default());
        assert_eq!(result.estimated_market_value, 0.0);
        assert_eq!(result.cap_rate, 0.0);
    }

    #[test]
    fn test_market_value_and_profit() {
        let config = ScoringConfig::default();
        let result = derive_metrics(
            &property(400_000.0, 2000.0, "charming home"),
            &baseline(260.0),
            &config,
        );

        assert_eq!(result.estimated_market_value, 520_000.0);
        // Default rehab tier: 5% of $400k = $20k
        assert_eq!(result.rehab_estimate, 20_000.0);
        // 520k * 0.7 - 20k - 400k = -56k
        assert_eq!(result.estimated_profit, -56_000.0);
        assert_eq!(result.price_per_sqft, 200.0);
        assert_eq!(result.market_price_per_sqft, 260.0);
    }

    #[test]
    fn test_rehab_tiers() {
        let config = ScoringConfig::default();
        let base = baseline(250.0);

        let heavy = derive_metrics(
            &property(300_000.0, 1500.0, "Investor special, needs work throughout"),
            &base,
            &config,
        );
        assert_eq!(heavy.rehab_estimate, 60_000.0); // 20%

        let moderate = derive_metrics(
            &property(300_000.0, 1500.0, "Sold as-is, great potential"),
            &base,
            &config,
        );
        assert_eq!(moderate.rehab_estimate, 30_000.0); // 10%

        let light = derive_metrics(
            &property(300_000.0, 1500.0, "Move-in ready"),
            &base,
            &config,
        );
        assert_eq!(light.rehab_estimate, 15_000.0); // 5%
    }

    #[test]
    fn test_rental_model() {
        let config = ScoringConfig::default();
        let result = derive_metrics(&property(400_000.0, 2000.0, ""), &baseline(260.0), &config);

        // 1% rule on $520k market value
        assert_eq!(result.estimated_monthly_rent, 5200.0);
        assert_eq!(result.annual_rental_income, 62_400.0);

        // taxes 1.2% of 400k = 4800, insurance 0.4% = 1600,
        // maintenance 10% of 62400 = 6240, vacancy 8% = 4992
        assert_eq!(result.annual_expenses, 17_632.0);
        assert_eq!(result.annual_noi, 44_768.0);
        // 44768 / 400000 * 100 = 11.19%
        assert!((result.cap_rate - 11.19).abs() < 0.01);
    }

    #[test]
    fn test_supplied_taxes_and_hoa_used() {
        let config = ScoringConfig::default();
        let mut prop = property(400_000.0, 2000.0, "");
        prop.annual_taxes = Some(6000.0);
        prop.hoa_monthly = Some(250.0);

        let result = derive_metrics(&prop, &baseline(260.0), &config);

        // 6000 + 3000 (hoa) + 1600 + 6240 + 4992 = 21832
        assert_eq!(result.annual_expenses, 21_832.0);
    }

    #[test]
    fn test_cash_on_cash_sign() {
        let config = ScoringConfig::default();
        // Strong rental: cheap price against a high market median
        let good = derive_metrics(&property(200_000.0, 2000.0, ""), &baseline(260.0), &config);
        assert!(good.cash_on_cash_return > 0.0);

        // Weak rental: expensive against a low median
        let bad = derive_metrics(&property(900_000.0, 2000.0, ""), &baseline(200.0), &config);
        assert!(bad.cash_on_cash_return < 0.0);
    }

    #[test]
    fn test_noi_never_negative() {
        let config = ScoringConfig::default();
        let mut prop = property(900_000.0, 1000.0, "");
        prop.annual_taxes = Some(50_000.0);

        let result = derive_metrics(&prop, &baseline(100.0), &config);
        assert_eq!(result.annual_noi, 0.0);
        assert_eq!(result.cap_rate, 0.0);
    }

    #[test]
    fn test_grm() {
        let config = ScoringConfig::default();
        let result = derive_metrics(&property(400_000.0, 2000.0, ""), &baseline(260.0), &config);
        // 400000 / 62400 = 6.41
        assert!((result.gross_rent_multiplier - 6.41).abs() < 0.01);
    }
}
