//! Opportunity scoring - weighted 0-100 score and deal quality label
//!
//! `score` is a deterministic, pure function of its inputs: no I/O, no
//! clock, no shared mutable state. One scorer can serve any number of
//! concurrent callers because its config is read-only after construction.

use crate::config::ScoringConfig;
use crate::error::ConfigError;
use crate::scoring::baseline::compute_baseline;
use crate::scoring::distress::detect_signals;
use crate::scoring::metrics::derive_metrics;
use crate::scoring::types::{
    DealQuality, InvestmentMetricsResult, MarketBaselineSnapshot, PropertyRecord, ScoreBreakdown,
    ScoredProperty, ScoringStatus,
};
use crate::scoring::util::matched_keywords;
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Maximum raw value of each sub-score. The configured weights default to
/// these but may diverge; sub-scores are normalized to their own max
/// before weighting.
const PRICE_MAX: f64 = 30.0;
const DOM_MAX: f64 = 20.0;
const FINANCIAL_MAX: f64 = 25.0;
const CONDITION_MAX: f64 = 15.0;
const LOCATION_MAX: f64 = 10.0;

/// Neutral location score until a location-quality provider is injected
const NEUTRAL_LOCATION_SCORE: f64 = 5.0;

/// Classification bands, inclusive at the lower bound
const HOT_MIN: u8 = 90;
const GOOD_MIN: u8 = 75;
const FAIR_MIN: u8 = 60;

/// Pluggable location-quality signal, 0-10.
/// The default returns the neutral 5; swap in a real provider via
/// [`OpportunityScorer::with_location_score`] without touching the core
/// math. Results outside 0-10 are clamped.
pub type LocationScoreFn = dyn Fn(&PropertyRecord) -> f64 + Send + Sync;

pub struct OpportunityScorer {
    config: ScoringConfig,
    location_score: Box<LocationScoreFn>,
}

impl OpportunityScorer {
    /// Build a scorer, validating the configuration up front.
    /// Malformed config fails here, never during a scoring call.
    pub fn new(config: ScoringConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            location_score: Box::new(|_| NEUTRAL_LOCATION_SCORE),
        })
    }

    /// Inject a location-quality provider (0-10 per property)
    pub fn with_location_score(
        mut self,
        f: impl Fn(&PropertyRecord) -> f64 + Send + Sync + 'static,
    ) -> Self {
        self.location_score = Box::new(f);
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score one property against its baseline and derived metrics.
    ///
    /// Anything that would poison the math (non-finite inputs, missing
    /// price/area) produces the safe degraded breakdown (0, PASS) with a
    /// warning - a single malformed record must not abort a batch.
    pub fn score(
        &self,
        property: &PropertyRecord,
        baseline: &MarketBaselineSnapshot,
        metrics: &InvestmentMetricsResult,
    ) -> ScoreBreakdown {
        if !property.has_scorable_financials() || !inputs_finite(baseline, metrics) {
            warn!(
                "Returning degraded score for {} - unscorable inputs",
                property.address
            );
            return ScoreBreakdown::degraded();
        }

        let (price_score, advantage_pct) = price_score(property, baseline);
        let dom_score = dom_score(property.days_on_market);
        let financial_score = financial_score(property, metrics);
        let condition_score = condition_score(property, &self.config);
        let location_score = (self.location_score)(property).clamp(0.0, LOCATION_MAX);

        let weights = &self.config.weights;
        let weighted = (price_score / PRICE_MAX) * weights.price_advantage
            + (dom_score / DOM_MAX) * weights.days_on_market
            + (financial_score / FINANCIAL_MAX) * weights.financial_returns
            + (condition_score / CONDITION_MAX) * weights.condition_price
            + (location_score / LOCATION_MAX) * weights.location_quality;

        let total_score = weighted.round().clamp(0.0, 100.0) as u8;
        let deal_quality = classify(total_score);

        debug!(
            "{}: price {} / dom {} / financial {} / condition {} / location {} -> {} ({})",
            property.address,
            price_score,
            dom_score,
            financial_score,
            condition_score,
            location_score,
            total_score,
            deal_quality
        );

        ScoreBreakdown {
            price_score,
            dom_score,
            financial_score,
            condition_score,
            location_score,
            price_advantage_pct: advantage_pct,
            total_score,
            deal_quality,
        }
    }

    /// Run the full pipeline over one property: baseline from the supplied
    /// peer set, investment metrics, distress signals, score, and
    /// recommendation text. `as_of` anchors the trend split.
    pub fn score_property(
        &self,
        property: &PropertyRecord,
        peers: &[PropertyRecord],
        as_of: NaiveDate,
    ) -> ScoredProperty {
        let baseline = compute_baseline(peers, as_of);
        let metrics = derive_metrics(property, &baseline, &self.config);
        let distress_signals = detect_signals(property, &self.config);
        let breakdown = self.score(property, &baseline, &metrics);

        let scoring_status = if property.has_scorable_financials() {
            ScoringStatus::Ok
        } else {
            ScoringStatus::InsufficientData
        };
        let recommendation = recommendation(scoring_status, &breakdown, &metrics);

        ScoredProperty {
            property: property.clone(),
            opportunity_score: breakdown.total_score,
            deal_quality: breakdown.deal_quality,
            below_market_percentage: breakdown.price_advantage_pct,
            estimated_market_value: metrics.estimated_market_value,
            estimated_profit: metrics.estimated_profit,
            investment_metrics: metrics,
            distress_signals,
            recommendation,
            score_breakdown: breakdown,
            scoring_status,
        }
    }
}

/// Map a total score to its quality band (inclusive lower bounds)
pub fn classify(total_score: u8) -> DealQuality {
    if total_score >= HOT_MIN {
        DealQuality::Hot
    } else if total_score >= GOOD_MIN {
        DealQuality::Good
    } else if total_score >= FAIR_MIN {
        DealQuality::Fair
    } else {
        DealQuality::Pass
    }
}

/// Percentage below the baseline median price-per-sqft, tiered to 0-30.
/// Also returns the signed raw advantage for reporting.
fn price_score(property: &PropertyRecord, baseline: &MarketBaselineSnapshot) -> (f64, f64) {
    let Some(ppsf) = property.effective_price_per_sqft() else {
        return (0.0, 0.0);
    };
    if baseline.median_price_per_sqft <= 0.0 {
        return (0.0, 0.0);
    }

    let advantage = (baseline.median_price_per_sqft - ppsf) / baseline.median_price_per_sqft * 100.0;
    let score = if advantage >= 20.0 {
        30.0
    } else if advantage >= 15.0 {
        25.0
    } else if advantage >= 10.0 {
        20.0
    } else if advantage >= 5.0 {
        10.0
    } else {
        0.0
    };
    (score, advantage)
}

/// Days-on-market tier, 0-20. Long-sitting listings mean leverage.
fn dom_score(days_on_market: u32) -> f64 {
    if days_on_market >= 90 {
        20.0
    } else if days_on_market >= 60 {
        15.0
    } else if days_on_market >= 30 {
        10.0
    } else {
        5.0
    }
}

/// Financial tier, 0-25: the better of the rental strategy (cap rate) and
/// the flip strategy (profit as % of price).
fn financial_score(property: &PropertyRecord, metrics: &InvestmentMetricsResult) -> f64 {
    let rental: f64 = if metrics.cap_rate >= 10.0 {
        25.0
    } else if metrics.cap_rate >= 8.0 {
        20.0
    } else if metrics.cap_rate >= 6.0 {
        15.0
    } else if metrics.cap_rate >= 4.0 {
        10.0
    } else {
        5.0
    };

    let profit_pct = metrics.estimated_profit / property.list_price * 100.0;
    let flip = if profit_pct >= 25.0 {
        25.0
    } else if profit_pct >= 20.0 {
        20.0
    } else if profit_pct >= 15.0 {
        15.0
    } else if profit_pct >= 10.0 {
        10.0
    } else {
        5.0
    };

    rental.max(flip)
}

/// Condition/pressure tier, 0-15: price-cut bonus plus distressed-keyword
/// density, capped.
fn condition_score(property: &PropertyRecord, config: &ScoringConfig) -> f64 {
    let mut score: f64 = 0.0;

    if let Some(cut) = property.price_reduction {
        if cut >= 20_000.0 {
            score += 5.0;
        } else if cut >= 10_000.0 {
            score += 3.0;
        }
    }

    let keyword_count = matched_keywords(&property.description, &config.distress_keywords).len();
    if keyword_count >= 3 {
        score += 10.0;
    } else if keyword_count >= 1 {
        score += 5.0;
    }

    score.min(CONDITION_MAX)
}

fn inputs_finite(baseline: &MarketBaselineSnapshot, metrics: &InvestmentMetricsResult) -> bool {
    baseline.median_price_per_sqft.is_finite()
        && metrics.cap_rate.is_finite()
        && metrics.estimated_profit.is_finite()
}

/// Short recommendation text for the CRM side
fn recommendation(
    status: ScoringStatus,
    breakdown: &ScoreBreakdown,
    metrics: &InvestmentMetricsResult,
) -> String {
    if status == ScoringStatus::InsufficientData {
        return "Insufficient listing data to evaluate - needs price and living area".to_string();
    }
    match breakdown.deal_quality {
        DealQuality::Hot => format!(
            "Exceptional opportunity: {:.1}% below market, {:.1}% cap rate - pursue immediately",
            breakdown.price_advantage_pct, metrics.cap_rate
        ),
        DealQuality::Good => format!(
            "Strong opportunity: {:.1}% below market - worth an offer",
            breakdown.price_advantage_pct
        ),
        DealQuality::Fair => {
            "Moderate opportunity - monitor for price reductions".to_string()
        }
        DealQuality::Pass => {
            "Does not meet opportunity criteria at the current price".to_string()
        }
    }
}
