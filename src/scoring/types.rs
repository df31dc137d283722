//! Core data types for the scoring pipeline
//! Pure data structures with no behavior

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single property listing as consumed by the scoring pipeline.
///
/// Numeric policy: every money field is an `f64` number of dollars, every
/// count a `u32`. Coercion from loosely-typed sources (currency strings,
/// numeric strings) happens only in `crate::ingest` - scoring code can
/// assume these fields are already plain numbers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyRecord {
    // Core identification
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub mls_id: Option<String>,

    // Property attributes
    pub property_type: String,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub living_area_sqft: f64,
    pub lot_size_sqft: Option<f64>,
    pub year_built: Option<i32>,

    // Listing data
    pub list_price: f64,
    pub price_per_sqft: Option<f64>,
    pub days_on_market: u32,
    pub description: String,
    pub listed_date: Option<NaiveDate>,
    pub price_reduction: Option<f64>,

    // Financial context
    pub tax_assessed_value: Option<f64>,
    pub hoa_monthly: Option<f64>,
    pub annual_taxes: Option<f64>,
}

impl PropertyRecord {
    /// Price per square foot, derived when the source did not provide it.
    /// `None` when price or area is non-positive.
    pub fn effective_price_per_sqft(&self) -> Option<f64> {
        if let Some(ppsf) = self.price_per_sqft {
            if ppsf > 0.0 {
                return Some(ppsf);
            }
        }
        if self.list_price > 0.0 && self.living_area_sqft > 0.0 {
            Some(self.list_price / self.living_area_sqft)
        } else {
            None
        }
    }

    /// Whether the record carries enough data for per-area and investment
    /// math. When false, the pipeline degrades to documented defaults.
    pub fn has_scorable_financials(&self) -> bool {
        self.list_price > 0.0
            && self.living_area_sqft > 0.0
            && self.list_price.is_finite()
            && self.living_area_sqft.is_finite()
    }
}

/// Market trend direction from the recent-vs-older peer comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketTrend {
    Rising,
    Falling,
    Stable,
}

impl std::fmt::Display for MarketTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarketTrend::Rising => write!(f, "RISING"),
            MarketTrend::Falling => write!(f, "FALLING"),
            MarketTrend::Stable => write!(f, "STABLE"),
        }
    }
}

/// Peer-group statistics computed fresh per scoring call.
/// Never persisted by this crate - storage is the caller's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketBaselineSnapshot {
    pub avg_price_per_sqft: f64,
    pub median_price_per_sqft: f64,
    pub avg_days_on_market: f64,
    pub peer_count: usize,
    pub trend: MarketTrend,
}

/// Deal quality classification bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DealQuality {
    Hot,
    Good,
    Fair,
    Pass,
}

impl std::fmt::Display for DealQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DealQuality::Hot => write!(f, "HOT"),
            DealQuality::Good => write!(f, "GOOD"),
            DealQuality::Fair => write!(f, "FAIR"),
            DealQuality::Pass => write!(f, "PASS"),
        }
    }
}

/// Distinguishes "could not score" from "scored and it's bad".
/// Downstream filters on `deal_quality == PASS` should exclude
/// `InsufficientData` records first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "INSUFFICIENT_DATA")]
    InsufficientData,
}

/// Financial metrics derived for a single property.
/// All monetary fields are non-negative except `estimated_profit`, which
/// goes negative when the deal is overpriced against the 70%-rule ceiling.
/// `Default` is the documented all-zero degraded result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvestmentMetricsResult {
    pub estimated_market_value: f64,
    pub estimated_profit: f64,
    pub rehab_estimate: f64,
    pub cap_rate: f64,
    pub cash_on_cash_return: f64,
    pub gross_rent_multiplier: f64,
    pub estimated_monthly_rent: f64,
    pub annual_rental_income: f64,
    pub annual_expenses: f64,
    pub annual_noi: f64,
    pub price_per_sqft: f64,
    pub market_price_per_sqft: f64,
}

/// Itemized sub-scores behind an opportunity score.
/// Each sub-score is independently bounded; the total is the weighted
/// recombination of the five, not their plain sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// 0-30, from percentage below the baseline median price-per-sqft
    pub price_score: f64,
    /// 0-20, from days on market
    pub dom_score: f64,
    /// 0-25, best of the rental (cap rate) and flip (profit %) strategies
    pub financial_score: f64,
    /// 0-15, price cuts plus distressed-keyword density
    pub condition_score: f64,
    /// 0-10, neutral 5 unless a location provider is injected
    pub location_score: f64,
    /// Signed raw advantage vs the baseline median, for reporting
    pub price_advantage_pct: f64,
    pub total_score: u8,
    pub deal_quality: DealQuality,
}

impl ScoreBreakdown {
    /// The safe degraded result: zero everything, PASS.
    pub fn degraded() -> Self {
        Self {
            price_score: 0.0,
            dom_score: 0.0,
            financial_score: 0.0,
            condition_score: 0.0,
            location_score: 0.0,
            price_advantage_pct: 0.0,
            total_score: 0,
            deal_quality: DealQuality::Pass,
        }
    }
}

/// A property after the full pipeline has run over it.
/// Field names and value ranges are the wire contract with downstream
/// CRM/notification consumers - do not rename.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredProperty {
    #[serde(flatten)]
    pub property: PropertyRecord,

    pub opportunity_score: u8,
    pub deal_quality: DealQuality,
    pub below_market_percentage: f64,
    pub estimated_market_value: f64,
    pub estimated_profit: f64,
    pub investment_metrics: InvestmentMetricsResult,
    pub distress_signals: Vec<String>,
    pub recommendation: String,
    pub score_breakdown: ScoreBreakdown,
    pub scoring_status: ScoringStatus,
}

/// A buyer's stated preferences, as supplied by the CRM collaborator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuyerProfile {
    pub name: String,
    pub budget_min: f64,
    /// `None` means unbounded
    pub budget_max: Option<f64>,
    /// Comma-separated locality substrings; empty means no preference
    pub location_preference: String,
    /// Comma-separated type substrings; empty means no preference
    pub property_type_preference: String,
    /// `None` means no stated minimum
    pub min_bedrooms: Option<u32>,
}

/// One buyer ranked against one property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyerMatch {
    pub buyer: BuyerProfile,
    pub score: u8,
    pub reasons: Vec<String>,
}
