//! Scoring configuration
//!
//! One immutable, read-only object shared across concurrent scoring calls.
//! Defaults match the documented scoring constants; any divergence is an
//! explicit caller override. Validation runs once at scorer construction,
//! never during a scoring call.

use crate::error::ConfigError;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ScoreWeights,
    pub financing: FinancingAssumptions,
    pub rehab: RehabTiers,
    /// Keywords indicating a motivated seller (substring match, lowercase)
    pub distress_keywords: Vec<String>,
    /// Dollar price cut that counts as a distress signal on its own
    pub large_price_cut: f64,
}

/// Weights for recombining the five normalized sub-scores into the final
/// 0-100 total. They default to the sub-score maxima (30/20/25/15/10) but
/// are independently configurable and need not sum to 100 - each sub-score
/// is normalized to its own max before weighting.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub price_advantage: f64,
    pub days_on_market: f64,
    pub financial_returns: f64,
    pub condition_price: f64,
    pub location_quality: f64,
}

/// Mortgage assumptions for the cash-on-cash model
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FinancingAssumptions {
    pub down_payment_pct: f64,
    pub annual_interest_rate: f64,
    pub term_years: u32,
}

/// Rehab estimate as a fraction of list price, tiered by description
/// keywords. Heavy beats moderate when both match.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RehabTiers {
    pub heavy_keywords: Vec<String>,
    pub heavy_pct: f64,
    pub moderate_keywords: Vec<String>,
    pub moderate_pct: f64,
    pub default_pct: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            price_advantage: 30.0,
            days_on_market: 20.0,
            financial_returns: 25.0,
            condition_price: 15.0,
            location_quality: 10.0,
        }
    }
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.price_advantage
            + self.days_on_market
            + self.financial_returns
            + self.condition_price
            + self.location_quality
    }
}

impl Default for FinancingAssumptions {
    fn default() -> Self {
        Self {
            down_payment_pct: 0.20,
            annual_interest_rate: 0.07,
            term_years: 30,
        }
    }
}

impl Default for RehabTiers {
    fn default() -> Self {
        Self {
            heavy_keywords: to_strings(&[
                "fixer upper",
                "gut rehab",
                "needs work",
                "investor special",
                "major repairs",
            ]),
            heavy_pct: 0.20,
            moderate_keywords: to_strings(&[
                "tlc",
                "as-is",
                "cosmetic updates",
                "potential",
                "handyman",
            ]),
            moderate_pct: 0.10,
            default_pct: 0.05,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            financing: FinancingAssumptions::default(),
            rehab: RehabTiers::default(),
            distress_keywords: to_strings(&[
                "motivated",
                "as-is",
                "fixer",
                "needs work",
                "estate sale",
                "must sell",
                "tlc",
                "handyman",
                "cash only",
            ]),
            large_price_cut: 10_000.0,
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl ScoringConfig {
    /// Parse a config from JSON, applying defaults for absent sections
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ScoringConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the scoring math relies on.
    /// Called once by `OpportunityScorer::new`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = [
            ("price_advantage", self.weights.price_advantage),
            ("days_on_market", self.weights.days_on_market),
            ("financial_returns", self.weights.financial_returns),
            ("condition_price", self.weights.condition_price),
            ("location_quality", self.weights.location_quality),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        let sum = self.weights.sum();
        if sum <= 0.0 {
            return Err(ConfigError::ZeroWeights(sum));
        }

        for (name, list) in [
            ("distress_keywords", &self.distress_keywords),
            ("rehab.heavy_keywords", &self.rehab.heavy_keywords),
            ("rehab.moderate_keywords", &self.rehab.moderate_keywords),
        ] {
            if list.iter().any(|k| k.trim().is_empty()) {
                return Err(ConfigError::EmptyKeyword(name));
            }
        }

        for (name, value) in [
            ("heavy_pct", self.rehab.heavy_pct),
            ("moderate_pct", self.rehab.moderate_pct),
            ("default_pct", self.rehab.default_pct),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidRehabPct { name, value });
            }
        }

        let down = self.financing.down_payment_pct;
        if !down.is_finite() || down <= 0.0 || down > 1.0 {
            return Err(ConfigError::InvalidFinancing {
                name: "down_payment_pct",
                value: down,
            });
        }
        let rate = self.financing.annual_interest_rate;
        if !rate.is_finite() || rate < 0.0 {
            return Err(ConfigError::InvalidFinancing {
                name: "annual_interest_rate",
                value: rate,
            });
        }
        if self.financing.term_years == 0 {
            return Err(ConfigError::InvalidFinancing {
                name: "term_years",
                value: 0.0,
            });
        }
        if !self.large_price_cut.is_finite() || self.large_price_cut < 0.0 {
            return Err(ConfigError::InvalidFinancing {
                name: "large_price_cut",
                value: self.large_price_cut,
            });
        }

        Ok(())
    }
}
