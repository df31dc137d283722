//! Distress detection - motivated-seller indicators from text and numbers
//!
//! Produces human-readable signal strings for the CRM side. Simple
//! substring matching by design; semantic matching would silently change
//! the scoring behavior downstream.

use crate::config::ScoringConfig;
use crate::scoring::types::PropertyRecord;
use crate::scoring::util::{format_amount, matched_keywords};

/// Days on market past which a seller is called highly motivated
const DOM_HIGH: u32 = 90;
/// Days on market past which a seller is called motivated
const DOM_MODERATE: u32 = 60;
/// List price below this fraction of tax assessment is a signal
const TAX_GAP_RATIO: f64 = 0.85;
/// At most this many matched keywords are echoed in the signal text
const MAX_KEYWORDS_SHOWN: usize = 3;

/// Scan a property for motivated-seller signals. Returns an ordered list
/// of human-readable strings, empty when nothing is found. Never fails.
pub fn detect_signals(property: &PropertyRecord, config: &ScoringConfig) -> Vec<String> {
    let mut signals = Vec::new();

    if let Some(cut) = property.price_reduction {
        if cut >= config.large_price_cut {
            signals.push(format!("Price reduced by ${}", format_amount(cut)));
        }
    }

    // Higher threshold wins; the two bands are mutually exclusive
    if property.days_on_market > DOM_HIGH {
        signals.push(format!(
            "{} days on market - highly motivated seller",
            property.days_on_market
        ));
    } else if property.days_on_market >= DOM_MODERATE {
        signals.push(format!(
            "{} days on market - motivated seller",
            property.days_on_market
        ));
    }

    let matched = matched_keywords(&property.description, &config.distress_keywords);
    if !matched.is_empty() {
        let shown: Vec<&str> = matched.into_iter().take(MAX_KEYWORDS_SHOWN).collect();
        signals.push(format!("Listing mentions: {}", shown.join(", ")));
    }

    if let Some(assessed) = property.tax_assessed_value {
        if assessed > 0.0 && property.list_price > 0.0 {
            let ratio = property.list_price / assessed;
            if ratio < TAX_GAP_RATIO {
                signals.push(format!(
                    "Priced {:.1}% below tax assessment",
                    (1.0 - ratio) * 100.0
                ));
            }
        }
    }

    signals
}
