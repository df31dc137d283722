//! Buyer matching - rank buyer profiles against a property
//!
//! Weighted, reason-annotated scoring: budget 40 / location 30 /
//! property type 20 / bedrooms 10, clamped to 0-100. Preference matching
//! is flat substring comparison on city/postal/type strings - no
//! geocoding, by design.

use crate::scoring::types::{BuyerMatch, BuyerProfile, PropertyRecord};
use crate::scoring::util::format_amount;
use tracing::debug;

/// How many ranked matches are returned
const TOP_N: usize = 5;
/// Prices up to this factor over budget still earn partial credit
const BUDGET_STRETCH: f64 = 1.10;

const BUDGET_POINTS: f64 = 40.0;
const LOCATION_POINTS: f64 = 30.0;
const TYPE_POINTS: f64 = 20.0;
const BEDROOM_POINTS: f64 = 10.0;

/// Score every buyer against the property, drop those under `min_score`,
/// and return the top 5 by score. Ties keep the original input order
/// (the sort is stable), so upstream priority ordering survives.
pub fn match_buyers(
    property: &PropertyRecord,
    buyers: &[BuyerProfile],
    min_score: u8,
) -> Vec<BuyerMatch> {
    let mut matches: Vec<BuyerMatch> = buyers
        .iter()
        .filter_map(|buyer| {
            let m = score_buyer(property, buyer);
            if m.score >= min_score {
                Some(m)
            } else {
                debug!(
                    "Buyer {} scored {} (< {}), excluded",
                    buyer.name, m.score, min_score
                );
                None
            }
        })
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches.truncate(TOP_N);
    matches
}

/// One buyer against one property: sum the four components, clamp to 0-100
fn score_buyer(property: &PropertyRecord, buyer: &BuyerProfile) -> BuyerMatch {
    let mut score = 0.0;
    let mut reasons = Vec::new();

    let (budget, budget_reason) = budget_component(property.list_price, buyer);
    score += budget;
    if let Some(reason) = budget_reason {
        reasons.push(reason);
    }

    let (location, location_reason) = preference_component(
        &buyer.location_preference,
        &[&property.city, &property.postal_code],
        LOCATION_POINTS,
        "location",
    );
    score += location;
    if let Some(reason) = location_reason {
        reasons.push(reason);
    }

    let (ptype, type_reason) = preference_component(
        &buyer.property_type_preference,
        &[&property.property_type],
        TYPE_POINTS,
        "property type",
    );
    score += ptype;
    if let Some(reason) = type_reason {
        reasons.push(reason);
    }

    match buyer.min_bedrooms {
        Some(min) if property.bedrooms >= min => {
            score += BEDROOM_POINTS;
            reasons.push(format!(
                "{} bedrooms meets minimum of {}",
                property.bedrooms, min
            ));
        }
        Some(_) => {}
        // No stated minimum: neutral half credit
        None => score += BEDROOM_POINTS / 2.0,
    }

    BuyerMatch {
        buyer: buyer.clone(),
        score: score.clamp(0.0, 100.0).round() as u8,
        reasons,
    }
}

/// Budget fit: in range 40, under budget 30, within a 10% stretch 20,
/// otherwise 0. The in-range reason names the price and both bounds.
fn budget_component(price: f64, buyer: &BuyerProfile) -> (f64, Option<String>) {
    if price <= 0.0 {
        return (0.0, None);
    }

    let min = buyer.budget_min;
    match buyer.budget_max {
        Some(max) if price >= min && price <= max => (
            BUDGET_POINTS,
            Some(format!(
                "Price ${} within budget ${} - ${}",
                format_amount(price),
                format_amount(min),
                format_amount(max)
            )),
        ),
        None if price >= min => (
            BUDGET_POINTS,
            Some(format!(
                "Price ${} within open-ended budget from ${}",
                format_amount(price),
                format_amount(min)
            )),
        ),
        _ if price < min => (
            30.0,
            Some(format!(
                "Price ${} below budget minimum ${} - room to negotiate up",
                format_amount(price),
                format_amount(min)
            )),
        ),
        Some(max) if price <= max * BUDGET_STRETCH => (
            20.0,
            Some(format!(
                "Price ${} slightly above budget ceiling ${}",
                format_amount(price),
                format_amount(max)
            )),
        ),
        _ => (0.0, None),
    }
}

/// Comma-separated preference list against candidate fields: full points
/// on any substring hit, half points when the buyer stated no preference,
/// zero on a stated-but-missed preference.
fn preference_component(
    preference: &str,
    candidates: &[&str],
    points: f64,
    label: &str,
) -> (f64, Option<String>) {
    let tokens: Vec<&str> = preference
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();

    if tokens.is_empty() {
        // No stated preference: neutral half credit, no reason line
        return (points / 2.0, None);
    }

    let lowered: Vec<String> = candidates.iter().map(|c| c.to_lowercase()).collect();
    let hits: Vec<&str> = tokens
        .iter()
        .copied()
        .filter(|t| {
            let t = t.to_lowercase();
            lowered.iter().any(|c| c.contains(&t))
        })
        .collect();

    if hits.is_empty() {
        (0.0, None)
    } else {
        (
            points,
            Some(format!("Matches preferred {}: {}", label, hits.join(", "))),
        )
    }
}
