//! Ingest boundary - coerce loose key-value records into typed inputs
//!
//! Upstream collaborators (scrapers, MLS feeds, CRM exports) hand over
//! records where money may arrive as `650000`, `"650000"` or `"$650,000"`
//! and counts as numbers or numeric strings. All of that defensive
//! coercion lives here and only here; scoring code downstream sees plain
//! numbers. Unparseable values degrade to documented defaults (0 / absent)
//! rather than failing the record - a record only fails when it has no
//! usable identity at all.

use crate::scoring::types::{BuyerProfile, PropertyRecord};
use anyhow::Result;
use chrono::NaiveDate;
use serde_json::Value;
use tracing::warn;

/// Build a `PropertyRecord` from a loose JSON object.
/// Fails only when the record carries no address.
pub fn property_from_value(value: &Value) -> Result<PropertyRecord> {
    let address = text(value, "address");
    if address.is_empty() {
        return Err(anyhow::anyhow!("property record has no address"));
    }

    Ok(PropertyRecord {
        address,
        city: text(value, "city"),
        state: text(value, "state"),
        postal_code: text(value, "postal_code"),
        mls_id: opt_text(value, "mls_id"),
        property_type: text(value, "property_type"),
        bedrooms: count(value, "bedrooms"),
        bathrooms: number(value, "bathrooms").max(0.0),
        living_area_sqft: number(value, "living_area_sqft").max(0.0),
        lot_size_sqft: opt_number(value, "lot_size_sqft"),
        year_built: opt_number(value, "year_built").map(|y| y as i32),
        list_price: money(value, "list_price"),
        price_per_sqft: opt_number(value, "price_per_sqft"),
        days_on_market: count(value, "days_on_market"),
        description: text(value, "description"),
        listed_date: date(value, "listed_date"),
        price_reduction: opt_money(value, "price_reduction"),
        tax_assessed_value: opt_money(value, "tax_assessed_value"),
        hoa_monthly: opt_money(value, "hoa_monthly"),
        annual_taxes: opt_money(value, "annual_taxes"),
    })
}

/// Build a `BuyerProfile` from a loose CRM contact record.
/// Fails only when the contact has no name. A missing, zero or
/// unparseable `budget_max` is treated as unbounded.
pub fn buyer_from_value(value: &Value) -> Result<BuyerProfile> {
    let name = text(value, "name");
    if name.is_empty() {
        return Err(anyhow::anyhow!("buyer record has no name"));
    }

    let budget_max = match opt_money(value, "budget_max") {
        Some(max) if max > 0.0 => Some(max),
        _ => None,
    };

    Ok(BuyerProfile {
        name,
        budget_min: money(value, "budget_min"),
        budget_max,
        location_preference: text(value, "location_preference"),
        property_type_preference: text(value, "property_type_preference"),
        min_bedrooms: opt_number(value, "min_bedrooms").map(|b| b.max(0.0) as u32),
    })
}

fn text(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn opt_text(value: &Value, key: &str) -> Option<String> {
    let s = text(value, key);
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Dollar amount: number, or a string with "$" and thousands commas
fn money(value: &Value, key: &str) -> f64 {
    opt_money(value, key).unwrap_or(0.0)
}

fn opt_money(value: &Value, key: &str) -> Option<f64> {
    match value.get(key) {
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()),
        Some(Value::String(s)) => {
            let clean = s.replace('$', "").replace(',', "");
            let clean = clean.trim();
            if clean.is_empty() {
                return None;
            }
            match clean.parse::<f64>() {
                Ok(v) if v.is_finite() => Some(v),
                _ => {
                    warn!("Unparseable money value for '{}': {:?}", key, s);
                    None
                }
            }
        }
        _ => None,
    }
}

fn number(value: &Value, key: &str) -> f64 {
    opt_number(value, key).unwrap_or(0.0)
}

fn opt_number(value: &Value, key: &str) -> Option<f64> {
    match value.get(key) {
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Non-negative integer count; negatives and junk become 0
fn count(value: &Value, key: &str) -> u32 {
    opt_number(value, key)
        .filter(|v| *v >= 0.0)
        .map(|v| v as u32)
        .unwrap_or(0)
}

/// ISO date string (YYYY-MM-DD); anything else is absent
fn date(value: &Value, key: &str) -> Option<NaiveDate> {
    match value.get(key) {
        Some(Value::String(s)) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
        _ => None,
    }
}
