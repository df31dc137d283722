//! Market baseline - peer-group statistics from comparable listings
//!
//! Computed fresh per scoring call from a caller-supplied peer set (the
//! persistence collaborator's ZIP+type+bedroom query, or its documented
//! broader fallback). Nothing here is cached or persisted.

use crate::scoring::types::{MarketBaselineSnapshot, MarketTrend, PropertyRecord};
use chrono::NaiveDate;
use tracing::debug;

/// Fallback price-per-sqft when the peer set is too thin to trust
const FALLBACK_PRICE_PER_SQFT: f64 = 250.0;
/// Fallback average days-on-market for the same case
const FALLBACK_AVG_DOM: f64 = 30.0;
/// Minimum valid peers before peer statistics are used at all
const MIN_PEER_COUNT: usize = 3;
/// Recent-vs-older mean must differ by more than this fraction to call a trend
const TREND_THRESHOLD: f64 = 0.03;

/// Compute peer-group statistics from comparable historical listings.
///
/// Peers without a positive price and area are excluded, not zero-filled.
/// Fewer than 3 valid peers yields the documented fallback snapshot
/// (250/250/30, STABLE, peer_count 0) - an explicit degraded result, not a
/// silent one. `as_of` anchors the recent/older trend split so repeated
/// calls on the same inputs stay deterministic.
pub fn compute_baseline(peers: &[PropertyRecord], as_of: NaiveDate) -> MarketBaselineSnapshot {
    let valid: Vec<&PropertyRecord> = peers
        .iter()
        .filter(|p| p.has_scorable_financials())
        .collect();

    if valid.len() < MIN_PEER_COUNT {
        debug!(
            "Peer set too small ({} valid of {} supplied), using fallback baseline",
            valid.len(),
            peers.len()
        );
        return fallback_snapshot();
    }

    let mut ppsf: Vec<f64> = valid
        .iter()
        .filter_map(|p| p.effective_price_per_sqft())
        .collect();
    ppsf.sort_by(|a, b| a.total_cmp(b));

    let avg = ppsf.iter().sum::<f64>() / ppsf.len() as f64;
    let median = median_of_sorted(&ppsf);
    let avg_dom = valid
        .iter()
        .map(|p| f64::from(p.days_on_market))
        .sum::<f64>()
        / valid.len() as f64;

    let trend = compute_trend(&valid, as_of);

    debug!(
        "Baseline from {} peers: median ${:.2}/sqft, avg ${:.2}/sqft, {:.0} avg DOM, trend {}",
        valid.len(),
        median,
        avg,
        avg_dom,
        trend
    );

    MarketBaselineSnapshot {
        avg_price_per_sqft: avg,
        median_price_per_sqft: median,
        avg_days_on_market: avg_dom,
        peer_count: valid.len(),
        trend,
    }
}

/// The documented degraded snapshot for thin peer sets
pub fn fallback_snapshot() -> MarketBaselineSnapshot {
    MarketBaselineSnapshot {
        avg_price_per_sqft: FALLBACK_PRICE_PER_SQFT,
        median_price_per_sqft: FALLBACK_PRICE_PER_SQFT,
        avg_days_on_market: FALLBACK_AVG_DOM,
        peer_count: 0,
        trend: MarketTrend::Stable,
    }
}

/// Standard median: average of the two middle values for even counts
fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Compare mean price-per-sqft of peers listed within the last 30 days
/// against those listed 30-90 days back. Either subgroup empty -> STABLE.
fn compute_trend(valid: &[&PropertyRecord], as_of: NaiveDate) -> MarketTrend {
    let mut recent = Vec::new();
    let mut older = Vec::new();

    for peer in valid {
        let (Some(listed), Some(ppsf)) = (peer.listed_date, peer.effective_price_per_sqft())
        else {
            continue;
        };
        let age_days = (as_of - listed).num_days();
        if (0..=30).contains(&age_days) {
            recent.push(ppsf);
        } else if (31..=90).contains(&age_days) {
            older.push(ppsf);
        }
    }

    if recent.is_empty() || older.is_empty() {
        return MarketTrend::Stable;
    }

    let recent_mean = recent.iter().sum::<f64>() / recent.len() as f64;
    let older_mean = older.iter().sum::<f64>() / older.len() as f64;

    if recent_mean > older_mean * (1.0 + TREND_THRESHOLD) {
        MarketTrend::Rising
    } else if recent_mean < older_mean * (1.0 - TREND_THRESHOLD) {
        MarketTrend::Falling
    } else {
        MarketTrend::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer(price: f64, sqft: f64, dom: u32, listed: Option<NaiveDate>) -> PropertyRecord {
        PropertyRecord {
            address: "1 Test St".to_string(),
            list_price: price,
            living_area_sqft: sqft,
            days_on_market: dom,
            listed_date: listed,
            ..Default::default()
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fallback_under_three_peers() {
        let peers = vec![
            peer(400_000.0, 2000.0, 30, None),
            peer(500_000.0, 2000.0, 40, None),
        ];
        let baseline = compute_baseline(&peers, day(2024, 6, 1));

        assert_eq!(baseline, fallback_snapshot());
        assert_eq!(baseline.median_price_per_sqft, 250.0);
        assert_eq!(baseline.avg_price_per_sqft, 250.0);
        assert_eq!(baseline.avg_days_on_market, 30.0);
        assert_eq!(baseline.peer_count, 0);
        assert_eq!(baseline.trend, MarketTrend::Stable);
    }

    #[test]
    fn test_invalid_peers_excluded_not_zero_filled() {
        // Two valid + two invalid = still under the minimum
        let peers = vec![
            peer(400_000.0, 2000.0, 30, None),
            peer(500_000.0, 2000.0, 40, None),
            peer(0.0, 2000.0, 10, None),
            peer(300_000.0, 0.0, 10, None),
        ];
        let baseline = compute_baseline(&peers, day(2024, 6, 1));
        assert_eq!(baseline.peer_count, 0); // fallback
    }

    #[test]
    fn test_median_even_count() {
        // $200, $210, $250, $300 per sqft -> median (210+250)/2 = 230
        let peers = vec![
            peer(400_000.0, 2000.0, 10, None),
            peer(420_000.0, 2000.0, 20, None),
            peer(500_000.0, 2000.0, 30, None),
            peer(600_000.0, 2000.0, 40, None),
        ];
        let baseline = compute_baseline(&peers, day(2024, 6, 1));

        assert_eq!(baseline.peer_count, 4);
        assert!((baseline.median_price_per_sqft - 230.0).abs() < 1e-9);
        assert!((baseline.avg_price_per_sqft - 240.0).abs() < 1e-9);
        assert!((baseline.avg_days_on_market - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_median_odd_count() {
        let peers = vec![
            peer(400_000.0, 2000.0, 10, None),
            peer(500_000.0, 2000.0, 20, None),
            peer(600_000.0, 2000.0, 30, None),
        ];
        let baseline = compute_baseline(&peers, day(2024, 6, 1));
        assert!((baseline.median_price_per_sqft - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_trend_rising() {
        let as_of = day(2024, 6, 30);
        // Recent ($300/sqft) more than 3% above older ($250/sqft)
        let peers = vec![
            peer(600_000.0, 2000.0, 10, Some(day(2024, 6, 20))),
            peer(600_000.0, 2000.0, 15, Some(day(2024, 6, 10))),
            peer(500_000.0, 2000.0, 60, Some(day(2024, 4, 20))),
            peer(500_000.0, 2000.0, 70, Some(day(2024, 4, 10))),
        ];
        let baseline = compute_baseline(&peers, as_of);
        assert_eq!(baseline.trend, MarketTrend::Rising);
    }

    #[test]
    fn test_trend_falling() {
        let as_of = day(2024, 6, 30);
        let peers = vec![
            peer(460_000.0, 2000.0, 10, Some(day(2024, 6, 20))),
            peer(460_000.0, 2000.0, 15, Some(day(2024, 6, 10))),
            peer(500_000.0, 2000.0, 60, Some(day(2024, 4, 20))),
            peer(500_000.0, 2000.0, 70, Some(day(2024, 4, 10))),
        ];
        let baseline = compute_baseline(&peers, as_of);
        assert_eq!(baseline.trend, MarketTrend::Falling);
    }

    #[test]
    fn test_trend_stable_within_threshold() {
        let as_of = day(2024, 6, 30);
        // Recent mean 2% above older - inside the 3% band
        let peers = vec![
            peer(510_000.0, 2000.0, 10, Some(day(2024, 6, 20))),
            peer(510_000.0, 2000.0, 15, Some(day(2024, 6, 10))),
            peer(500_000.0, 2000.0, 60, Some(day(2024, 4, 20))),
            peer(500_000.0, 2000.0, 70, Some(day(2024, 4, 10))),
        ];
        let baseline = compute_baseline(&peers, as_of);
        assert_eq!(baseline.trend, MarketTrend::Stable);
    }

    #[test]
    fn test_trend_stable_when_subgroup_empty() {
        let as_of = day(2024, 6, 30);
        // All peers listed recently, no older subgroup
        let peers = vec![
            peer(600_000.0, 2000.0, 10, Some(day(2024, 6, 20))),
            peer(500_000.0, 2000.0, 15, Some(day(2024, 6, 15))),
            peer(550_000.0, 2000.0, 20, Some(day(2024, 6, 10))),
        ];
        let baseline = compute_baseline(&peers, as_of);
        assert_eq!(baseline.trend, MarketTrend::Stable);
    }
}
