//! deal-engine: opportunity scoring and buyer matching for real-estate
//! listings.
//!
//! A pure, synchronous computation core: callers supply property records,
//! peer sets and buyer profiles as plain values and get back a scored
//! property plus ranked matches. No I/O, no global state - the same
//! scorer can serve any number of concurrent callers.

pub mod config;
pub mod error;
pub mod ingest;
pub mod scoring;

pub use config::ScoringConfig;
pub use error::ConfigError;
pub use scoring::baseline::compute_baseline;
pub use scoring::matcher::match_buyers;
pub use scoring::scorer::OpportunityScorer;
pub use scoring::types::{
    BuyerMatch, BuyerProfile, DealQuality, MarketBaselineSnapshot, PropertyRecord, ScoredProperty,
    ScoringStatus,
};

use chrono::NaiveDate;

/// Convenience entry point: run the whole pipeline for one property and
/// rank buyers against the result. Equivalent to calling
/// [`OpportunityScorer::score_property`] followed by [`match_buyers`].
pub fn score_and_match(
    scorer: &OpportunityScorer,
    property: &PropertyRecord,
    peers: &[PropertyRecord],
    buyers: &[BuyerProfile],
    as_of: NaiveDate,
    min_match_score: u8,
) -> (ScoredProperty, Vec<BuyerMatch>) {
    let scored = scorer.score_property(property, peers, as_of);
    let matches = match_buyers(&scored.property, buyers, min_match_score);
    (scored, matches)
}
