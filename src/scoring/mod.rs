//! Scoring module - pipeline from raw property record to ranked matches
//!
//! Data flow: peer set -> baseline -> investment metrics -> distress
//! signals -> opportunity score -> buyer matching. Every step is a pure
//! function of its inputs; orchestration across many properties is the
//! caller's concern.

pub mod baseline;
pub mod distress;
pub mod matcher;
pub mod metrics;
pub mod scorer;
pub mod types;
pub mod util;

pub use types::*;
