//! telemetry/mod.rs
//! Codec counters.
//!
//! Counters are plain values owned by the caller, merged after the fact;
//! the codec itself keeps no global state.

pub mod counters;

pub use counters::*;
