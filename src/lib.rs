//! Flight-time statistics for a single route: average and nearest-rank
//! percentile of ticket durations, with each leg read in its own fixed UTC offset.

pub mod config;
pub mod error;
pub mod logger;
pub mod stats;
pub mod ticket;
pub mod time;
