//! Integration flows across sharding, pools and interceptors.

pub mod fixtures;

mod concurrency;
mod containers;
mod flows;
mod header_admission;
mod telemetry;
