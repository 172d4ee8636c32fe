//! Prometheus exposition.
//!
//! Subsystem crates register their metrics in the default registry; this
//! module renders whatever is registered in the text format.

use lazy_static::lazy_static;
use prometheus::{register_int_gauge_vec, Encoder, IntGaugeVec, TextEncoder};

use crate::{TelemetryConfig, TelemetryError};

lazy_static! {
    /// Constant 1, labelled with service name and version.
    pub static ref BUILD_INFO: IntGaugeVec = register_int_gauge_vec!(
        "shard_chain_build_info",
        "Service name and version of the running node",
        &["service", "version"]
    )
    .expect("Failed to create build info metric");
}

/// Handle returned once metrics are registered.
#[derive(Debug, Clone)]
pub struct MetricsHandle {
    /// Port the exporter is expected to listen on.
    pub port: u16,
}

impl MetricsHandle {
    /// Current metrics in the Prometheus text format.
    pub fn render(&self) -> Result<String, TelemetryError> {
        encode_metrics()
    }
}

/// Marks the node as up and returns a handle for rendering.
pub fn register_metrics(config: &TelemetryConfig) -> MetricsHandle {
    BUILD_INFO
        .with_label_values(&[config.service_name.as_str(), env!("CARGO_PKG_VERSION")])
        .set(1);
    MetricsHandle {
        port: config.metrics_port,
    }
}

/// Renders every registered metric family.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(&prometheus::gather(), &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info_rendered() {
        let handle = register_metrics(&TelemetryConfig::default());
        let text = handle.render().unwrap();
        assert!(text.contains("shard_chain_build_info"));
        assert!(text.contains("service=\"shard-chain\""));
    }
}
