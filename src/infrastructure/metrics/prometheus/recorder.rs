use crate::error::{BundleError, Result};
use prometheus::{Registry, TextEncoder};

/// Map a registration failure onto the crate error, keeping collisions distinct.
pub fn registration_error(name: &str, err: prometheus::Error) -> BundleError {
    match err {
        prometheus::Error::AlreadyReg => BundleError::NameCollision(name.to_string()),
        other => BundleError::Registry(format!("cannot register {name}: {other}")),
    }
}

/// Render the registry in Prometheus text format.
pub fn render_metrics(registry: &Registry) -> Result<String> {
    TextEncoder::new()
        .encode_to_string(&registry.gather())
        .map_err(|err| BundleError::Registry(format!("cannot encode metrics: {err}")))
}
