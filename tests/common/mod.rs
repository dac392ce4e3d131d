// Test helpers are intentionally partially used
#![allow(dead_code)]

use axum_prom_bundle::{build_router, BundleConfig, PromBundle, PrometheusRegistry};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;

// ============================================================================
// Test Setup
// ============================================================================

/// Build a bundle over a fresh Prometheus registry.
pub fn prom_bundle(config: BundleConfig) -> PromBundle {
    // ---
    PromBundle::new(Arc::new(PrometheusRegistry::new()), config)
        .expect("bundle setup should succeed")
}

pub fn routes_to_detail(routes: &[&str]) -> BundleConfig {
    // ---
    BundleConfig {
        routes_to_detail: Some(routes.iter().map(|r| r.to_string()).collect()),
        ..BundleConfig::default()
    }
}

/// Demo server bound to an ephemeral port.
pub struct TestServer {
    pub addr: std::net::SocketAddr,
    pub client: Client,
    pub bundle: PromBundle,
}

impl TestServer {
    // ---
    pub async fn new(bundle: PromBundle) -> Self {
        // --

        let app = build_router(bundle.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Spawn the server in the background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start
        sleep(Duration::from_millis(100)).await;

        let client = Client::new();

        Self {
            addr,
            client,
            bundle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        // ---
        format!("http://{}{}", self.addr, path)
    }

    /// Current registry text, without going through HTTP.
    pub fn rendered(&self) -> String {
        // ---
        self.bundle.registry().render().unwrap()
    }
}
