use axum::{
    body::{Body, Bytes},
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use axum_prom_bundle::{
    create_router,
    domain::{FilterConfig, HeapUsage, MemorySampler, NamePattern},
    instrument_router, BundleConfig, BundleError, PromBundle, PrometheusRegistry,
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

mod common;

struct FixedMemory(HeapUsage);

impl MemorySampler for FixedMemory {
    fn sample(&self) -> HeapUsage {
        self.0
    }
}

/// Router with a single `/api/widgets` route that always answers 404.
fn widgets_not_found(bundle: &PromBundle) -> Router {
    // ---
    let router = Router::new().route("/api/widgets", get(|| async { StatusCode::NOT_FOUND }));
    instrument_router(router, bundle.clone())
}

async fn get_request(app: Router, path: &str) -> axum::response::Response {
    // ---
    app.oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    // ---
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn not_found_route_without_promotion() {
    // ---
    let bundle = common::prom_bundle(BundleConfig::default());

    let response = get_request(widgets_not_found(&bundle), "/api/widgets").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    body_text(response).await;

    let text = bundle.registry().render().unwrap();
    assert!(text.contains("http_request_seconds_count{status_code=\"404\"} 1"), "{text}");
    assert!(
        text.contains(
            "http_request_detail_duration_count{method=\"GET\",route=\"/api/widgets\",status_code=\"404\"} 1"
        ),
        "{text}"
    );
    assert!(!text.contains("http_request_long_duration"), "{text}");
}

#[tokio::test]
async fn not_found_route_with_promotion() {
    // ---
    let bundle = common::prom_bundle(common::routes_to_detail(&["/api/widgets"]));

    let response = get_request(widgets_not_found(&bundle), "/api/widgets").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    body_text(response).await;

    let text = bundle.registry().render().unwrap();
    assert!(text.contains("http_request_seconds_count{status_code=\"404\"} 1"), "{text}");
    assert!(
        text.contains(
            "http_request_long_duration_count{method=\"GET\",status_code=\"404\",url=\"/api/widgets\"} 1"
        ),
        "{text}"
    );
}

#[tokio::test]
async fn scrape_reports_heap_and_is_not_timed() {
    // ---
    let usage = HeapUsage {
        heap_total: 8_388_608,
        heap_used: 2_097_152,
    };
    let bundle = PromBundle::with_memory_sampler(
        Arc::new(PrometheusRegistry::new()),
        BundleConfig::default(),
        Arc::new(FixedMemory(usage)),
    )
    .unwrap();

    let response = get_request(widgets_not_found(&bundle), "/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"), "{content_type}");

    let body = body_text(response).await;
    assert!(body.contains("\nnodejs_memory_heap_total_bytes 8388608\n"), "{body}");
    assert!(body.contains("\nnodejs_memory_heap_used_bytes 2097152\n"), "{body}");

    // Neither this scrape nor a second one shows a request observation.
    let body = body_text(get_request(widgets_not_found(&bundle), "/metrics").await).await;
    assert!(!body.contains("http_request_"), "{body}");
}

#[tokio::test]
async fn metrics_query_string_is_still_a_scrape() {
    // ---
    let bundle = common::prom_bundle(BundleConfig::default());

    let body = body_text(get_request(widgets_not_found(&bundle), "/metrics?format=text").await).await;
    assert!(body.contains("# TYPE up gauge"), "{body}");
    assert!(!bundle.registry().render().unwrap().contains("http_request_seconds_count"));
}

#[tokio::test]
async fn unmatched_path_is_recorded_under_raw_path() {
    // ---
    let bundle = common::prom_bundle(BundleConfig::default());

    let response = get_request(widgets_not_found(&bundle), "/no/such/thing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    body_text(response).await;

    let text = bundle.registry().render().unwrap();
    assert!(
        text.contains(
            "http_request_detail_duration_count{method=\"GET\",route=\"/no/such/thing\",status_code=\"404\"} 1"
        ),
        "{text}"
    );
}

#[tokio::test]
async fn whitelisted_bundle_skips_inactive_metrics() {
    // ---
    let config = BundleConfig {
        filter: FilterConfig::whitelist(vec![NamePattern::regex("^http_").unwrap()]),
        routes_to_detail: None,
    };
    let bundle = common::prom_bundle(config);
    assert!(bundle.metrics().gauge("up").is_none());

    let body = body_text(get_request(widgets_not_found(&bundle), "/metrics").await).await;
    assert!(!body.contains("# TYPE up"), "{body}");
    assert!(!body.contains("nodejs_memory"), "{body}");
}

#[tokio::test]
async fn abandoned_request_records_nothing() {
    // ---
    let bundle = common::prom_bundle(BundleConfig::default());
    let router = Router::new().route(
        "/slow",
        get(|| async { std::future::pending::<StatusCode>().await }),
    );
    let app = instrument_router(router, bundle.clone());

    let request = Request::builder().uri("/slow").body(Body::empty()).unwrap();
    let outcome = tokio::time::timeout(Duration::from_millis(20), app.oneshot(request)).await;
    assert!(outcome.is_err(), "the handler never responds");

    let text = bundle.registry().render().unwrap();
    assert!(!text.contains("http_request_"), "{text}");
}

/// Body that sends one chunk, stalls for 400 ms, then sends the rest.
fn slow_report_body() -> Body {
    // ---
    let chunks = futures::stream::unfold(0u8, |step| async move {
        match step {
            0 => Some((Ok::<_, std::io::Error>(Bytes::from_static(b"first ")), 1)),
            1 => {
                tokio::time::sleep(Duration::from_millis(400)).await;
                Some((Ok(Bytes::from_static(b"second")), 2))
            }
            _ => None,
        }
    });
    Body::from_stream(chunks)
}

fn slow_report(bundle: &PromBundle) -> Router {
    // ---
    let router = Router::new().route("/report", get(|| async { slow_report_body() }));
    instrument_router(router, bundle.clone())
}

#[tokio::test]
async fn slow_body_is_timed_until_the_last_chunk() {
    // ---
    let bundle = common::prom_bundle(BundleConfig::default());

    let response = get_request(slow_report(&bundle), "/report").await;
    assert_eq!(response.status(), StatusCode::OK);

    // The head is back but the body is still streaming.
    let text = bundle.registry().render().unwrap();
    assert!(!text.contains("http_request_seconds_count"), "{text}");

    assert_eq!(body_text(response).await, "first second");

    let text = bundle.registry().render().unwrap();
    assert!(text.contains("http_request_seconds_count{status_code=\"200\"} 1"), "{text}");
    assert!(
        text.contains("http_request_seconds_bucket{status_code=\"200\",le=\"0.3\"} 0"),
        "{text}"
    );
    assert!(
        text.contains("http_request_seconds_bucket{status_code=\"200\",le=\"1.5\"} 1"),
        "{text}"
    );
}

#[tokio::test]
async fn dropped_body_completes_the_request_once() {
    // ---
    let bundle = common::prom_bundle(BundleConfig::default());

    let response = get_request(slow_report(&bundle), "/report").await;
    assert_eq!(response.status(), StatusCode::OK);
    drop(response);

    let text = bundle.registry().render().unwrap();
    assert!(text.contains("http_request_seconds_count{status_code=\"200\"} 1"), "{text}");
    assert!(
        text.contains(
            "http_request_detail_duration_count{method=\"GET\",route=\"/report\",status_code=\"200\"} 1"
        ),
        "{text}"
    );
}

#[test]
fn conflicting_filters_fail_at_setup() {
    // ---
    let config = BundleConfig {
        filter: FilterConfig {
            whitelist: Some(vec![NamePattern::exact("up")]),
            blacklist: Some(vec![NamePattern::exact("up")]),
        },
        routes_to_detail: None,
    };

    let err = PromBundle::new(Arc::new(PrometheusRegistry::new()), config)
        .err()
        .unwrap();
    assert!(matches!(err, BundleError::Configuration(_)));
}

#[tokio::test]
#[serial_test::serial]
async fn create_router_rejects_conflicting_env_filters() {
    // ---
    std::env::set_var("PROM_BUNDLE_WHITELIST", "up");
    std::env::set_var("PROM_BUNDLE_BLACKLIST", "/^http_/");

    let err = create_router().err().expect("router creation should fail");
    assert!(err.to_string().contains("mutually exclusive"), "{err}");

    std::env::remove_var("PROM_BUNDLE_WHITELIST");
    std::env::remove_var("PROM_BUNDLE_BLACKLIST");
}

#[tokio::test]
#[serial_test::serial]
async fn create_router_serves_metrics() {
    // ---
    for key in ["PROM_BUNDLE_WHITELIST", "PROM_BUNDLE_BLACKLIST", "AXUM_METRICS_TYPE"] {
        std::env::remove_var(key);
    }
    let app = create_router().expect("Should be able to create router");

    let response = get_request(app.clone(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    body_text(response).await;

    let body = body_text(get_request(app, "/metrics").await).await;
    assert!(body.contains("http_request_seconds_count{status_code=\"200\"} 1"), "{body}");
}
