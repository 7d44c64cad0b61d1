//! Prueba de integración del endpoint de scrape.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use sonda::config::Config;
use sonda::gauges::{GaugeStore, MetricKind};
use sonda::{http, AppState};

fn make_state() -> Arc<AppState> {
    let gauges = Arc::new(GaugeStore::new().unwrap());
    Arc::new(AppState {
        config: Config {
            target: "192.0.2.1".to_string(),
            listen_addr: "127.0.0.1:0".to_string(),
            sample_interval_secs: 5,
            bandwidth_test_secs: 1,
        },
        gauges,
    })
}

async fn scrape(state: Arc<AppState>) -> (StatusCode, String) {
    let app = http::router(state);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_scrape_returns_both_gauges() {
    let state = make_state();
    state.gauges.set(MetricKind::Latency, 12.3);
    state.gauges.set(MetricKind::Bandwidth, 10500.0);

    let (status, text) = scrape(Arc::clone(&state)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("# HELP network_latency_ms"));
    assert!(text.contains("# TYPE network_latency_ms gauge"));
    assert!(text.contains("network_latency_ms 12.3"));
    assert!(text.contains("# HELP network_bandwidth_kbps"));
    assert!(text.contains("# TYPE network_bandwidth_kbps gauge"));
    assert!(text.contains("network_bandwidth_kbps 10500"));
}

#[tokio::test]
async fn test_scrape_with_single_successful_loop() {
    // Solo el loop de latencia ha medido; el ancho de banda sigue en su
    // centinela inicial y aun así debe aparecer en el scrape
    let state = make_state();
    state.gauges.set(MetricKind::Latency, 7.5);

    let (status, text) = scrape(state).await;

    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("network_latency_ms 7.5"));
    assert!(text.contains("network_bandwidth_kbps 0"));
}
