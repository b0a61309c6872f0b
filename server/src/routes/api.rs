use std::fmt::Write as _;

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

use crate::state::{AppState, ObservabilitySnapshot};

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let observability = state.observability.snapshot();
    Json(serde_json::json!({
        "status": "ok",
        "nations": state.nations.len(),
        "max_nations": state.max_nations,
        "observability": {
            "population_requests_total": observability.population_requests_total,
            "submissions_total": observability.submissions_total,
            "submissions_rejected_total": observability.submissions_rejected_total,
            "consumption_updates_total": observability.consumption_updates_total,
            "optimize_requests_total": observability.optimize_requests_total,
            "evicted_nations_total": observability.evicted_nations_total,
        }
    }))
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let body = render_prometheus_metrics(state.nations.len(), state.observability.snapshot());

    (
        [
            (header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE),
            (header::CACHE_CONTROL, "no-store"),
        ],
        body,
    )
}

fn write_metric(body: &mut String, name: &str, kind: &str, help: &str, value: u64) {
    let _ = writeln!(body, "# HELP {name} {help}");
    let _ = writeln!(body, "# TYPE {name} {kind}");
    let _ = writeln!(body, "{name} {value}");
}

fn render_prometheus_metrics(nation_count: usize, observability: ObservabilitySnapshot) -> String {
    let mut body = String::new();
    write_metric(
        &mut body,
        "ecoworld_nations",
        "gauge",
        "Nations currently held in memory.",
        nation_count as u64,
    );
    write_metric(
        &mut body,
        "ecoworld_population_requests_total",
        "counter",
        "Total population reads.",
        observability.population_requests_total,
    );
    write_metric(
        &mut body,
        "ecoworld_submissions_total",
        "counter",
        "Total population distributions submitted.",
        observability.submissions_total,
    );
    write_metric(
        &mut body,
        "ecoworld_submissions_rejected_total",
        "counter",
        "Total submitted distributions rejected by validation.",
        observability.submissions_rejected_total,
    );
    write_metric(
        &mut body,
        "ecoworld_consumption_updates_total",
        "counter",
        "Total consumption snapshot updates.",
        observability.consumption_updates_total,
    );
    write_metric(
        &mut body,
        "ecoworld_optimize_requests_total",
        "counter",
        "Total optimize suggestions computed.",
        observability.optimize_requests_total,
    );
    write_metric(
        &mut body,
        "ecoworld_evicted_nations_total",
        "counter",
        "Total nations dropped for idleness or capacity.",
        observability.evicted_nations_total,
    );
    body
}

pub(crate) fn json_bytes_response(body: Bytes, cache_control: &'static str) -> Response {
    let mut response = Response::new(Body::from(body));
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(cache_control),
    );
    response
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::time::Duration;

    use super::render_prometheus_metrics;
    use crate::state::{AppState, ObservabilitySnapshot};

    async fn spawn_test_server(state: AppState) -> (SocketAddr, tokio::task::JoinHandle<()>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");
        let app = crate::app::build_app(state, "static");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve test app");
        });
        (addr, handle)
    }

    #[test]
    fn metrics_output_contains_prometheus_help_type_and_values() {
        let observability = ObservabilitySnapshot {
            population_requests_total: 12,
            submissions_total: 7,
            submissions_rejected_total: 3,
            consumption_updates_total: 4,
            optimize_requests_total: 5,
            evicted_nations_total: 1,
        };

        let metrics = render_prometheus_metrics(42, observability);

        assert!(metrics.contains("# HELP ecoworld_nations"));
        assert!(metrics.contains("# TYPE ecoworld_nations gauge"));
        assert!(metrics.contains("# TYPE ecoworld_submissions_total counter"));
        assert!(metrics.contains("ecoworld_nations 42"));
        assert!(metrics.contains("ecoworld_population_requests_total 12"));
        assert!(metrics.contains("ecoworld_submissions_total 7"));
        assert!(metrics.contains("ecoworld_submissions_rejected_total 3"));
        assert!(metrics.contains("ecoworld_consumption_updates_total 4"));
        assert!(metrics.contains("ecoworld_optimize_requests_total 5"));
        assert!(metrics.contains("ecoworld_evicted_nations_total 1"));
    }

    #[tokio::test]
    async fn health_and_metrics_expose_expected_contract() {
        let state = AppState::with_limits(16, Duration::from_secs(600));
        let (addr, server_handle) = spawn_test_server(state).await;
        let base_url = format!("http://{addr}");
        let client = reqwest::Client::new();

        client
            .get(format!("{base_url}/api/nations/Atlantis/population"))
            .send()
            .await
            .expect("population request")
            .error_for_status()
            .expect("population status");

        let health = client
            .get(format!("{base_url}/api/health"))
            .send()
            .await
            .expect("health request")
            .error_for_status()
            .expect("health status")
            .json::<serde_json::Value>()
            .await
            .expect("parse health");

        assert_eq!(health.get("status").and_then(|v| v.as_str()), Some("ok"));
        assert_eq!(health.get("nations").and_then(|v| v.as_u64()), Some(1));
        assert_eq!(
            health
                .get("observability")
                .and_then(|v| v.get("population_requests_total"))
                .and_then(|v| v.as_u64()),
            Some(1)
        );

        let metrics = client
            .get(format!("{base_url}/api/metrics"))
            .send()
            .await
            .expect("metrics request")
            .error_for_status()
            .expect("metrics status")
            .text()
            .await
            .expect("parse metrics text");

        assert!(metrics.contains("ecoworld_nations 1"));
        assert!(metrics.contains("ecoworld_population_requests_total 1"));
        assert!(metrics.contains("ecoworld_submissions_total 0"));

        server_handle.abort();
        let _ = server_handle.await;
    }
}
