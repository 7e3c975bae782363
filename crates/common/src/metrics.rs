use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static STORE_MUTATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "central_store_mutations_total",
        "Successful resource mutations by resource and operation",
        &["resource", "op"]
    )
    .expect("register store_mutations_total")
});

pub static STORE_FAILURES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "central_store_failures_total",
        "Resource file writes that failed",
        &["resource"]
    )
    .expect("register store_failures_total")
});

pub fn record_mutation(resource: &str, op: &str) {
    STORE_MUTATIONS_TOTAL.with_label_values(&[resource, op]).inc();
}

pub fn record_failure(resource: &str) {
    STORE_FAILURES_TOTAL.with_label_values(&[resource]).inc();
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
