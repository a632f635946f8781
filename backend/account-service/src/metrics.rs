use actix_web::{HttpResponse, Responder};
use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, TextEncoder};

/// Handler that serialises Prometheus metrics in text format.
pub async fn metrics_handler() -> impl Responder {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(_) => HttpResponse::Ok()
            .content_type(encoder.format_type())
            .body(buffer),
        Err(err) => HttpResponse::InternalServerError().body(err.to_string()),
    }
}

/// Initialize account metrics (call from main() so they show up before first use)
pub fn init_metrics() {
    let _ = &*REGISTER_TOTAL;
    let _ = &*LOGIN_TOTAL;
    let _ = &*TOKENS_ISSUED_TOTAL;
}

fn register_counter_vec(name: &str, help: &str, labels: &[&str]) -> IntCounterVec {
    IntCounterVec::new(Opts::new(name, help), labels)
        .and_then(|c| {
            prometheus::default_registry().register(Box::new(c.clone()))?;
            Ok(c)
        })
        .unwrap_or_else(|e| {
            tracing::error!("failed to register {}: {}", name, e);
            IntCounterVec::new(Opts::new(format!("dummy_{}", name), "dummy"), labels)
                .expect("dummy counter vec")
        })
}

/// Registration attempts by outcome
static REGISTER_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_counter_vec(
        "account_register_total",
        "Total registration attempts by outcome",
        &["outcome"],
    )
});

/// Login attempts by outcome
static LOGIN_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_counter_vec(
        "account_login_total",
        "Total login attempts by outcome",
        &["outcome"],
    )
});

static TOKENS_ISSUED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("account_tokens_issued_total", "Session tokens issued")
        .and_then(|c| {
            prometheus::default_registry().register(Box::new(c.clone()))?;
            Ok(c)
        })
        .unwrap_or_else(|e| {
            tracing::error!("failed to create tokens_issued counter: {}", e);
            IntCounter::new("dummy_tokens_issued", "dummy").expect("dummy counter")
        })
});

pub fn record_register(outcome: &str) {
    REGISTER_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn record_login(outcome: &str) {
    LOGIN_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn record_token_issued() {
    TOKENS_ISSUED_TOTAL.inc();
}
