use lazy_static::lazy_static;
use prometheus::{Gauge, IntCounter, IntCounterVec, Opts, Registry};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // Feed metrics
    pub static ref SAMPLES_INGESTED: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "gas_samples_ingested_total",
            "Gas samples applied to chain history"
        ),
        &["chain"]
    ).unwrap();

    pub static ref PUSH_SUBSCRIPTIONS: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "push_subscriptions_total",
            "Block subscriptions established"
        ),
        &["chain"]
    ).unwrap();

    pub static ref POLL_FALLBACKS: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "poll_fallbacks_total",
            "Subscription failures that fell back to polling"
        ),
        &["chain"]
    ).unwrap();

    pub static ref POLL_ERRORS: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "poll_errors_total",
            "Poll ticks that failed and were skipped"
        ),
        &["chain"]
    ).unwrap();

    // Price oracle metrics
    pub static ref PRICE_UPDATES: IntCounter = IntCounter::new(
        "price_updates_total",
        "Pool prices decoded and applied"
    ).unwrap();

    pub static ref PRICE_FETCH_ERRORS: IntCounter = IntCounter::new(
        "price_fetch_errors_total",
        "Price fetches or decodes that failed"
    ).unwrap();

    pub static ref USD_PRICE: Gauge = Gauge::new(
        "usd_price",
        "Last decoded pool price"
    ).unwrap();
}

pub fn register_metrics() {
    REGISTRY.register(Box::new(SAMPLES_INGESTED.clone())).unwrap();
    REGISTRY.register(Box::new(PUSH_SUBSCRIPTIONS.clone())).unwrap();
    REGISTRY.register(Box::new(POLL_FALLBACKS.clone())).unwrap();
    REGISTRY.register(Box::new(POLL_ERRORS.clone())).unwrap();
    REGISTRY.register(Box::new(PRICE_UPDATES.clone())).unwrap();
    REGISTRY.register(Box::new(PRICE_FETCH_ERRORS.clone())).unwrap();
    REGISTRY.register(Box::new(USD_PRICE.clone())).unwrap();
}
