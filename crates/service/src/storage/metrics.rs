use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, IntCounterVec};

// Prometheus metrics (default registry)
pub static STORE_LOADS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "storefront_store_loads_total",
        "Container loads by outcome (loaded, missing, unreadable, corrupt)",
        &["container", "outcome"]
    )
    .expect("register store_loads_total")
});

pub static STORE_SAVES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "storefront_store_saves_total",
        "Container saves by result (ok, error)",
        &["container", "result"]
    )
    .expect("register store_saves_total")
});

/// Register the store counters up front so `/metrics` lists them before first use.
pub fn register() {
    Lazy::force(&STORE_LOADS_TOTAL);
    Lazy::force(&STORE_SAVES_TOTAL);
}
