#![doc(test(attr(deny(warnings))))]

//! Folio bundles the back-office dashboard logic (period filters, record
//! aggregation, chart summaries) behind a small command-line front end.

pub mod cli;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Folio tracing initialized.");
    });
}
