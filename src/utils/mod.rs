pub mod build_info;

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "folio=info";

/// Installs the global tracing subscriber. `RUST_LOG` extends the default filter.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = DEFAULT_DIRECTIVE.parse() {
            filter = filter.add_directive(directive);
        }
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
