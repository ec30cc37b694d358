use chrono::{DateTime, Utc};

use folio_core::Clock;

/// Wall clock used when no `--now` override is given.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
