//! folio-core
//!
//! Period resolution, record aggregation, and chart presentation for the
//! back-office dashboards. Depends on folio-domain. No CLI, no terminal I/O,
//! no direct storage interactions.

pub mod aggregation_service;
pub mod collection;
pub mod error;
pub mod period_service;
pub mod storage;
pub mod summary_service;
pub mod time;


pub use aggregation_service::*;
pub use collection::*;
pub use error::CoreError;
pub use period_service::*;
pub use summary_service::*;
pub use time::{Clock, FixedClock};
