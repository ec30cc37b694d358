//! folio-domain
//!
//! Pure domain models for the back-office dashboards (finance, todo, journal),
//! plus the period and interval types used to bound record queries.
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod book;
pub mod common;
pub mod finance;
pub mod journal;
pub mod period;
pub mod todo;

pub use book::*;
pub use common::*;
pub use finance::*;
pub use journal::*;
pub use period::*;
pub use todo::*;
