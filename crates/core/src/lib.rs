//! Domain rules for the Entre Páginas diary service.
//!
//! This crate has zero internal dependencies so it can be shared by the
//! repository layer, the HTTP layer, and any future CLI tooling.

pub mod api_keys;
pub mod entries;
pub mod error;
pub mod report;
pub mod search;
pub mod stats;
pub mod types;
