//! Request extractors that guard handlers.
//!
//! - [`api_key::ApiKeyAuth`] -- Requires the configured API key, when one is set.

pub mod api_key;
