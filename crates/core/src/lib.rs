//! Access to the hosting provider's HTTP API.
//!
//! The rest of the workspace treats the provider as a single capability,
//! [`HostingApi::invoke`]: one method, one path, an optional JSON body, and a
//! JSON value or an [`ApiError`] back. [`HttpHostingApi`] is the production
//! implementation; tests substitute their own.

pub mod client;
pub mod config;
pub mod error;

pub use client::{HostingApi, HttpHostingApi, HttpMethod};
pub use config::{ApiConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, ApiResult};
