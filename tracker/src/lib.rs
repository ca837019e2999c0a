// Copyright (c) 2025 uatrack contributors. Licensed under Apache License, Version 2.0.

//! Async client for the Universal Analytics Measurement Protocol (v1).
//!
//! Build typed hits with fluent per-type builders, have the [`Tracker`] facade
//! merge in the configured defaults (`tid`, `cid`, application fields), and
//! ship them as `application/x-www-form-urlencoded` POST bodies over a pooled
//! HTTP client. Every send path is gated by [`TrackerConfig::enabled`], so
//! opt-out costs nothing at the call sites.
//!
//! ```no_run
//! use uatrack::{Tracker, TrackerConfig};
//!
//! #[tokio::main]
//! async fn main() -> miette::Result<()> {
//!     let tracker = Tracker::new(
//!         TrackerConfig::new("UA-12345-1").with_application("my-app", "1.0.0"),
//!     )?;
//!
//!     // Wait for the result.
//!     tracker.send(tracker.event_with("install", "started")).await?;
//!
//!     // Or fire and forget, then drain before exit.
//!     tracker.send_detached(tracker.page_view_with("https://example.com/", "Home"));
//!     tracker.close().await;
//!     Ok(())
//! }
//! ```
//!
//! Parameter names, value types, and per-hit-type applicability live in the
//! companion [`uatrack_protocol_schema`] crate.

// Enable debug logging for this crate's modules (via `tracing`).
pub const DEBUG_ANALYTICS_MOD: bool = true;

// Attach sources.
pub mod config;
pub mod error;
pub mod hit;
pub mod http_client;
pub mod stats;
pub mod tracker;
pub mod validator;

// Re-export.
pub use config::*;
pub use error::*;
pub use hit::*;
pub use stats::*;
pub use tracker::*;
pub use validator::*;

// Re-export the schema crate so callers need only one dependency.
pub use uatrack_protocol_schema;
