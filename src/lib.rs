//! # Bankdash
//!
//! Presentation layer for the bank-account dashboard: the three summary
//! charts (account types, owners, per-institution balances) and the small
//! page formatting helpers around them.
//!
//! Nothing here stores or aggregates data. Charts are built from the
//! pre-aggregated payload of `GET /api/chart-data`; page formatting only
//! rewrites numbers already on the page.
//!
//! ## Modules
//!
//! - [`charts`]: payload types, chart spec building and the slot registry
//! - [`format`]: currency and footer-year text rules
//! - [`route`]: when the dashboard should load charts at all
//! - [`config`]: TOML configuration
//! - `preview` (feature `preview`): local dev server with a fixture payload
//!
//! The browser side lives in the `bankdash-ui` crate, which drives Chart.js
//! and Bootstrap through a [`charts::ChartBackend`] implementation.
//!
//! ## Quick Start
//!
//! ```rust
//! use bankdash::charts::{ChartDataset, ChartSlot, ChartSpec, ChartStyle, OwnerCodeMap};
//! use bankdash::config::DashboardConfig;
//!
//! let config = DashboardConfig::default();
//! let owners = ChartDataset::from_pairs([("a", 750.0), ("j", 250.0)]);
//!
//! let style = ChartStyle {
//!     palette: &config.palette,
//!     currency_symbol: &config.currency_symbol,
//! };
//! let spec = ChartSpec::build(ChartSlot::Owner, &owners, style, &OwnerCodeMap);
//!
//! assert_eq!(spec.data.labels, vec!["Owner A", "Owner J"]);
//! assert_eq!(spec.tooltip_for(0), Some("Owner A: £750.00 (75%)"));
//! ```

pub mod charts;
pub mod config;
pub mod format;
pub mod route;

#[cfg(feature = "preview")]
pub mod preview;

// Re-export top-level types for convenience
pub use charts::{
    ChartBackend, ChartData, ChartDataset, ChartError, ChartKind, ChartRegistry, ChartResult,
    ChartSlot, ChartSpec, OwnerCodeMap,
};

pub use config::{Config, ConfigError, DashboardConfig, ElementIds, LoggingConfig, PreviewConfig};

pub use format::{format_currency, format_currency_with, replace_first_year, CURRENCY_SYMBOL};

pub use route::{is_dashboard_route, should_load_charts};

#[cfg(feature = "preview")]
pub use preview::{build_router, serve, PreviewError, PreviewState};
