//! Dashboard charts
//!
//! Three fixed chart slots fed from the aggregate-data endpoint:
//!
//! | Slot          | Mount point        | Kind     | Dataset         |
//! |---------------|--------------------|----------|-----------------|
//! | account type  | `accountTypeChart` | pie      | `account_types` |
//! | owner         | `ownerChart`       | doughnut | `owners`        |
//! | institution   | `frnChart`         | bar      | `frns`          |
//!
//! The spec builders are pure; the [`ChartRegistry`] drives a
//! [`ChartBackend`] (Chart.js in the browser, a recorder in tests).

pub mod dataset;
pub mod error;
pub mod owner;
pub mod registry;
pub mod spec;

pub use dataset::{ChartData, ChartDataset, ChartKind, ChartSlot};
pub use error::{ChartError, ChartResult};
pub use owner::OwnerCodeMap;
pub use registry::{ChartBackend, ChartRegistry};
pub use spec::{
    default_palette, percentage, tick_label, tooltip_label, ChartSpec, ChartStyle, PaletteColor,
};
