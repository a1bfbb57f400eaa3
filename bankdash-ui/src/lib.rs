//! Bankdash Dashboard UI
//!
//! Browser glue for the bank-account dashboard, compiled to WebAssembly.
//!
//! # Features
//!
//! - Account type, owner and per-institution balance charts (Chart.js)
//! - Currency display and footer year formatting
//! - Bootstrap tooltip/popover activation
//! - Collapsible sections and confirmation prompts
//!
//! # Usage
//!
//! The host page loads Chart.js and Bootstrap, then mounts the dashboard
//! explicitly and keeps the handle for teardown:
//!
//! ```js
//! import init, { initialize } from "./pkg/bankdash_ui.js";
//!
//! await init();
//! const dashboard = initialize(document.body);
//! window.addEventListener("pagehide", () => dashboard.dispose());
//! ```

use bankdash::config::DashboardConfig;
use wasm_bindgen::prelude::*;
use web_sys::Element;

pub mod chartjs;
pub mod dashboard;
pub mod loader;
pub mod page;

pub use dashboard::Dashboard;

#[wasm_bindgen(start)]
pub fn start() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();
}

/// Mount the dashboard on `root` with default settings
#[wasm_bindgen]
pub fn initialize(root: &Element) -> Result<Dashboard, JsValue> {
    Dashboard::mount(root, DashboardConfig::default())
}

/// Mount the dashboard on `root` with settings from a TOML document
#[wasm_bindgen(js_name = initializeWithConfig)]
pub fn initialize_with_config(root: &Element, config_toml: &str) -> Result<Dashboard, JsValue> {
    let config = DashboardConfig::from_toml_str(config_toml)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Dashboard::mount(root, config)
}

/// Canonical currency text, e.g. `1234.5` -> `£1,234.50`
#[wasm_bindgen(js_name = formatCurrency)]
pub fn format_currency(value: f64) -> String {
    bankdash::format::format_currency(value)
}

/// Blocking confirmation prompt; `true` only if the user accepted
#[wasm_bindgen(js_name = confirmAction)]
pub fn confirm_action(message: &str) -> bool {
    page::confirm_action(message)
}
