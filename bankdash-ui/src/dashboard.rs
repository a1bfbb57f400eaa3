//! Dashboard Controller
//!
//! Owns everything one mounted dashboard page created: the chart registry
//! and the Bootstrap widgets. `dispose()` releases all of it; a fetch that
//! resolves afterwards is dropped by the registry.

use bankdash::charts::{ChartRegistry, ChartSlot};
use bankdash::config::DashboardConfig;
use bankdash::route::should_load_charts;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element};

use crate::chartjs::ChartJsBackend;
use crate::loader;
use crate::page::{self, PageElements, Widget};

/// Handle to a mounted dashboard, returned by `initialize`
#[wasm_bindgen]
pub struct Dashboard {
    inner: Rc<DashboardInner>,
}

struct DashboardInner {
    config: DashboardConfig,
    document: Document,
    registry: RefCell<ChartRegistry<ChartJsBackend>>,
    widgets: RefCell<Vec<Widget>>,
    charts_enabled: bool,
}

impl Dashboard {
    /// Resolve the page under `root`, run the formatting pass and, on the
    /// dashboard route, start the first chart load
    pub fn mount(root: &Element, config: DashboardConfig) -> Result<Dashboard, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let elements = PageElements::resolve(&document, root, &config);
        let path = window.location().pathname().unwrap_or_default();
        let charts_enabled = should_load_charts(&path, elements.has_account_chart(), &config);

        let widgets = page::activate_widgets(root);
        page::format_currency_displays(root, &config);
        page::update_footer_year(elements.footer.as_ref(), page::current_year());

        let registry = ChartRegistry::new(ChartJsBackend::new(elements.canvases), &config);

        let dashboard = Dashboard {
            inner: Rc::new(DashboardInner {
                config,
                document,
                registry: RefCell::new(registry),
                widgets: RefCell::new(widgets),
                charts_enabled,
            }),
        };

        if charts_enabled {
            dashboard.refresh();
        }

        Ok(dashboard)
    }
}

#[wasm_bindgen]
impl Dashboard {
    /// Fetch chart data and rebuild every chart.
    ///
    /// No-op off the dashboard route. Overlapping refreshes are not
    /// sequenced: whichever response arrives last wins.
    pub fn refresh(&self) {
        if !self.inner.charts_enabled || self.inner.registry.borrow().is_disposed() {
            return;
        }

        let inner = Rc::clone(&self.inner);
        spawn_local(async move {
            let outcome = loader::fetch_chart_data(&inner.config.endpoint).await;
            let applied = inner.registry.borrow_mut().apply_load(outcome);
            match applied {
                Ok(failures) => {
                    for failure in failures {
                        web_sys::console::error_1(&format!("Error rendering chart: {}", failure).into());
                    }
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Error loading chart data: {}", e).into());
                }
            }
        });
    }

    /// Whether this mount loads charts (dashboard route with the account-type
    /// mount point present)
    #[wasm_bindgen(js_name = chartsEnabled)]
    pub fn charts_enabled(&self) -> bool {
        self.inner.charts_enabled
    }

    /// Number of Bootstrap tooltips and popovers still active
    #[wasm_bindgen(js_name = activeWidgets)]
    pub fn active_widgets(&self) -> usize {
        self.inner.widgets.borrow().len()
    }

    /// Show or hide the element with `id`
    #[wasm_bindgen(js_name = toggleCollapsible)]
    pub fn toggle_collapsible(&self, id: &str) -> bool {
        page::toggle_collapsible(&self.inner.document, id, &self.inner.config.elements.hidden_class)
    }

    /// Number of live charts
    #[wasm_bindgen(js_name = liveCharts)]
    pub fn live_charts(&self) -> usize {
        self.inner.registry.borrow().live_count()
    }

    /// Whether the chart in `slot` ("account_type", "owner", "institution")
    /// is live
    #[wasm_bindgen(js_name = isChartLive)]
    pub fn is_chart_live(&self, slot: &str) -> bool {
        ChartSlot::ALL
            .iter()
            .find(|s| s.name() == slot)
            .map(|s| self.inner.registry.borrow().is_live(*s))
            .unwrap_or(false)
    }

    /// Destroy all charts and widgets. Safe to call more than once.
    pub fn dispose(&self) {
        self.inner.registry.borrow_mut().dispose();
        for widget in self.inner.widgets.borrow_mut().drain(..) {
            widget.dispose();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use js_sys::{Function, Object, Reflect};
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn fixture(html: &str) -> Element {
        let root = document().create_element("div").unwrap();
        root.set_inner_html(html);
        document().body().unwrap().append_child(&root).unwrap();
        root
    }

    fn current_path() -> String {
        web_sys::window().unwrap().location().pathname().unwrap()
    }

    const PAGE: &str = r#"<canvas id="accountTypeChart"></canvas>
        <canvas id="ownerChart"></canvas>
        <canvas id="frnChart"></canvas>
        <span id="amount" class="currency-display">2500</span>
        <button data-bs-toggle="tooltip" title="Help">?</button>
        <div class="footer"><span class="text-muted">© 2020 Bank</span></div>"#;

    #[wasm_bindgen_test]
    fn test_mount_off_dashboard_route() {
        let root = fixture(PAGE);
        let config = DashboardConfig {
            dashboard_paths: vec!["/not-the-dashboard".to_string()],
            ..Default::default()
        };

        let dashboard = Dashboard::mount(&root, config).unwrap();
        assert!(!dashboard.charts_enabled());

        // Page formatting still runs on every route
        let amount = root.query_selector("#amount").unwrap().unwrap();
        assert_eq!(amount.text_content().unwrap(), "£2,500.00");

        dashboard.refresh();
        assert_eq!(dashboard.live_charts(), 0);
        assert!(!dashboard.is_chart_live("account_type"));

        dashboard.dispose();
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_mount_without_account_chart() {
        let root = fixture(r#"<canvas id="ownerChart"></canvas>"#);
        let config = DashboardConfig {
            dashboard_paths: vec![current_path()],
            ..Default::default()
        };

        let dashboard = Dashboard::mount(&root, config).unwrap();
        assert!(!dashboard.charts_enabled());
        assert_eq!(dashboard.live_charts(), 0);

        dashboard.dispose();
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_dispose_releases_widgets_and_stops_refresh() {
        let widget = Function::new_with_args(
            "el",
            "this.dispose = function () { el.setAttribute('data-widget', 'disposed'); };",
        );
        let bootstrap = Object::new();
        Reflect::set(&bootstrap, &"Tooltip".into(), &widget).unwrap();
        Reflect::set(&bootstrap, &"Popover".into(), &widget).unwrap();
        Reflect::set(&js_sys::global(), &"bootstrap".into(), &bootstrap).unwrap();

        let root = fixture(PAGE);
        let config = DashboardConfig {
            dashboard_paths: vec!["/not-the-dashboard".to_string()],
            ..Default::default()
        };
        let dashboard = Dashboard::mount(&root, config).unwrap();
        assert_eq!(dashboard.active_widgets(), 1);

        dashboard.dispose();
        assert_eq!(dashboard.active_widgets(), 0);
        let button = root.query_selector("[data-bs-toggle]").unwrap().unwrap();
        assert_eq!(button.get_attribute("data-widget").as_deref(), Some("disposed"));

        // Second dispose and a late refresh are both no-ops
        dashboard.dispose();
        dashboard.refresh();
        assert_eq!(dashboard.live_charts(), 0);

        let global: Object = js_sys::global().unchecked_into();
        Reflect::delete_property(&global, &"bootstrap".into()).unwrap();
        root.remove();
    }
}
