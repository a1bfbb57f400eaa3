//! Page Formatter
//!
//! One-time DOM pass on mount: currency displays, footer year and Bootstrap
//! widgets. Plus the collapsible and confirmation helpers the host page calls
//! from its own event handlers.

use bankdash::charts::ChartSlot;
use bankdash::config::DashboardConfig;
use bankdash::format::{format_currency_text, replace_first_year};
use js_sys::{Array, Function, Reflect};
use std::borrow::Cow;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement};

use crate::chartjs::js_message;

/// DOM elements the dashboard works with, looked up once at mount
pub struct PageElements {
    /// Chart canvases indexed by [`ChartSlot::index`]
    pub canvases: [Option<HtmlCanvasElement>; 3],
    /// Footer text holding the year
    pub footer: Option<Element>,
}

impl PageElements {
    /// Resolve every element of the page contract under `root`, logging the
    /// ones that are missing
    pub fn resolve(document: &Document, root: &Element, config: &DashboardConfig) -> Self {
        let canvases = ChartSlot::ALL.map(|slot| {
            let id = config.elements.chart_id(slot);
            find_canvas(document, root, id)
        });

        let has_account_chart = canvases[ChartSlot::AccountType.index()].is_some();
        if has_account_chart {
            for slot in ChartSlot::ALL {
                if canvases[slot.index()].is_none() {
                    web_sys::console::warn_1(
                        &format!(
                            "Chart mount #{} not found, {} chart disabled",
                            config.elements.chart_id(slot),
                            slot
                        )
                        .into(),
                    );
                }
            }
        }

        let footer = root
            .query_selector(&config.elements.footer_selector)
            .ok()
            .flatten();
        if footer.is_none() {
            web_sys::console::debug_1(
                &format!("No footer element ({})", config.elements.footer_selector).into(),
            );
        }

        Self { canvases, footer }
    }

    /// Whether the account-type chart can be drawn (the chart-load gate)
    pub fn has_account_chart(&self) -> bool {
        self.canvases[ChartSlot::AccountType.index()].is_some()
    }
}

fn find_canvas(document: &Document, root: &Element, id: &str) -> Option<HtmlCanvasElement> {
    let element = document.get_element_by_id(id)?;
    if !root.contains(Some(&element)) {
        return None;
    }

    match element.dyn_into::<HtmlCanvasElement>() {
        Ok(canvas) => Some(canvas),
        Err(_) => {
            web_sys::console::warn_1(&format!("#{} is not a canvas", id).into());
            None
        }
    }
}

/// Rewrite every currency display under `root` in canonical form. Text that
/// does not start with a number is left alone. Returns how many were
/// rewritten.
pub fn format_currency_displays(root: &Element, config: &DashboardConfig) -> u32 {
    let selector = format!(".{}", config.elements.currency_class);
    let nodes = match root.query_selector_all(&selector) {
        Ok(nodes) => nodes,
        Err(e) => {
            web_sys::console::warn_1(&format!("Bad currency selector: {}", js_message(&e)).into());
            return 0;
        }
    };

    let mut formatted = 0;
    for i in 0..nodes.length() {
        let Some(node) = nodes.item(i) else { continue };
        let text = node.text_content().unwrap_or_default();

        if let Some(currency) = format_currency_text(&text, &config.currency_symbol) {
            node.set_text_content(Some(&currency));
            formatted += 1;
        }
    }

    formatted
}

/// Put `year` in place of the first four-digit run of the footer text.
/// Returns whether the text changed.
pub fn update_footer_year(footer: Option<&Element>, year: i32) -> bool {
    let Some(footer) = footer else {
        return false;
    };

    let text = footer.text_content().unwrap_or_default();
    match replace_first_year(&text, year) {
        Cow::Owned(updated) if updated != text => {
            footer.set_text_content(Some(&updated));
            true
        }
        _ => false,
    }
}

/// Current calendar year in the browser's local time
pub fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Local::now().year()
}

/// An activated Bootstrap tooltip or popover
pub struct Widget {
    instance: JsValue,
}

impl Widget {
    /// Remove the widget's listeners and markup
    pub fn dispose(&self) {
        let dispose = Reflect::get(&self.instance, &JsValue::from_str("dispose"))
            .and_then(|value| value.dyn_into::<Function>());

        if let Ok(dispose) = dispose {
            if let Err(e) = dispose.call0(&self.instance) {
                web_sys::console::warn_1(
                    &format!("Failed to dispose widget: {}", js_message(&e)).into(),
                );
            }
        }
    }
}

/// Activate every `data-bs-toggle="tooltip"` and `"popover"` element under
/// `root`.
///
/// Running this twice over the same DOM binds every element twice; the
/// [`Dashboard`](crate::Dashboard) runs it once per mount and disposes the
/// widgets on unmount.
pub fn activate_widgets(root: &Element) -> Vec<Widget> {
    let bootstrap = match Reflect::get(&js_sys::global(), &JsValue::from_str("bootstrap")) {
        Ok(value) if value.is_object() => value,
        _ => {
            web_sys::console::warn_1(&"Bootstrap is not loaded, tooltips and popovers skipped".into());
            return Vec::new();
        }
    };

    let mut widgets = Vec::new();

    for (toggle, constructor_name) in [("tooltip", "Tooltip"), ("popover", "Popover")] {
        let constructor = match Reflect::get(&bootstrap, &JsValue::from_str(constructor_name))
            .and_then(|value| value.dyn_into::<Function>())
        {
            Ok(constructor) => constructor,
            Err(_) => {
                web_sys::console::warn_1(&format!("bootstrap.{} missing", constructor_name).into());
                continue;
            }
        };

        let selector = format!("[data-bs-toggle=\"{}\"]", toggle);
        let Ok(nodes) = root.query_selector_all(&selector) else {
            continue;
        };

        for i in 0..nodes.length() {
            let Some(node) = nodes.item(i) else { continue };
            match Reflect::construct(&constructor, &Array::of1(&node)) {
                Ok(instance) => widgets.push(Widget { instance }),
                Err(e) => web_sys::console::warn_1(
                    &format!("Failed to create {}: {}", constructor_name, js_message(&e)).into(),
                ),
            }
        }
    }

    widgets
}

/// Flip `hidden_class` on the element with `id`. Returns `false` when there
/// is no such element.
pub fn toggle_collapsible(document: &Document, id: &str, hidden_class: &str) -> bool {
    match document.get_element_by_id(id) {
        Some(element) => element.class_list().toggle(hidden_class).is_ok(),
        None => false,
    }
}

/// Blocking confirmation prompt. A prompt that cannot be shown counts as
/// "cancel".
pub fn confirm_action(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}
