//! Chart.js Backend
//!
//! Draws [`ChartSpec`]s with the page's global `Chart` constructor. Tooltip
//! and tick callbacks are Rust closures reading text precomputed in the spec;
//! they live exactly as long as the chart instance that uses them.

use bankdash::charts::{ChartBackend, ChartError, ChartResult, ChartSlot, ChartSpec};
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

type Callback = Closure<dyn Fn(JsValue) -> JsValue>;

/// Chart.js-backed [`ChartBackend`] over the page's three canvases
pub struct ChartJsBackend {
    canvases: [Option<HtmlCanvasElement>; 3],
}

/// A live Chart.js chart and the callbacks it was configured with
pub struct ChartJsInstance {
    chart: JsValue,
    _callbacks: Vec<Callback>,
}

impl ChartJsBackend {
    /// Canvases indexed by [`ChartSlot::index`]
    pub fn new(canvases: [Option<HtmlCanvasElement>; 3]) -> Self {
        Self { canvases }
    }
}

impl ChartBackend for ChartJsBackend {
    type Handle = ChartJsInstance;

    fn has_mount(&self, slot: ChartSlot) -> bool {
        self.canvases[slot.index()].is_some()
    }

    fn create(&mut self, spec: &ChartSpec) -> ChartResult<ChartJsInstance> {
        let slot = spec.slot;
        let backend_err = |message: String| ChartError::Backend { slot, message };

        let canvas = self.canvases[slot.index()]
            .as_ref()
            .ok_or(ChartError::MissingMount(slot))?;

        let ctx = canvas
            .get_context("2d")
            .map_err(|e| backend_err(js_message(&e)))?
            .ok_or_else(|| backend_err("no 2d context".to_string()))?;

        let json = spec.to_json().map_err(|e| backend_err(e.to_string()))?;
        let config = js_sys::JSON::parse(&json).map_err(|e| backend_err(js_message(&e)))?;

        let mut callbacks = Vec::new();

        let lines = spec.tooltip_lines.clone();
        let tooltip: Callback = Closure::new(move |context: JsValue| {
            Reflect::get(&context, &JsValue::from_str("dataIndex"))
                .ok()
                .and_then(|index| index.as_f64())
                .and_then(|index| lines.get(index as usize))
                .map(|line| JsValue::from_str(line))
                .unwrap_or(JsValue::UNDEFINED)
        });
        set_path(
            &config,
            &["options", "plugins", "tooltip", "callbacks", "label"],
            tooltip.as_ref(),
        )
        .map_err(|e| backend_err(js_message(&e)))?;
        callbacks.push(tooltip);

        if spec.has_axes() {
            let symbol = spec.currency_symbol.clone();
            let ticks: Callback = Closure::new(move |value: JsValue| {
                JsValue::from_str(&bankdash::charts::tick_label(
                    value.as_f64().unwrap_or(0.0),
                    &symbol,
                ))
            });
            set_path(&config, &["options", "scales", "y", "ticks", "callback"], ticks.as_ref())
                .map_err(|e| backend_err(js_message(&e)))?;
            callbacks.push(ticks);
        }

        let constructor = Reflect::get(&js_sys::global(), &JsValue::from_str("Chart"))
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok())
            .ok_or_else(|| backend_err("Chart.js is not loaded".to_string()))?;

        let chart = Reflect::construct(&constructor, &Array::of2(&ctx, &config))
            .map_err(|e| backend_err(js_message(&e)))?;

        Ok(ChartJsInstance {
            chart,
            _callbacks: callbacks,
        })
    }

    fn destroy(&mut self, handle: ChartJsInstance) {
        let destroy = Reflect::get(&handle.chart, &JsValue::from_str("destroy"))
            .and_then(|value| value.dyn_into::<Function>());

        match destroy {
            Ok(destroy) => {
                if let Err(e) = destroy.call0(&handle.chart) {
                    web_sys::console::warn_1(
                        &format!("Failed to destroy chart: {}", js_message(&e)).into(),
                    );
                }
            }
            Err(_) => web_sys::console::warn_1(&"Chart instance has no destroy()".into()),
        }
    }
}

/// Set `value` at a nested property path, creating intermediate objects
fn set_path(target: &JsValue, path: &[&str], value: &JsValue) -> Result<(), JsValue> {
    let (last, parents) = path
        .split_last()
        .ok_or_else(|| JsValue::from_str("empty property path"))?;

    let mut node = target.clone();
    for key in parents {
        let key = JsValue::from_str(key);
        let mut child = Reflect::get(&node, &key)?;
        if !child.is_object() {
            child = Object::new().into();
            Reflect::set(&node, &key, &child)?;
        }
        node = child;
    }

    Reflect::set(&node, &JsValue::from_str(last), value)?;
    Ok(())
}

/// Best-effort text for a thrown JS value
pub(crate) fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value))
}
