//! Chart spec building
//!
//! Turns a [`ChartDataset`] into the declarative configuration handed to
//! Chart.js. Everything here is pure: the tooltip and tick text that Chart.js
//! asks for through callbacks is computed up front so the browser glue only
//! has to look it up.

use serde::{Deserialize, Serialize};

use super::dataset::{ChartDataset, ChartKind, ChartSlot};
use super::owner::OwnerCodeMap;
use crate::format::to_fixed_2;

const AXIS_TEXT_COLOR: &str = "#fff";
const GRID_COLOR: &str = "rgba(255, 255, 255, 0.1)";
const BAR_SERIES_LABEL: &str = "Total Balance";

/// Fill and border colour for one palette entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteColor {
    pub fill: String,
    pub border: String,
}

impl PaletteColor {
    pub fn new(fill: impl Into<String>, border: impl Into<String>) -> Self {
        Self {
            fill: fill.into(),
            border: border.into(),
        }
    }
}

/// The eight-colour dashboard palette
pub fn default_palette() -> Vec<PaletteColor> {
    [
        (75, 192, 192),
        (54, 162, 235),
        (255, 206, 86),
        (255, 99, 132),
        (153, 102, 255),
        (255, 159, 64),
        (199, 199, 199),
        (83, 102, 255),
    ]
    .iter()
    .map(|(r, g, b)| {
        PaletteColor::new(
            format!("rgba({}, {}, {}, 0.7)", r, g, b),
            format!("rgba({}, {}, {}, 1)", r, g, b),
        )
    })
    .collect()
}

/// Presentation settings shared by all three builders
#[derive(Debug, Clone, Copy)]
pub struct ChartStyle<'a> {
    pub palette: &'a [PaletteColor],
    pub currency_symbol: &'a str,
}

/// Share of `total` as a whole percentage. A zero total yields 0.
pub fn percentage(value: f64, total: f64) -> i64 {
    if total == 0.0 || !total.is_finite() {
        return 0;
    }
    let pct = (value / total * 100.0).round();
    if pct.is_finite() {
        pct as i64
    } else {
        0
    }
}

/// Tooltip line for one category
pub fn tooltip_label(kind: ChartKind, label: &str, value: f64, total: f64, symbol: &str) -> String {
    if kind.is_circular() {
        format!(
            "{}: {}{} ({}%)",
            label,
            symbol,
            to_fixed_2(value),
            percentage(value, total)
        )
    } else {
        format!("Balance: {}{}", symbol, to_fixed_2(value))
    }
}

/// Y-axis tick text for the bar chart
pub fn tick_label(value: f64, symbol: &str) -> String {
    format!("{}{}", symbol, to_fixed_2(value))
}

/// Declarative Chart.js configuration for one slot
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: SpecData,
    pub options: SpecOptions,

    /// Slot this spec was built for
    #[serde(skip)]
    pub slot: ChartSlot,

    /// Tooltip text per data index
    #[serde(skip)]
    pub tooltip_lines: Vec<String>,

    #[serde(skip)]
    pub currency_symbol: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpecData {
    pub labels: Vec<String>,
    pub datasets: Vec<SpecSeries>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecSeries {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
    pub background_color: Vec<String>,
    pub border_color: Vec<String>,
    pub border_width: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpecOptions {
    pub responsive: bool,
    pub plugins: SpecPlugins,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<SpecScales>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpecPlugins {
    pub legend: SpecLegend,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpecLegend {
    pub display: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<SpecColor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpecColor {
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpecScales {
    pub x: SpecAxis,
    pub y: SpecAxis,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecAxis {
    pub begin_at_zero: bool,
    pub ticks: SpecColor,
    pub grid: SpecColor,
}

impl SpecAxis {
    fn dark(begin_at_zero: bool) -> Self {
        Self {
            begin_at_zero,
            ticks: SpecColor {
                color: AXIS_TEXT_COLOR.to_string(),
            },
            grid: SpecColor {
                color: GRID_COLOR.to_string(),
            },
        }
    }
}

impl ChartSpec {
    /// Build the spec for `slot` from its dataset.
    ///
    /// Owner labels go through [`OwnerCodeMap`]; the other slots keep theirs.
    /// Colours cycle through the palette when there are more categories than
    /// palette entries.
    pub fn build(
        slot: ChartSlot,
        dataset: &ChartDataset,
        style: ChartStyle<'_>,
        owners: &OwnerCodeMap,
    ) -> Self {
        let kind = slot.kind();
        let labels = match slot {
            ChartSlot::Owner => owners.relabel(&dataset.labels),
            _ => dataset.labels.clone(),
        };

        let total = dataset.total();
        let tooltip_lines = dataset
            .values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let label = labels.get(index).map(String::as_str).unwrap_or("");
                tooltip_label(kind, label, *value, total, style.currency_symbol)
            })
            .collect();

        let n = dataset.len();
        let colors: Vec<&PaletteColor> = match kind {
            ChartKind::Bar => style.palette.first().into_iter().cycle().take(n).collect(),
            _ => style.palette.iter().cycle().take(n).collect(),
        };

        let series = SpecSeries {
            label: (kind == ChartKind::Bar).then(|| BAR_SERIES_LABEL.to_string()),
            data: dataset.values.clone(),
            background_color: colors.iter().map(|c| c.fill.clone()).collect(),
            border_color: colors.iter().map(|c| c.border.clone()).collect(),
            border_width: 1,
        };

        let (legend, scales) = match kind {
            ChartKind::Bar => (
                SpecLegend {
                    display: false,
                    position: None,
                    labels: None,
                },
                Some(SpecScales {
                    x: SpecAxis::dark(false),
                    y: SpecAxis::dark(true),
                }),
            ),
            ChartKind::Pie | ChartKind::Doughnut => (
                SpecLegend {
                    display: true,
                    position: Some("right".to_string()),
                    labels: Some(SpecColor {
                        color: AXIS_TEXT_COLOR.to_string(),
                    }),
                },
                None,
            ),
        };

        Self {
            kind,
            data: SpecData {
                labels,
                datasets: vec![series],
            },
            options: SpecOptions {
                responsive: true,
                plugins: SpecPlugins { legend },
                scales,
            },
            slot,
            tooltip_lines,
            currency_symbol: style.currency_symbol.to_string(),
        }
    }

    /// Number of points in the single series
    pub fn series_len(&self) -> usize {
        self.data.datasets.first().map(|s| s.data.len()).unwrap_or(0)
    }

    /// Tooltip text for the point at `index`
    pub fn tooltip_for(&self, index: usize) -> Option<&str> {
        self.tooltip_lines.get(index).map(String::as_str)
    }

    /// Y-axis tick text; only the bar chart has axes
    pub fn tick_label(&self, value: f64) -> String {
        tick_label(value, &self.currency_symbol)
    }

    pub fn has_axes(&self) -> bool {
        self.options.scales.is_some()
    }

    /// Chart.js configuration as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(slot: ChartSlot, dataset: &ChartDataset) -> ChartSpec {
        let palette = default_palette();
        let style = ChartStyle {
            palette: &palette,
            currency_symbol: "£",
        };
        ChartSpec::build(slot, dataset, style, &OwnerCodeMap)
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(25.0, 100.0), 25);
        assert_eq!(percentage(1.0, 3.0), 33);
        assert_eq!(percentage(2.0, 3.0), 67);
        assert_eq!(percentage(100.0, 100.0), 100);
    }

    #[test]
    fn test_percentage_zero_total() {
        assert_eq!(percentage(0.0, 0.0), 0);
        assert_eq!(percentage(5.0, 0.0), 0);
    }

    #[test]
    fn test_circular_tooltip() {
        let line = tooltip_label(ChartKind::Pie, "Savings", 1500.0, 6000.0, "£");
        assert_eq!(line, "Savings: £1500.00 (25%)");

        let line = tooltip_label(ChartKind::Doughnut, "Owner A", 0.0, 0.0, "£");
        assert_eq!(line, "Owner A: £0.00 (0%)");
    }

    #[test]
    fn test_bar_tooltip_and_ticks() {
        assert_eq!(
            tooltip_label(ChartKind::Bar, "123456", 4000.5, 4000.5, "£"),
            "Balance: £4000.50"
        );
        assert_eq!(tick_label(2500.0, "£"), "£2500.00");
    }

    #[test]
    fn test_tooltip_ties_round_up() {
        assert_eq!(
            tooltip_label(ChartKind::Bar, "204514", 0.625, 0.625, "£"),
            "Balance: £0.63"
        );
        assert_eq!(
            tooltip_label(ChartKind::Pie, "ISA", 1.125, 4.5, "£"),
            "ISA: £1.13 (25%)"
        );
        assert_eq!(tick_label(10.125, "£"), "£10.13");
        assert_eq!(tick_label(-0.0, "£"), "£0.00");
    }

    #[test]
    fn test_series_length_matches_dataset() {
        for n in [0usize, 1, 8, 13] {
            let dataset = ChartDataset::from_pairs((0..n).map(|i| (format!("c{}", i), i as f64)));
            for slot in ChartSlot::ALL {
                let spec = build(slot, &dataset);
                assert_eq!(spec.series_len(), n);
                assert_eq!(spec.data.labels.len(), n);
                assert_eq!(spec.tooltip_lines.len(), n);
            }
        }
    }

    #[test]
    fn test_palette_wraps() {
        let dataset = ChartDataset::from_pairs((0..10).map(|i| (format!("t{}", i), 1.0)));
        let spec = build(ChartSlot::AccountType, &dataset);
        let colors = &spec.data.datasets[0].background_color;

        assert_eq!(colors.len(), 10);
        assert_eq!(colors[8], colors[0]);
        assert_eq!(colors[9], colors[1]);
        assert_ne!(colors[0], colors[1]);
    }

    #[test]
    fn test_owner_labels_remapped() {
        let dataset = ChartDataset::from_pairs([("a", 300.0), ("j", 100.0), ("x", 0.0)]);

        let spec = build(ChartSlot::Owner, &dataset);
        assert_eq!(spec.data.labels, vec!["Owner A", "Owner J", "x"]);
        assert_eq!(spec.tooltip_for(0), Some("Owner A: £300.00 (75%)"));
        assert_eq!(spec.tooltip_for(2), Some("x: £0.00 (0%)"));

        let spec = build(ChartSlot::AccountType, &dataset);
        assert_eq!(spec.data.labels, vec!["a", "j", "x"]);
    }

    #[test]
    fn test_bar_spec_shape() {
        let dataset = ChartDataset::from_pairs([("111111", 10.0), ("222222", 20.0)]);
        let spec = build(ChartSlot::Institution, &dataset);

        assert!(spec.has_axes());
        assert_eq!(spec.tooltip_for(1), Some("Balance: £20.00"));
        assert_eq!(spec.tick_label(5.0), "£5.00");

        let json: serde_json::Value = serde_json::from_str(&spec.to_json().unwrap()).unwrap();
        assert_eq!(json["type"], "bar");
        assert_eq!(json["options"]["plugins"]["legend"]["display"], false);
        assert_eq!(json["options"]["scales"]["y"]["beginAtZero"], true);
        assert_eq!(json["data"]["datasets"][0]["label"], "Total Balance");
        assert_eq!(
            json["data"]["datasets"][0]["backgroundColor"][1],
            "rgba(75, 192, 192, 0.7)"
        );
    }

    #[test]
    fn test_pie_spec_json() {
        let dataset = ChartDataset::from_pairs([("Savings", 1.0)]);
        let spec = build(ChartSlot::AccountType, &dataset);
        let json: serde_json::Value = serde_json::from_str(&spec.to_json().unwrap()).unwrap();

        assert_eq!(json["type"], "pie");
        assert_eq!(json["options"]["plugins"]["legend"]["position"], "right");
        assert!(json["options"].get("scales").is_none());
        assert!(json["data"]["datasets"][0].get("label").is_none());
        assert_eq!(json["data"]["datasets"][0]["borderWidth"], 1);
    }

    #[test]
    fn test_missing_label_renders_empty() {
        let dataset = ChartDataset::new(vec![], vec![5.0]);
        let spec = build(ChartSlot::AccountType, &dataset);
        assert_eq!(spec.tooltip_for(0), Some(": £5.00 (100%)"));
    }
}
