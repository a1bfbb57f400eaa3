//! Chart slot registry
//!
//! Owns the live chart instance of each slot. A refresh is always a full
//! destroy + recreate: the previous instance is released before its
//! replacement is built, so a slot never holds more than one live chart.

use super::dataset::{ChartData, ChartDataset, ChartSlot};
use super::error::{ChartError, ChartResult};
use super::owner::OwnerCodeMap;
use super::spec::{ChartSpec, ChartStyle, PaletteColor};
use crate::config::DashboardConfig;

/// Rendering library that actually draws charts
pub trait ChartBackend {
    /// Live chart instance
    type Handle;

    /// Whether the page has a mount point for `slot`
    fn has_mount(&self, slot: ChartSlot) -> bool;

    /// Create a chart from `spec` on the slot's mount point
    fn create(&mut self, spec: &ChartSpec) -> ChartResult<Self::Handle>;

    /// Release every resource held by `handle`
    fn destroy(&mut self, handle: Self::Handle);
}

/// Slot -> live chart mapping with an explicit lifecycle
pub struct ChartRegistry<B: ChartBackend> {
    backend: B,
    slots: [Option<B::Handle>; 3],
    palette: Vec<PaletteColor>,
    currency_symbol: String,
    owners: OwnerCodeMap,
    disposed: bool,
}

impl<B: ChartBackend> ChartRegistry<B> {
    /// Create an empty registry drawing through `backend`
    pub fn new(backend: B, config: &DashboardConfig) -> Self {
        Self {
            backend,
            slots: [None, None, None],
            palette: config.palette.clone(),
            currency_symbol: config.currency_symbol.clone(),
            owners: OwnerCodeMap,
            disposed: false,
        }
    }

    /// Spec that [`render`](Self::render) would hand to the backend
    pub fn build_spec(&self, slot: ChartSlot, dataset: &ChartDataset) -> ChartSpec {
        let style = ChartStyle {
            palette: &self.palette,
            currency_symbol: &self.currency_symbol,
        };
        ChartSpec::build(slot, dataset, style, &self.owners)
    }

    /// Replace the chart in `slot` with one built from `dataset`.
    ///
    /// If the backend fails to create the replacement the slot is left empty;
    /// the old instance has already been released at that point.
    pub fn render(&mut self, slot: ChartSlot, dataset: &ChartDataset) -> ChartResult<()> {
        if self.disposed {
            tracing::debug!(%slot, "Registry disposed, dropping render");
            return Ok(());
        }

        if !self.backend.has_mount(slot) {
            return Err(ChartError::MissingMount(slot));
        }

        if let Some(previous) = self.slots[slot.index()].take() {
            tracing::debug!(%slot, "Destroying previous chart");
            self.backend.destroy(previous);
        }

        let spec = self.build_spec(slot, dataset);
        let handle = self.backend.create(&spec)?;
        tracing::debug!(%slot, points = spec.series_len(), "Chart created");

        self.slots[slot.index()] = Some(handle);
        Ok(())
    }

    /// Render every slot that has a mount point. Failures are returned (and
    /// logged) and leave the other slots unaffected; slots without a mount
    /// point are skipped.
    pub fn render_all(&mut self, data: &ChartData) -> Vec<ChartError> {
        if self.disposed {
            tracing::debug!("Registry disposed, dropping chart data");
            return Vec::new();
        }

        let mut failures = Vec::new();

        for slot in ChartSlot::ALL {
            match self.render(slot, data.dataset(slot)) {
                Ok(()) => {}
                Err(ChartError::MissingMount(_)) => {
                    tracing::debug!(%slot, "No mount point, skipping");
                }
                Err(e) => {
                    tracing::warn!(%slot, error = %e, "Failed to render chart");
                    failures.push(e);
                }
            }
        }

        failures
    }

    /// Apply the outcome of one chart data load.
    ///
    /// A successful load re-renders every slot and returns the per-slot
    /// failures. A failed load is handed back untouched and leaves the live
    /// charts exactly as they were. Once disposed, any outcome is dropped.
    pub fn apply_load<E>(&mut self, outcome: Result<ChartData, E>) -> Result<Vec<ChartError>, E>
    where
        E: std::fmt::Display,
    {
        if self.disposed {
            tracing::debug!("Registry disposed, dropping load outcome");
            return Ok(Vec::new());
        }

        match outcome {
            Ok(data) => Ok(self.render_all(&data)),
            Err(e) => {
                tracing::warn!(error = %e, live = self.live_count(), "Chart data load failed, keeping current charts");
                Err(e)
            }
        }
    }

    /// Whether `slot` currently holds a live chart
    pub fn is_live(&self, slot: ChartSlot) -> bool {
        self.slots[slot.index()].is_some()
    }

    /// Number of live charts across all slots
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Destroy every live chart. Later renders are ignored.
    pub fn dispose(&mut self) {
        for slot in ChartSlot::ALL {
            if let Some(handle) = self.slots[slot.index()].take() {
                self.backend.destroy(handle);
            }
        }
        self.disposed = true;
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
