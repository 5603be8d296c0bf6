use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::aggregate::{outcome_counts, PieData};
use crate::data::catalog::{site_options, SiteOption};
use crate::data::filter::{scatter_points, ScatterData};
use crate::data::model::{LaunchTable, PayloadBounds, PayloadRange, SiteSelection};
use crate::export::ChartSnapshot;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The launch table is shared and read-only. The selection (site and
/// payload range) is the only thing that changes; the two chart datasets
/// are derived from it and only ever replaced through [`AppState::set_site`]
/// and [`AppState::set_payload_range`].
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded launch records.
    pub table: Arc<LaunchTable>,

    /// Options of the site selector (computed once).
    pub site_options: Vec<SiteOption>,

    /// Payload min/max over the whole table (computed once).
    pub bounds: Option<PayloadBounds>,

    site: SiteSelection,
    range: PayloadRange,

    pie: PieData,
    scatter: ScatterData,

    pub pie_colors: ColorMap,
    /// Keyed by every booster category in the table, so colours stay put
    /// while the selection changes.
    pub category_colors: ColorMap,

    pie_recomputes: usize,
    scatter_recomputes: usize,

    /// Whether the table of scatter rows is expanded.
    pub show_rows: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Initial state: every site selected, range seeded from the payload
    /// bounds (or the full selector domain for an empty table).
    pub fn new(table: Arc<LaunchTable>, config: DashboardConfig) -> Self {
        let site_options = site_options(&table);
        let bounds = table.payload_bounds();
        let range = bounds
            .map(PayloadRange::from)
            .unwrap_or_else(|| PayloadRange::new(config.slider_min, config.slider_max));
        let site = SiteSelection::All;

        let pie = outcome_counts(&table, &site);
        let scatter = scatter_points(&table, range, &site);
        let pie_colors = pie_color_map(&pie);
        let category_colors =
            ColorMap::new(table.iter().map(|r| r.booster_version_category.as_str()));

        Self {
            config,
            table,
            site_options,
            bounds,
            site,
            range,
            pie,
            scatter,
            pie_colors,
            category_colors,
            pie_recomputes: 0,
            scatter_recomputes: 0,
            show_rows: false,
            status_message: None,
        }
    }

    pub fn site(&self) -> &SiteSelection {
        &self.site
    }

    pub fn payload_range(&self) -> PayloadRange {
        self.range
    }

    pub fn pie(&self) -> &PieData {
        &self.pie
    }

    pub fn scatter(&self) -> &ScatterData {
        &self.scatter
    }

    /// How many times each chart dataset has been rebuilt since startup.
    pub fn recompute_counts(&self) -> (usize, usize) {
        (self.pie_recomputes, self.scatter_recomputes)
    }

    /// Site selector changed: both charts depend on it.
    pub fn set_site(&mut self, value: &str) {
        let site = SiteSelection::from_value(value);
        if site == self.site {
            return;
        }
        log::debug!("site selection: {} -> {}", self.site, site);
        self.site = site;
        self.refresh_pie();
        self.refresh_scatter();
    }

    /// Payload selector changed: only the scatter depends on it.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if range == self.range {
            return;
        }
        log::debug!(
            "payload range: [{}, {}] -> [{}, {}]",
            self.range.low,
            self.range.high,
            range.low,
            range.high
        );
        self.range = range;
        self.refresh_scatter();
    }

    fn refresh_pie(&mut self) {
        self.pie = outcome_counts(&self.table, &self.site);
        self.pie_colors = pie_color_map(&self.pie);
        self.pie_recomputes += 1;
    }

    fn refresh_scatter(&mut self) {
        self.scatter = scatter_points(&self.table, self.range, &self.site);
        self.scatter_recomputes += 1;
    }

    pub fn snapshot(&self) -> ChartSnapshot<'_> {
        ChartSnapshot {
            site: self.site.value(),
            payload_range: self.range,
            pie: &self.pie,
            scatter: &self.scatter,
        }
    }
}

fn pie_color_map(pie: &PieData) -> ColorMap {
    let labels: Vec<String> = pie.slices.iter().map(|s| s.key.to_string()).collect();
    ColorMap::new(labels.iter().map(String::as_str))
}
