use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::data::aggregate::PieData;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Pie geometry
// ---------------------------------------------------------------------------

/// One drawn pie slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub label: String,
    pub fraction: f64,
    /// Start angle in radians, counter-clockwise from +x.
    pub start: f64,
    /// Signed sweep in radians; negative runs clockwise.
    pub sweep: f64,
}

impl Wedge {
    /// The outline cut into pieces of at most a quarter turn each, since
    /// the plot only fills convex polygons.
    pub fn convex_parts(&self, radius: f64) -> Vec<Vec<[f64; 2]>> {
        let n = (self.sweep.abs() / FRAC_PI_2 - 1e-9).ceil().max(1.0) as usize;
        let part_sweep = self.sweep / n as f64;
        (0..n)
            .map(|i| {
                let start = self.start + part_sweep * i as f64;
                arc_polygon(start, part_sweep, self.fraction / n as f64, radius)
            })
            .collect()
    }

    /// Where to put the percentage label.
    pub fn label_anchor(&self, radius: f64) -> [f64; 2] {
        let mid = self.start + self.sweep / 2.0;
        [radius * mid.cos(), radius * mid.sin()]
    }
}

fn arc_polygon(start: f64, sweep: f64, fraction: f64, radius: f64) -> Vec<[f64; 2]> {
    let segments = ((fraction * 96.0).ceil() as usize).max(2);
    std::iter::once([0.0, 0.0])
        .chain((0..=segments).map(|i| {
            let a = start + sweep * i as f64 / segments as f64;
            [radius * a.cos(), radius * a.sin()]
        }))
        .collect()
}

/// Lay slices out clockwise from twelve o'clock. Zero slices take no
/// space and are skipped; an all-zero pie has no wedges.
pub fn pie_wedges(pie: &PieData) -> Vec<Wedge> {
    let total = pie.total();
    if total == 0 {
        return Vec::new();
    }

    let mut angle = FRAC_PI_2;
    let mut wedges = Vec::new();
    for slice in pie.slices.iter().filter(|s| s.count > 0) {
        let fraction = slice.count as f64 / total as f64;
        let sweep = -fraction * TAU;
        wedges.push(Wedge {
            label: slice.key.to_string(),
            fraction,
            start: angle,
            sweep,
        });
        angle += sweep;
    }
    wedges
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

pub fn success_pie_chart(ui: &mut Ui, state: &AppState, height: f32) {
    let pie = state.pie();
    ui.heading(pie.title.as_str());

    let wedges = pie_wedges(pie);
    if wedges.is_empty() {
        ui.label("No launches for this selection.");
    }

    Plot::new("success-pie-chart")
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            for w in &wedges {
                let color = state.pie_colors.color_for(&w.label);
                // Parts share a name, so the legend shows one entry per wedge.
                for part in w.convex_parts(1.0) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(part))
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, color))
                            .name(&w.label),
                    );
                }
            }
            for w in &wedges {
                let [x, y] = w.label_anchor(0.65);
                plot_ui.text(
                    Text::new(PlotPoint::new(x, y), format!("{:.1}%", w.fraction * 100.0))
                        .color(Color32::WHITE),
                );
            }
        });
}

pub fn success_payload_scatter_chart(ui: &mut Ui, state: &AppState, height: f32) {
    let scatter = state.scatter();
    ui.heading(scatter.title.as_str());

    let cfg = &state.config;
    Plot::new("success-payload-scatter-chart")
        .height(height)
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_x(cfg.slider_min)
        .include_x(cfg.slider_max)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &scatter.series {
                plot_ui.points(
                    Points::new(PlotPoints::from(series.points.clone()))
                        .name(&series.category)
                        .color(state.category_colors.color_for(&series.category))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });
}
