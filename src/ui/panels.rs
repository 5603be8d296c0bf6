use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::config::mark_label;
use crate::data::model::PayloadRange;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection controls
// ---------------------------------------------------------------------------

/// Render the site selector and the payload range selector.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    site_dropdown(ui, state);
    ui.add_space(12.0);
    payload_slider(ui, state);
}

fn site_dropdown(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Launch site:");

    let current = state.site().value().to_string();
    let selected_text = state
        .site_options
        .iter()
        .find(|o| o.value == current)
        .map(|o| o.label.clone())
        .unwrap_or_else(|| current.clone());

    let mut picked: Option<String> = None;
    egui::ComboBox::from_id_salt("site-dropdown")
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for opt in &state.site_options {
                if ui
                    .selectable_label(opt.value == current, opt.label.as_str())
                    .clicked()
                {
                    picked = Some(opt.value.clone());
                }
            }
        });

    if let Some(value) = picked {
        state.set_site(&value);
    }
}

/// Two handles over the configured domain. Moving one handle past the
/// other drags the other along, so the pair never inverts.
fn payload_slider(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Payload range (Kg):");

    let cfg = &state.config;
    let domain = cfg.slider_min..=cfg.slider_max;
    let step = cfg.slider_step;
    let marks = cfg.slider_marks();

    let PayloadRange { mut low, mut high } = state.payload_range();

    let low_changed = ui
        .add(
            egui::Slider::new(&mut low, domain.clone())
                .step_by(step)
                .custom_formatter(|v, _| mark_label(v))
                .text("min"),
        )
        .changed();
    let high_changed = ui
        .add(
            egui::Slider::new(&mut high, domain)
                .step_by(step)
                .custom_formatter(|v, _| mark_label(v))
                .text("max"),
        )
        .changed();

    // Tick labels at every step.
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (_, label) in &marks {
            ui.label(RichText::new(label).small().weak());
        }
    });

    if low_changed || high_changed {
        state.set_payload_range(PayloadRange::drag(low, high, low_changed, high_changed));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Data", |ui: &mut Ui| {
            if ui.button("Copy chart data (JSON)").clicked() {
                copy_snapshot(ui, state);
                ui.close_menu();
            }
            if ui.checkbox(&mut state.show_rows, "Show selected rows").clicked() {
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} launches, {} sites, {} in scatter",
            state.table.len(),
            state.site_options.len().saturating_sub(1),
            state.scatter().rows.len()
        ));

        if let Some(b) = state.bounds {
            ui.separator();
            ui.label(format!("payload {} – {} kg", b.min, b.max));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

fn copy_snapshot(ui: &Ui, state: &mut AppState) {
    let json = state.snapshot().to_json();
    match json {
        Ok(json) => {
            ui.ctx().copy_text(json);
            state.status_message = None;
        }
        Err(e) => {
            log::warn!("Failed to serialize chart data: {e}");
            state.status_message = Some(format!("Copy failed: {e}"));
        }
    }
}

// ---------------------------------------------------------------------------
// Rows behind the scatter chart
// ---------------------------------------------------------------------------

pub fn rows_table(ui: &mut Ui, state: &AppState) {
    let rows = &state.scatter().rows;
    let records = &state.table.records;

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(50.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::remainder().at_least(40.0))
        .header(20.0, |mut header| {
            for title in ["Flight", "Launch Site", "Payload (kg)", "Booster", "Category", "class"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let r = &records[rows[row.index()]];
                row.col(|ui: &mut Ui| {
                    ui.label(r.flight_number.map(|n| n.to_string()).unwrap_or_default());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(r.launch_site.as_str());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.1}", r.payload_mass_kg));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(r.booster_version.as_deref().unwrap_or(""));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(
                        RichText::new(&r.booster_version_category)
                            .color(state.category_colors.color_for(&r.booster_version_category)),
                    );
                });
                row.col(|ui: &mut Ui| {
                    ui.label(r.class.to_string());
                });
            });
        });
}
