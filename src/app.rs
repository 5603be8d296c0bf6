use eframe::egui::{self, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SpacexDashApp {
    pub state: AppState,
}

impl SpacexDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SpacexDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: site and payload selectors ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: both charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.vertical_centered(|ui: &mut Ui| {
                        ui.heading(
                            egui::RichText::new(&self.state.config.window_title)
                                .size(32.0)
                                .color(egui::Color32::from_rgb(0x50, 0x3D, 0x36)),
                        );
                    });
                    ui.separator();

                    plot::success_pie_chart(ui, &self.state, 320.0);
                    ui.add_space(16.0);
                    plot::success_payload_scatter_chart(ui, &self.state, 360.0);

                    if self.state.show_rows {
                        ui.add_space(16.0);
                        ui.strong(format!("{} selected launches", self.state.scatter().rows.len()));
                        panels::rows_table(ui, &self.state);
                    }
                });
        });
    }
}
