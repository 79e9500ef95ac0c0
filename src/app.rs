use eframe::egui;

use crate::state::{AppState, Page};
use crate::ui::{panels, views};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: navigation ----
        egui::SidePanel::left("nav_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: selected page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| self.show_page(ui));
        });
    }
}

impl DashboardApp {
    fn show_page(&mut self, ui: &mut egui::Ui) {
        let state = &mut self.state;
        if state.page == Page::About {
            views::about(ui);
            return;
        }

        let Some(bundle) = &state.bundle else {
            ui.centered_and_justified(|ui| {
                ui.heading("Failed to load data. Check the data folder (File → Open data folder…)");
            });
            return;
        };

        ui.label(
            egui::RichText::new(views::demo_notice(bundle))
                .color(egui::Color32::from_rgb(0xb2, 0x6b, 0x00)),
        );
        ui.add_space(4.0);

        let buckets = state.config.histogram_buckets;
        match state.page {
            Page::Overview => views::overview(ui, bundle, buckets),
            Page::Controls => views::controls(ui, bundle, &mut state.controls_view),
            Page::Techniques => views::techniques(ui, bundle, &mut state.tactic),
            Page::Requirements => {
                views::requirements(ui, bundle, &mut state.requirement_category)
            }
            Page::Relationships => {
                views::relationships(ui, bundle, &mut state.relationships_view, buckets)
            }
            Page::KnowledgePaths => views::knowledge_paths(ui, bundle, &mut state.selected_path),
            Page::About => {}
        }
    }
}
