use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Left side panel – navigation
// ---------------------------------------------------------------------------

/// Render the navigation panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Navigation");
    ui.separator();

    for page in Page::ALL {
        ui.selectable_value(&mut state.page, page, page.title());
    }

    ui.separator();
    ui.label(RichText::new(format!("Version: {}", imgo_dashboard::VERSION)).strong());
    match &state.bundle {
        Some(bundle) => {
            ui.label(format!("{} records", bundle.len()));
            ui.label(
                RichText::new(bundle.source_dir().display().to_string())
                    .small()
                    .weak(),
            );
        }
        None => {
            ui.label("No dataset loaded.");
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong("IMGO Demo");
        ui.label("Intelligent Multi-Framework Integrated Ontology-based GraphRAG");

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open sample data folder")
        .set_directory(&state.config.data_dir)
        .pick_folder();

    if let Some(dir) = folder {
        log::info!("Loading data from {}", dir.display());
        state.load_from(&dir);
    }
}
