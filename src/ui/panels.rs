use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

/// A selection change requested by a widget, applied once the widgets are done
/// borrowing the state.
enum FilterAction {
    Category(String),
    Toggle(String),
    All,
    None,
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let (Some(dataset), Some(filters)) = (&state.dataset, &state.filters) else {
        ui.label("No dataset loaded.");
        return;
    };

    let mut action = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- (1) Category dropdown ----
            ui.strong("Select a Category");
            egui::ComboBox::from_id_salt("category")
                .selected_text(&filters.category)
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    for category in &dataset.categories {
                        if ui
                            .selectable_label(filters.category == *category, category)
                            .clicked()
                        {
                            action = Some(FilterAction::Category(category.clone()));
                        }
                    }
                });
            ui.separator();

            // ---- (2) Sub-category multi-select ----
            let options = dataset.sub_categories_of(&filters.category);
            ui.strong(format!(
                "Select a Sub Category  ({}/{})",
                filters.sub_categories.len(),
                options.len()
            ));
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    action = Some(FilterAction::All);
                }
                if ui.small_button("None").clicked() {
                    action = Some(FilterAction::None);
                }
            });

            for sub in options {
                let mut checked = filters.sub_categories.contains(sub);
                let text = RichText::new(sub).color(state.color_map.color_for(sub));
                if ui.checkbox(&mut checked, text).changed() {
                    action = Some(FilterAction::Toggle(sub.clone()));
                }
            }
        });

    match action {
        Some(FilterAction::Category(category)) => state.select_category(&category),
        Some(FilterAction::Toggle(sub)) => state.toggle_sub_category(&sub),
        Some(FilterAction::All) => state.select_all(),
        Some(FilterAction::None) => state.select_none(),
        None => {}
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(view)) = (&state.dataset, &state.view) {
            let selected = view
                .selection_summary()
                .map(|s| s.rows.to_string())
                .unwrap_or_else(|| "no".to_string());
            ui.label(format!(
                "{} orders loaded, {} in category, {} selected",
                ds.len(),
                view.category_rows,
                selected
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sales data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}
