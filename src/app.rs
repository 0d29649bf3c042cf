use std::path::PathBuf;

use eframe::egui::{self, ScrollArea, Ui};

use crate::data::pipeline::SelectionView;
use crate::state::AppState;
use crate::ui::{metrics, panels, plot, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct SalesDashboardApp {
    pub state: AppState,
}

impl SalesDashboardApp {
    /// Start the app, opening `initial` right away when given.
    pub fn new(initial: Option<PathBuf>) -> Self {
        let mut app = Self::default();
        if let Some(path) = initial {
            app.state.open_path(&path);
        }
        app
    }
}

impl eframe::App for SalesDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tables, charts, metrics ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard(ui, &self.state);
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    let (Some(dataset), Some(view)) = (&state.dataset, &state.view) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a sales file to start  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Sales Dashboard");

            ui.add_space(8.0);
            ui.strong("Input data");
            tables::dataset_table(ui, dataset);

            ui.add_space(8.0);
            ui.strong("Sales by category");
            tables::category_table(ui, &view.category_totals);
            plot::category_bar_chart(ui, &view.category_totals);

            ui.add_space(8.0);
            ui.strong("Sales by month");
            tables::monthly_table(ui, &view.monthly_sales);
            plot::monthly_line_chart(ui, &view.monthly_sales);

            ui.separator();
            ui.heading("Sales over time by year for selected sub-categories");
            match &view.selection {
                SelectionView::NoSubCategories => {
                    ui.label("Please select at least one sub-category to display the sales chart.");
                }
                SelectionView::Selected(summary) => {
                    plot::yearly_chart(ui, &summary.yearly, &state.color_map);
                    egui::CollapsingHeader::new("Grouped sales")
                        .id_salt("grouped_sales")
                        .default_open(false)
                        .show(ui, |ui: &mut Ui| {
                            tables::yearly_table(ui, &summary.aggregates);
                        });
                }
            }

            ui.separator();
            ui.heading("Metrics for sales, profit and overall profit margin");
            match &view.selection {
                SelectionView::NoSubCategories => {
                    ui.label("Please select at least one sub-category to display detailed metrics.");
                }
                SelectionView::Selected(summary) => {
                    metrics::summary_row(ui, &summary.metrics);

                    ui.add_space(8.0);
                    ui.strong("Compared with all products across all categories");
                    metrics::comparison(ui, &summary.comparison);
                }
            }
        });
}
