use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::{CategoryTotal, MonthlySales, YearSubcategoryAggregate};
use crate::data::model::SalesDataset;
use crate::format::amount;

const ROW_HEIGHT: f32 = 18.0;
const HEADER_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// Full dataset
// ---------------------------------------------------------------------------

/// Every loaded order: the required fields first, then the file's other columns.
pub fn dataset_table(ui: &mut Ui, dataset: &SalesDataset) {
    let fixed = ["Order_Date", "Category", "Sub_Category", "Sales", "Profit"];
    let n_columns = fixed.len() + dataset.extra_columns.len();

    ui.push_id("dataset_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .columns(Column::auto().at_least(70.0), n_columns)
            .min_scrolled_height(0.0)
            .max_scroll_height(320.0)
            .header(HEADER_HEIGHT, |mut header| {
                let extra = dataset.extra_columns.iter().map(String::as_str);
                for name in fixed.iter().copied().chain(extra) {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, dataset.len(), |mut row| {
                    let rec = &dataset.records[row.index()];
                    row.col(|ui| {
                        ui.label(rec.order_date.to_string());
                    });
                    row.col(|ui| {
                        ui.label(&rec.category);
                    });
                    row.col(|ui| {
                        ui.label(&rec.sub_category);
                    });
                    row.col(|ui| {
                        ui.label(amount(rec.sales));
                    });
                    row.col(|ui| {
                        ui.label(amount(rec.profit));
                    });
                    for value in &rec.extra {
                        row.col(|ui| {
                            ui.label(value);
                        });
                    }
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Orders, sales and profit summed per category.
pub fn category_table(ui: &mut Ui, totals: &[CategoryTotal]) {
    ui.push_id("category_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .column(Column::auto().at_least(120.0))
            .columns(Column::auto().at_least(90.0), 3)
            .header(HEADER_HEIGHT, |mut header| {
                for name in ["Category", "Orders", "Sales", "Profit"] {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|mut body| {
                for total in totals {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            ui.label(&total.category);
                        });
                        row.col(|ui| {
                            ui.label(total.orders.to_string());
                        });
                        row.col(|ui| {
                            ui.label(amount(total.sales));
                        });
                        row.col(|ui| {
                            ui.label(amount(total.profit));
                        });
                    });
                }
            });
    });
}

/// Sales per calendar month.
pub fn monthly_table(ui: &mut Ui, months: &[MonthlySales]) {
    ui.push_id("monthly_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .columns(Column::auto().at_least(90.0), 2)
            .min_scrolled_height(0.0)
            .max_scroll_height(240.0)
            .header(HEADER_HEIGHT, |mut header| {
                for name in ["Month", "Sales"] {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, months.len(), |mut row| {
                    let month = &months[row.index()];
                    row.col(|ui| {
                        ui.label(month.label());
                    });
                    row.col(|ui| {
                        ui.label(amount(month.sales));
                    });
                });
            });
    });
}

/// The grouped values behind the yearly chart.
pub fn yearly_table(ui: &mut Ui, aggregates: &[YearSubcategoryAggregate]) {
    ui.push_id("yearly_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .columns(Column::auto().at_least(90.0), 3)
            .header(HEADER_HEIGHT, |mut header| {
                for name in ["Year", "Sub_Category", "Sales"] {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|mut body| {
                for agg in aggregates {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            ui.label(agg.year.to_string());
                        });
                        row.col(|ui| {
                            ui.label(&agg.sub_category);
                        });
                        row.col(|ui| {
                            ui.label(amount(agg.sales));
                        });
                    });
                }
            });
    });
}
