use eframe::egui::{Color32, RichText, Ui};

use crate::data::aggregate::{MarginComparison, SummaryMetrics};
use crate::format::{currency, percent, signed_percent};

/// A labelled big number, optionally with a coloured delta underneath.
fn metric_card(ui: &mut Ui, label: &str, value: String, delta: Option<f64>) {
    ui.group(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label(RichText::new(label).small());
            ui.label(RichText::new(value).size(24.0).strong());
            if let Some(delta) = delta {
                let (arrow, color) = if delta >= 0.0 {
                    ("▲", Color32::from_rgb(0x09, 0xab, 0x3b))
                } else {
                    ("▼", Color32::from_rgb(0xff, 0x2b, 0x2b))
                };
                ui.label(RichText::new(format!("{arrow} {}", signed_percent(delta))).color(color));
            }
        });
    });
}

/// Total sales, total profit and margin for the selection.
pub fn summary_row(ui: &mut Ui, metrics: &SummaryMetrics) {
    ui.columns(3, |cols| {
        metric_card(&mut cols[0], "Total Sales", currency(metrics.total_sales), None);
        metric_card(&mut cols[1], "Total Profit", currency(metrics.total_profit), None);
        metric_card(
            &mut cols[2],
            "Overall Profit Margin (%)",
            percent(metrics.profit_margin),
            None,
        );
    });
}

/// Whole-dataset margin with the selection's signed delta against it.
pub fn comparison(ui: &mut Ui, comparison: &MarginComparison) {
    metric_card(
        ui,
        "Overall Average Profit Margin Compared to All Categories (%)",
        percent(comparison.baseline.profit_margin),
        Some(comparison.delta),
    );
}
