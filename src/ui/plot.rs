use std::ops::RangeInclusive;

use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridInput, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::color::ColorMap;
use crate::data::aggregate::{CategoryTotal, MonthlySales, YearlySeries};

const CHART_HEIGHT: f32 = 280.0;

/// Grid marks exactly at the given integer positions.
fn marks_at(positions: Vec<f64>) -> impl Fn(GridInput) -> Vec<GridMark> {
    move |_input: GridInput| {
        positions
            .iter()
            .map(|&value| GridMark {
                value,
                step_size: 1.0,
            })
            .collect()
    }
}

/// Label for an axis mark sitting on an integer index, empty elsewhere.
fn index_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Sales by category (bar chart)
// ---------------------------------------------------------------------------

pub fn category_bar_chart(ui: &mut Ui, totals: &[CategoryTotal]) {
    let labels: Vec<String> = totals.iter().map(|t| t.category.clone()).collect();
    let positions: Vec<f64> = (0..totals.len()).map(|i| i as f64).collect();

    let bars: Vec<Bar> = totals
        .iter()
        .enumerate()
        .map(|(i, t)| Bar::new(i as f64, t.sales).name(&t.category).width(0.6))
        .collect();

    Plot::new("category_sales")
        .height(CHART_HEIGHT)
        .x_axis_label("Category")
        .y_axis_label("Sales")
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .x_grid_spacer(marks_at(positions))
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            index_label(&labels, mark.value)
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name("Sales")
                    .color(Color32::from_rgb(0x00, 0x44, 0xff)),
            );
        });
}

// ---------------------------------------------------------------------------
// Sales by month (line chart)
// ---------------------------------------------------------------------------

pub fn monthly_line_chart(ui: &mut Ui, months: &[MonthlySales]) {
    let points: PlotPoints = months
        .iter()
        .map(|m| [m.ordinal() as f64, m.sales])
        .collect();

    Plot::new("monthly_sales")
        .height(CHART_HEIGHT)
        .x_axis_label("Month")
        .y_axis_label("Sales")
        .allow_scroll(false)
        .x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
            let rounded = mark.value.round();
            if (mark.value - rounded).abs() > 1e-6 {
                return String::new();
            }
            let (year, month) = MonthlySales::from_ordinal(rounded as i64);
            format!("{year:04}-{month:02}")
        })
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).name("Sales").width(1.5));
        });
}

// ---------------------------------------------------------------------------
// Sales by year for the selected sub-categories
// ---------------------------------------------------------------------------

/// One line (with markers) per sub-category; x ticks are exactly the years
/// present, printed as plain integers.
pub fn yearly_chart(ui: &mut Ui, series: &YearlySeries, colors: &ColorMap) {
    let years: Vec<f64> = series.years.iter().map(|&y| f64::from(y)).collect();
    let ticks: Vec<(f64, String)> = years.iter().copied().zip(series.tick_labels()).collect();

    Plot::new("yearly_sales")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Total Sales")
        .allow_scroll(false)
        .x_grid_spacer(marks_at(years))
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            ticks
                .iter()
                .find(|(year, _)| (year - mark.value).abs() < 1e-6)
                .map(|(_, label)| label.clone())
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for line in &series.lines {
                let color = colors.color_for(&line.sub_category);
                let coords: Vec<[f64; 2]> = line
                    .points
                    .iter()
                    .map(|&(year, sales)| [f64::from(year), sales])
                    .collect();

                plot_ui.line(
                    Line::new(PlotPoints::from(coords.clone()))
                        .name(&line.sub_category)
                        .color(color)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(coords))
                        .name(&line.sub_category)
                        .color(color)
                        .radius(4.0),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_labels_only_on_integers() {
        let labels = vec!["Furniture".to_string(), "Technology".to_string()];
        assert_eq!(index_label(&labels, 0.0), "Furniture");
        assert_eq!(index_label(&labels, 1.0000001), "Technology");
        assert_eq!(index_label(&labels, 0.5), "");
        assert_eq!(index_label(&labels, 2.0), "");
        assert_eq!(index_label(&labels, -1.0), "");
    }

    #[test]
    fn grid_marks_sit_on_requested_positions() {
        let spacer = marks_at(vec![2014.0, 2015.0, 2017.0]);
        let marks = spacer(GridInput {
            bounds: (2013.0, 2018.0),
            base_step_size: 0.1,
        });
        let values: Vec<f64> = marks.iter().map(|m| m.value).collect();
        assert_eq!(values, vec![2014.0, 2015.0, 2017.0]);
    }
}
