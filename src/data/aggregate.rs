use std::collections::BTreeMap;

use chrono::Datelike;

use super::model::Record;

// ---------------------------------------------------------------------------
// Year × sub-category sales
// ---------------------------------------------------------------------------

/// Summed sales for one (year, sub-category) key.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSubcategoryAggregate {
    pub year: i32,
    pub sub_category: String,
    pub sales: f64,
}

/// Group by (order year, sub-category) and sum sales.
///
/// One entry per key, ordered by year then sub-category.
pub fn aggregate_by_year_subcategory<'a, I>(records: I) -> Vec<YearSubcategoryAggregate>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut groups: BTreeMap<(i32, &'a str), f64> = BTreeMap::new();
    for rec in records {
        *groups.entry((rec.year(), rec.sub_category.as_str())).or_default() += rec.sales;
    }
    groups
        .into_iter()
        .map(|((year, sub_category), sales)| YearSubcategoryAggregate {
            year,
            sub_category: sub_category.to_string(),
            sales,
        })
        .collect()
}

/// One plotted line: a sub-category's yearly sales.
#[derive(Debug, Clone, PartialEq)]
pub struct SubCategoryLine {
    pub sub_category: String,
    /// `(year, sales)` in ascending year order; only years with orders.
    pub points: Vec<(i32, f64)>,
}

/// Chart-ready form of the year × sub-category aggregates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct YearlySeries {
    /// Distinct years present, ascending. These are the axis ticks.
    pub years: Vec<i32>,
    pub lines: Vec<SubCategoryLine>,
}

impl YearlySeries {
    pub fn from_aggregates(aggregates: &[YearSubcategoryAggregate]) -> Self {
        let mut years: Vec<i32> = aggregates.iter().map(|a| a.year).collect();
        years.sort_unstable();
        years.dedup();

        let mut by_sub: BTreeMap<&str, Vec<(i32, f64)>> = BTreeMap::new();
        for agg in aggregates {
            by_sub
                .entry(agg.sub_category.as_str())
                .or_default()
                .push((agg.year, agg.sales));
        }
        let lines = by_sub
            .into_iter()
            .map(|(sub, mut points)| {
                points.sort_by_key(|&(year, _)| year);
                SubCategoryLine {
                    sub_category: sub.to_string(),
                    points,
                }
            })
            .collect();

        YearlySeries { years, lines }
    }

    /// Tick labels for the year axis: plain integers, e.g. `"2014"`.
    pub fn tick_labels(&self) -> Vec<String> {
        self.years.iter().map(|y| y.to_string()).collect()
    }
}

// ---------------------------------------------------------------------------
// Summary metrics and baseline comparison
// ---------------------------------------------------------------------------

/// Totals and margin over a set of records.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SummaryMetrics {
    pub total_sales: f64,
    pub total_profit: f64,
    /// Percent, e.g. `20.0` for 20 %. Zero when there are no positive sales.
    pub profit_margin: f64,
}

/// Sum sales and profit and derive the margin.
///
/// Used for both the filtered selection and the whole-dataset baseline.
pub fn compute_metrics<'a, I>(records: I) -> SummaryMetrics
where
    I: IntoIterator<Item = &'a Record>,
{
    let (total_sales, total_profit) = records
        .into_iter()
        .fold((0.0, 0.0), |(s, p), rec| (s + rec.sales, p + rec.profit));

    let profit_margin = if total_sales > 0.0 {
        total_profit / total_sales * 100.0
    } else {
        0.0
    };

    SummaryMetrics {
        total_sales,
        total_profit,
        profit_margin,
    }
}

/// Filtered margin against the whole-dataset margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarginComparison {
    pub baseline: SummaryMetrics,
    /// Filtered margin minus baseline margin, in percentage points.
    pub delta: f64,
}

/// Signed difference between two margins (positive = outperforming).
pub fn compare(filtered_margin: f64, baseline_margin: f64) -> f64 {
    filtered_margin - baseline_margin
}

// ---------------------------------------------------------------------------
// Overview aggregates (independent of the filters)
// ---------------------------------------------------------------------------

/// Summed sales and profit for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub orders: usize,
    pub sales: f64,
    pub profit: f64,
}

/// Per-category totals, sorted by category.
pub fn sales_by_category<'a, I>(records: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut groups: BTreeMap<&'a str, CategoryTotal> = BTreeMap::new();
    for rec in records {
        let entry = groups
            .entry(rec.category.as_str())
            .or_insert_with(|| CategoryTotal {
                category: rec.category.clone(),
                orders: 0,
                sales: 0.0,
                profit: 0.0,
            });
        entry.orders += 1;
        entry.sales += rec.sales;
        entry.profit += rec.profit;
    }
    groups.into_values().collect()
}

/// Sales summed over one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlySales {
    pub year: i32,
    /// 1-based.
    pub month: u32,
    pub sales: f64,
}

impl MonthlySales {
    /// Months since year 0, handy as a continuous plot axis.
    pub fn ordinal(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    pub fn from_ordinal(ordinal: i64) -> (i32, u32) {
        (
            ordinal.div_euclid(12) as i32,
            ordinal.rem_euclid(12) as u32 + 1,
        )
    }
}

/// Monthly sales from the first to the last month with orders.
///
/// Months in between without any orders are present with zero sales.
pub fn sales_by_month<'a, I>(records: I) -> Vec<MonthlySales>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut sums: BTreeMap<i64, f64> = BTreeMap::new();
    for rec in records {
        let ordinal = i64::from(rec.order_date.year()) * 12 + i64::from(rec.order_date.month0());
        *sums.entry(ordinal).or_default() += rec.sales;
    }

    let (Some(&first), Some(&last)) = (sums.keys().next(), sums.keys().next_back()) else {
        return Vec::new();
    };

    (first..=last)
        .map(|ordinal| {
            let (year, month) = MonthlySales::from_ordinal(ordinal);
            MonthlySales {
                year,
                month,
                sales: sums.get(&ordinal).copied().unwrap_or(0.0),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{date, mixed_dataset, record, scenario_dataset};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn year_aggregates_are_unique_and_ordered() {
        let ds = mixed_dataset();
        let aggs = aggregate_by_year_subcategory(&ds.records);
        let keys: Vec<(i32, &str)> = aggs
            .iter()
            .map(|a| (a.year, a.sub_category.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (2014, "Chairs"),
                (2014, "Copiers"),
                (2014, "Tables"),
                (2015, "Bookcases"),
                (2015, "Phones"),
                (2016, "Chairs"),
                (2016, "Paper"),
            ]
        );
    }

    #[test]
    fn year_aggregates_conserve_sales() {
        let ds = mixed_dataset();
        let total: f64 = ds.records.iter().map(|r| r.sales).sum();
        let aggs = aggregate_by_year_subcategory(&ds.records);
        let summed: f64 = aggs.iter().map(|a| a.sales).sum();
        assert!(approx(total, summed), "{total} vs {summed}");
    }

    #[test]
    fn same_key_rows_are_merged() {
        let mut ds = scenario_dataset();
        ds.records.push(record("Furniture", "Chairs", date(2014, 9, 9), 5.0, 1.0));
        let aggs = aggregate_by_year_subcategory(&ds.records);
        let chairs_2014: Vec<_> = aggs
            .iter()
            .filter(|a| a.year == 2014 && a.sub_category == "Chairs")
            .collect();
        assert_eq!(chairs_2014.len(), 1);
        assert!(approx(chairs_2014[0].sales, 105.0));
    }

    #[test]
    fn yearly_series_ticks_are_plain_years() {
        let ds = mixed_dataset();
        let series = YearlySeries::from_aggregates(&aggregate_by_year_subcategory(&ds.records));
        assert_eq!(series.years, vec![2014, 2015, 2016]);
        assert_eq!(series.tick_labels(), vec!["2014", "2015", "2016"]);

        let chairs = series
            .lines
            .iter()
            .find(|l| l.sub_category == "Chairs")
            .unwrap();
        assert_eq!(chairs.points, vec![(2014, 40.0), (2016, 60.0)]);
    }

    #[test]
    fn metrics_match_worked_example() {
        let ds = scenario_dataset();
        let m = compute_metrics(&ds.records[..2]);
        assert!(approx(m.total_sales, 300.0));
        assert!(approx(m.total_profit, 60.0));
        assert!(approx(m.profit_margin, 20.0));

        let base = compute_metrics(&ds.records);
        assert!(approx(base.total_sales, 600.0));
        assert!(approx(base.total_profit, 30.0));
        assert!(approx(base.profit_margin, 5.0));
        assert!(approx(compare(m.profit_margin, base.profit_margin), 15.0));
    }

    #[test]
    fn metrics_are_pure() {
        let ds = mixed_dataset();
        assert_eq!(compute_metrics(&ds.records), compute_metrics(&ds.records));
    }

    #[test]
    fn margin_is_zero_without_sales() {
        let empty: Vec<Record> = Vec::new();
        assert_eq!(compute_metrics(&empty), SummaryMetrics::default());

        let free = vec![record("A", "B", date(2020, 1, 1), 0.0, -5.0)];
        let m = compute_metrics(&free);
        assert_eq!(m.profit_margin, 0.0);
        assert!(approx(m.total_profit, -5.0));
    }

    #[test]
    fn margin_is_zero_for_negative_sales_sum() {
        let refunds = vec![record("A", "B", date(2020, 1, 1), -10.0, 2.0)];
        assert_eq!(compute_metrics(&refunds).profit_margin, 0.0);
    }

    #[test]
    fn category_totals_sorted_and_conserving() {
        let ds = mixed_dataset();
        let totals = sales_by_category(&ds.records);
        let names: Vec<&str> = totals.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(names, vec!["Furniture", "Office Supplies", "Technology"]);

        let furniture = &totals[0];
        assert_eq!(furniture.orders, 4);
        assert!(approx(furniture.sales, 390.0));
        assert!(approx(furniture.profit, 5.0));

        let all: f64 = totals.iter().map(|t| t.sales).sum();
        let expected: f64 = ds.records.iter().map(|r| r.sales).sum();
        assert!(approx(all, expected));
    }

    #[test]
    fn monthly_series_fills_gaps() {
        let records = vec![
            record("A", "a", date(2014, 11, 3), 10.0, 0.0),
            record("A", "a", date(2015, 2, 28), 5.0, 0.0),
            record("A", "a", date(2014, 11, 30), 2.5, 0.0),
        ];
        let months = sales_by_month(&records);
        let labels: Vec<String> = months.iter().map(MonthlySales::label).collect();
        assert_eq!(labels, vec!["2014-11", "2014-12", "2015-01", "2015-02"]);
        let sales: Vec<f64> = months.iter().map(|m| m.sales).collect();
        assert_eq!(sales, vec![12.5, 0.0, 0.0, 5.0]);
    }

    #[test]
    fn monthly_series_conserves_sales() {
        let ds = mixed_dataset();
        let months = sales_by_month(&ds.records);
        let summed: f64 = months.iter().map(|m| m.sales).sum();
        let expected: f64 = ds.records.iter().map(|r| r.sales).sum();
        assert!(approx(summed, expected));
        for pair in months.windows(2) {
            assert_eq!(pair[1].ordinal() - pair[0].ordinal(), 1);
        }
    }

    #[test]
    fn monthly_series_empty_input() {
        let empty: Vec<Record> = Vec::new();
        assert!(sales_by_month(&empty).is_empty());
    }
}
