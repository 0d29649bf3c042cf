use super::aggregate::{
    aggregate_by_year_subcategory, compare, compute_metrics, sales_by_category, sales_by_month,
    CategoryTotal, MarginComparison, MonthlySales, SummaryMetrics, YearSubcategoryAggregate,
    YearlySeries,
};
use super::filter::{select_category, select_subcategories, FilterState, SubCategorySelection};
use super::model::SalesDataset;

// ---------------------------------------------------------------------------
// Derived dashboard view
// ---------------------------------------------------------------------------

/// Everything the dashboard displays, derived from `(dataset, filters)`.
///
/// Rebuilt from scratch on every filter change; never patched in place.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub category_totals: Vec<CategoryTotal>,
    pub monthly_sales: Vec<MonthlySales>,
    /// Sorted sub-categories offered for the selected category.
    pub sub_category_options: Vec<String>,
    /// Rows in the selected category, before the sub-category filter.
    pub category_rows: usize,
    pub selection: SelectionView,
}

/// The two reachable filter states.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionView {
    /// Category chosen, no sub-categories: show a placeholder, compute nothing.
    NoSubCategories,
    /// Category and at least one sub-category chosen.
    Selected(SelectionSummary),
}

/// Aggregates over the filtered rows plus the whole-dataset comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSummary {
    pub rows: usize,
    pub aggregates: Vec<YearSubcategoryAggregate>,
    pub yearly: YearlySeries,
    pub metrics: SummaryMetrics,
    pub comparison: MarginComparison,
}

impl DashboardView {
    pub fn selection_summary(&self) -> Option<&SelectionSummary> {
        match &self.selection {
            SelectionView::Selected(summary) => Some(summary),
            SelectionView::NoSubCategories => None,
        }
    }
}

/// Run the filter → aggregate → metrics pipeline.
pub fn build_view(dataset: &SalesDataset, filters: &FilterState) -> DashboardView {
    let in_category = select_category(dataset, &filters.category);

    let selection = match select_subcategories(&in_category, &filters.sub_categories) {
        SubCategorySelection::NoSelection => SelectionView::NoSubCategories,
        SubCategorySelection::Records(records) => {
            let aggregates = aggregate_by_year_subcategory(records.iter().copied());
            let yearly = YearlySeries::from_aggregates(&aggregates);
            let metrics = compute_metrics(records.iter().copied());
            let baseline = compute_metrics(&dataset.records);
            let comparison = MarginComparison {
                baseline,
                delta: compare(metrics.profit_margin, baseline.profit_margin),
            };
            SelectionView::Selected(SelectionSummary {
                rows: records.len(),
                aggregates,
                yearly,
                metrics,
                comparison,
            })
        }
    };

    log::debug!(
        "Recomputed view: category={:?}, {} sub-categories selected, {} rows in category",
        filters.category,
        filters.sub_categories.len(),
        in_category.len()
    );

    DashboardView {
        category_totals: sales_by_category(&dataset.records),
        monthly_sales: sales_by_month(&dataset.records),
        sub_category_options: dataset.sub_categories_of(&filters.category).to_vec(),
        category_rows: in_category.len(),
        selection,
    }
}
