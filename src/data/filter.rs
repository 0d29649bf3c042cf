use std::collections::BTreeSet;

use super::model::{Record, SalesDataset};

// ---------------------------------------------------------------------------
// Filter state: one category, zero or more of its sub-categories
// ---------------------------------------------------------------------------

/// Current user selection.
///
/// `sub_categories` only ever holds values present under `category`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub category: String,
    pub sub_categories: BTreeSet<String>,
}

impl FilterState {
    /// Initial selection: first category in sorted order, no sub-categories.
    /// `None` when the dataset has no rows to select from.
    pub fn for_dataset(dataset: &SalesDataset) -> Option<Self> {
        dataset.categories.first().map(|category| FilterState {
            category: category.clone(),
            sub_categories: BTreeSet::new(),
        })
    }

    /// Switch category, keeping only the sub-categories that also exist under
    /// the new one.
    pub fn set_category(&mut self, dataset: &SalesDataset, category: &str) {
        if self.category == category {
            return;
        }
        let available = dataset.sub_categories_of(category);
        self.sub_categories
            .retain(|sub| available.binary_search(sub).is_ok());
        self.category = category.to_string();
    }

    /// Toggle a single sub-category in the multi-select.
    pub fn toggle_sub_category(&mut self, sub_category: &str) {
        if !self.sub_categories.remove(sub_category) {
            self.sub_categories.insert(sub_category.to_string());
        }
    }

    /// Select every sub-category of the current category.
    pub fn select_all(&mut self, dataset: &SalesDataset) {
        self.sub_categories = dataset
            .sub_categories_of(&self.category)
            .iter()
            .cloned()
            .collect();
    }

    /// Clear the sub-category selection.
    pub fn select_none(&mut self) {
        self.sub_categories.clear();
    }
}

// ---------------------------------------------------------------------------
// Category filter
// ---------------------------------------------------------------------------

/// Records whose category equals `category`, in dataset order.
///
/// An unknown category simply yields nothing.
pub fn select_category<'a>(dataset: &'a SalesDataset, category: &str) -> Vec<&'a Record> {
    dataset
        .records
        .iter()
        .filter(|rec| rec.category == category)
        .collect()
}

// ---------------------------------------------------------------------------
// Sub-category filter
// ---------------------------------------------------------------------------

/// Outcome of the sub-category multi-select.
#[derive(Debug, Clone, PartialEq)]
pub enum SubCategorySelection<'a> {
    /// Nothing chosen: charts and metrics are replaced by a placeholder.
    NoSelection,
    /// Records whose sub-category is among the chosen ones, order preserved.
    Records(Vec<&'a Record>),
}

/// Narrow category-scoped `records` to the chosen sub-categories.
///
/// An empty `chosen` set is the explicit "no selection" state, never
/// "everything".
pub fn select_subcategories<'a>(
    records: &[&'a Record],
    chosen: &BTreeSet<String>,
) -> SubCategorySelection<'a> {
    if chosen.is_empty() {
        return SubCategorySelection::NoSelection;
    }
    SubCategorySelection::Records(
        records
            .iter()
            .copied()
            .filter(|rec| chosen.contains(&rec.sub_category))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::mixed_dataset;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn category_filter_matches_linear_scan() {
        let ds = mixed_dataset();
        for cat in &ds.categories {
            let selected = select_category(&ds, cat);
            assert!(selected.iter().all(|r| &r.category == cat));

            let mut naive = 0;
            for rec in &ds.records {
                if &rec.category == cat {
                    naive += 1;
                }
            }
            assert_eq!(selected.len(), naive, "category {cat}");
        }
    }

    #[test]
    fn category_filter_preserves_order() {
        let ds = mixed_dataset();
        let subs: Vec<&str> = select_category(&ds, "Furniture")
            .iter()
            .map(|r| r.sub_category.as_str())
            .collect();
        assert_eq!(subs, vec!["Tables", "Chairs", "Chairs", "Bookcases"]);
    }

    #[test]
    fn unknown_category_is_empty_not_an_error() {
        let ds = mixed_dataset();
        assert!(select_category(&ds, "Garden").is_empty());
    }

    #[test]
    fn empty_choice_is_no_selection() {
        let ds = mixed_dataset();
        let furniture = select_category(&ds, "Furniture");
        assert_eq!(
            select_subcategories(&furniture, &BTreeSet::new()),
            SubCategorySelection::NoSelection
        );
    }

    #[test]
    fn sub_category_filter_keeps_only_chosen_and_is_idempotent() {
        let ds = mixed_dataset();
        let furniture = select_category(&ds, "Furniture");
        let chosen = set(&["Chairs", "Tables"]);

        let once = select_subcategories(&furniture, &chosen);
        let SubCategorySelection::Records(once_recs) = &once else {
            panic!("expected records for a non-empty choice");
        };
        assert_eq!(once_recs.len(), 3);
        assert!(once_recs.iter().all(|r| chosen.contains(&r.sub_category)));

        let twice = select_subcategories(once_recs, &chosen);
        assert_eq!(once, twice);
    }

    #[test]
    fn default_filter_picks_first_sorted_category() {
        let ds = mixed_dataset();
        let fs = FilterState::for_dataset(&ds).unwrap();
        assert_eq!(fs.category, "Furniture");
        assert!(fs.sub_categories.is_empty());
    }

    #[test]
    fn empty_dataset_has_no_filter_state() {
        let ds = SalesDataset::from_records(Vec::new(), Vec::new());
        assert!(FilterState::for_dataset(&ds).is_none());
    }

    #[test]
    fn switching_category_drops_foreign_sub_categories() {
        let ds = mixed_dataset();
        let mut fs = FilterState::for_dataset(&ds).unwrap();
        fs.toggle_sub_category("Chairs");
        fs.set_category(&ds, "Technology");
        assert_eq!(fs.category, "Technology");
        assert!(fs.sub_categories.is_empty());
    }

    #[test]
    fn toggle_and_select_all_none() {
        let ds = mixed_dataset();
        let mut fs = FilterState::for_dataset(&ds).unwrap();

        fs.toggle_sub_category("Chairs");
        assert_eq!(fs.sub_categories, set(&["Chairs"]));
        fs.toggle_sub_category("Chairs");
        assert!(fs.sub_categories.is_empty());

        fs.select_all(&ds);
        assert_eq!(fs.sub_categories, set(&["Bookcases", "Chairs", "Tables"]));
        fs.select_none();
        assert!(fs.sub_categories.is_empty());
    }
}
