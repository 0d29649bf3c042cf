use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};

// ---------------------------------------------------------------------------
// Record – one row of the sales file
// ---------------------------------------------------------------------------

/// A single sales transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub category: String,
    pub sub_category: String,
    pub order_date: NaiveDate,
    /// Non-negative for well-formed input; not enforced.
    pub sales: f64,
    pub profit: f64,
    /// Text of every other column in the source file, aligned with
    /// [`SalesDataset::extra_columns`].
    pub extra: Vec<String>,
}

impl Record {
    /// Calendar year of the order date.
    pub fn year(&self) -> i32 {
        self.order_date.year()
    }
}

// ---------------------------------------------------------------------------
// SalesDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed distinct-value indices.
///
/// Read-only once built; loading another file replaces it wholesale.
#[derive(Debug, Clone, Default)]
pub struct SalesDataset {
    /// All records in file order.
    pub records: Vec<Record>,
    /// Names of the non-required columns, in file order.
    pub extra_columns: Vec<String>,
    /// Sorted distinct categories.
    pub categories: Vec<String>,
    /// Category → sorted distinct sub-categories seen under it.
    pub sub_categories: BTreeMap<String, Vec<String>>,
}

impl SalesDataset {
    /// Build the category indices from the loaded records.
    pub fn from_records(records: Vec<Record>, extra_columns: Vec<String>) -> Self {
        let mut index: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for rec in &records {
            index
                .entry(rec.category.clone())
                .or_default()
                .insert(rec.sub_category.clone());
        }

        let categories = index.keys().cloned().collect();
        let sub_categories = index
            .into_iter()
            .map(|(cat, subs)| (cat, subs.into_iter().collect()))
            .collect();

        SalesDataset {
            records,
            extra_columns,
            categories,
            sub_categories,
        }
    }

    /// Sorted sub-categories available under `category` (empty if unknown).
    pub fn sub_categories_of(&self, category: &str) -> &[String] {
        self.sub_categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn record(
        category: &str,
        sub_category: &str,
        order_date: NaiveDate,
        sales: f64,
        profit: f64,
    ) -> Record {
        Record {
            category: category.to_string(),
            sub_category: sub_category.to_string(),
            order_date,
            sales,
            profit,
            extra: Vec::new(),
        }
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// The three-row dataset used by the worked scenarios.
    pub fn scenario_dataset() -> SalesDataset {
        SalesDataset::from_records(
            vec![
                record("Furniture", "Chairs", date(2014, 1, 1), 100.0, 10.0),
                record("Furniture", "Chairs", date(2015, 1, 1), 200.0, 50.0),
                record("Technology", "Phones", date(2014, 6, 1), 300.0, -30.0),
            ],
            Vec::new(),
        )
    }

    /// A slightly wider dataset with several sub-categories per category.
    pub fn mixed_dataset() -> SalesDataset {
        SalesDataset::from_records(
            vec![
                record("Technology", "Phones", date(2015, 3, 9), 120.0, 12.0),
                record("Furniture", "Tables", date(2014, 2, 14), 80.0, -8.0),
                record("Furniture", "Chairs", date(2014, 2, 20), 40.0, 4.0),
                record("Office Supplies", "Paper", date(2016, 7, 1), 15.5, 6.2),
                record("Furniture", "Chairs", date(2016, 11, 30), 60.0, 9.0),
                record("Technology", "Copiers", date(2014, 12, 31), 999.0, 333.0),
                record("Furniture", "Bookcases", date(2015, 5, 5), 210.0, 0.0),
            ],
            Vec::new(),
        )
    }
}
