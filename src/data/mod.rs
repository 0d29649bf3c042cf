/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → SalesDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SalesDataset │  Vec<Record>, category index
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  category → chosen sub-categories
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  year × sub-category sums, metrics, baseline delta
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ pipeline │  (dataset, filters) → DashboardView
///   └──────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
