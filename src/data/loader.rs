use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::Array;
use arrow::util::display::array_value_to_string;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Record, SalesDataset};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a sales dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one order per line
/// * `.json`    – `[{ "Category": ..., "Sales": ..., ... }, ...]`
/// * `.parquet` – one column per field, any scalar types
///
/// Required columns: `Category`, `Sub_Category`, `Order_Date`, `Sales`,
/// `Profit`. Every other column is kept as text for the data table.
pub fn load_file(path: &Path) -> Result<SalesDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    if dataset.is_empty() {
        log::warn!("{} contains no orders", path.display());
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Schema: locating the required columns and parsing a row
// ---------------------------------------------------------------------------

/// Row- or column-level problems with the input file.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: column '{column}' value {value:?} is not a number")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: order date {value:?} is not a recognised date")]
    InvalidDate { row: usize, value: String },
}

const CATEGORY: &str = "Category";
const SUB_CATEGORY: &str = "Sub_Category";
const ORDER_DATE: &str = "Order_Date";
const SALES: &str = "Sales";
const PROFIT: &str = "Profit";

/// Column positions resolved from a header row.
#[derive(Debug)]
struct RowSchema {
    category: usize,
    sub_category: usize,
    order_date: usize,
    sales: usize,
    profit: usize,
    /// `(position, name)` of every non-required column.
    extra: Vec<(usize, String)>,
}

impl RowSchema {
    fn resolve(headers: &[String]) -> Result<Self, SchemaError> {
        let find = |wanted: &'static str| {
            headers
                .iter()
                .position(|h| normalize_header(h) == normalize_header(wanted))
                .ok_or(SchemaError::MissingColumn(wanted))
        };

        let category = find(CATEGORY)?;
        let sub_category = find(SUB_CATEGORY)?;
        let order_date = find(ORDER_DATE)?;
        let sales = find(SALES)?;
        let profit = find(PROFIT)?;

        let required = [category, sub_category, order_date, sales, profit];
        let extra = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| !required.contains(i))
            .map(|(i, h)| (i, h.trim_start_matches('\u{feff}').to_string()))
            .collect();

        Ok(RowSchema {
            category,
            sub_category,
            order_date,
            sales,
            profit,
            extra,
        })
    }

    fn extra_names(&self) -> Vec<String> {
        self.extra.iter().map(|(_, name)| name.clone()).collect()
    }

    /// Parse one data row. `row` is 1-based and only used in errors.
    fn parse_row<S: AsRef<str>>(&self, row: usize, cells: &[S]) -> Result<Record, SchemaError> {
        let cell = |i: usize| cells.get(i).map(|c| c.as_ref().trim()).unwrap_or("");

        let number = |i: usize, column: &'static str| {
            let raw = cell(i);
            raw.parse::<f64>().map_err(|_| SchemaError::InvalidNumber {
                row,
                column,
                value: raw.to_string(),
            })
        };

        let order_date = parse_order_date(cell(self.order_date)).ok_or_else(|| {
            SchemaError::InvalidDate {
                row,
                value: cell(self.order_date).to_string(),
            }
        })?;

        Ok(Record {
            category: cell(self.category).to_string(),
            sub_category: cell(self.sub_category).to_string(),
            order_date,
            sales: number(self.sales, SALES)?,
            profit: number(self.profit, PROFIT)?,
            extra: self.extra.iter().map(|&(i, _)| cell(i).to_string()).collect(),
        })
    }
}

/// `"Sub-Category"`, `"sub category"` and `"Sub_Category"` all match.
fn normalize_header(h: &str) -> String {
    h.trim()
        .trim_start_matches('\u{feff}')
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c.to_ascii_lowercase() })
        .collect()
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%d.%m.%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

/// Parse an order date in any of the layouts commonly exported for sales
/// data. A bare integer is read as epoch milliseconds (the pandas JSON
/// default for datetime columns).
pub fn parse_order_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(ms) = s.parse::<i64>() {
        return DateTime::from_timestamp_millis(ms).map(|dt| dt.date_naive());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<SalesDataset> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

/// Parse CSV from any reader; the first row holds the column names.
pub fn read_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<SalesDataset> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let schema = RowSchema::resolve(&headers)?;

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let fields = result.with_context(|| format!("CSV row {row}"))?;
        let cells: Vec<&str> = fields.iter().collect();
        records.push(schema.parse_row(row, &cells)?);
    }

    Ok(SalesDataset::from_records(records, schema.extra_names()))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<SalesDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

/// Records-oriented JSON, the default `df.to_json(orient='records')`:
///
/// ```json
/// [
///   { "Category": "Furniture", "Sub_Category": "Chairs",
///     "Order_Date": "2014-01-01", "Sales": 100.0, "Profit": 10.0 },
///   ...
/// ]
/// ```
///
/// Column names come from the first object.
pub fn parse_json(text: &str) -> Result<SalesDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let Some(first) = rows.first() else {
        return Ok(SalesDataset::default());
    };
    let headers: Vec<String> = first
        .as_object()
        .context("Row 1 is not a JSON object")?
        .keys()
        .cloned()
        .collect();
    let schema = RowSchema::resolve(&headers)?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, value) in rows.iter().enumerate() {
        let row = i + 1;
        let obj = value
            .as_object()
            .with_context(|| format!("Row {row} is not a JSON object"))?;
        let cells: Vec<String> = headers
            .iter()
            .map(|h| obj.get(h).map(json_cell).unwrap_or_default())
            .collect();
        records.push(schema.parse_row(row, &cells)?);
    }

    Ok(SalesDataset::from_records(records, schema.extra_names()))
}

fn json_cell(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Every cell goes through Arrow's display formatting and then the same row
/// parser as CSV, so Utf8, numeric, Date32 and Timestamp columns all work.
fn load_parquet(path: &Path) -> Result<SalesDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;

    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let schema = RowSchema::resolve(&headers)?;

    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for i in 0..batch.num_rows() {
            let row = records.len() + 1;
            let cells = batch
                .columns()
                .iter()
                .map(|col| {
                    if col.is_null(i) {
                        return Ok(String::new());
                    }
                    array_value_to_string(col, i)
                })
                .collect::<Result<Vec<String>, _>>()
                .with_context(|| format!("Row {row}: formatting parquet values"))?;
            records.push(schema.parse_row(row, &cells)?);
        }
    }

    Ok(SalesDataset::from_records(records, schema.extra_names()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv_from(text: &str) -> Result<SalesDataset> {
        read_csv(csv::Reader::from_reader(text.as_bytes()))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn reads_csv_with_extra_columns() {
        let ds = csv_from(
            "Row_ID,Order_Date,Category,Sub_Category,Sales,Profit\n\
             1,2014-01-01,Furniture,Chairs,100,10\n\
             2,2015-01-01,Furniture,Chairs,200.5,-50.25\n",
        )
        .unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.extra_columns, vec!["Row_ID"]);
        let second = &ds.records[1];
        assert_eq!(second.category, "Furniture");
        assert_eq!(second.order_date, date(2015, 1, 1));
        assert_eq!(second.sales, 200.5);
        assert_eq!(second.profit, -50.25);
        assert_eq!(second.extra, vec!["2"]);
    }

    #[test]
    fn header_spelling_variants_match() {
        let ds = csv_from(
            "category,Sub-Category,Order Date,SALES,profit\n\
             Technology,Phones,2014-06-01,300,-30\n",
        )
        .unwrap();
        assert_eq!(ds.records[0].sub_category, "Phones");
        assert!(ds.extra_columns.is_empty());
    }

    #[test]
    fn missing_column_is_reported() {
        let err = csv_from("Category,Sub_Category,Order_Date,Sales\nA,B,2014-01-01,1\n")
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<SchemaError>(),
            Some(&SchemaError::MissingColumn("Profit"))
        );
    }

    #[test]
    fn bad_number_names_row_and_column() {
        let err = csv_from(
            "Category,Sub_Category,Order_Date,Sales,Profit\n\
             A,B,2014-01-01,1,2\n\
             A,B,2014-01-02,n/a,2\n",
        )
        .unwrap_err();
        assert_eq!(
            err.downcast_ref::<SchemaError>(),
            Some(&SchemaError::InvalidNumber {
                row: 2,
                column: "Sales",
                value: "n/a".to_string()
            })
        );
    }

    #[test]
    fn bad_date_is_reported() {
        let err = csv_from("Category,Sub_Category,Order_Date,Sales,Profit\nA,B,soon,1,2\n")
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SchemaError>(),
            Some(SchemaError::InvalidDate { row: 1, .. })
        ));
    }

    #[test]
    fn date_layouts() {
        assert_eq!(parse_order_date("2014-01-31"), Some(date(2014, 1, 31)));
        assert_eq!(parse_order_date("1/31/2014"), Some(date(2014, 1, 31)));
        assert_eq!(parse_order_date("2014-01-31 00:00:00"), Some(date(2014, 1, 31)));
        assert_eq!(parse_order_date("2014-01-31T13:45:00"), Some(date(2014, 1, 31)));
        assert_eq!(parse_order_date("2014-01-31T13:45:00.250"), Some(date(2014, 1, 31)));
        assert_eq!(parse_order_date("2014-01-31T13:45:00+02:00"), Some(date(2014, 1, 31)));
        // 2014-01-31T00:00:00Z in epoch milliseconds.
        assert_eq!(parse_order_date("1391126400000"), Some(date(2014, 1, 31)));
        assert_eq!(parse_order_date(""), None);
        assert_eq!(parse_order_date("31/31/2014"), None);
    }

    #[test]
    fn reads_records_oriented_json() {
        let ds = parse_json(
            r#"[
                {"Category": "Furniture", "Sub_Category": "Chairs",
                 "Order_Date": "2014-01-01", "Sales": 100, "Profit": 10.5, "Region": "West"},
                {"Category": "Technology", "Sub_Category": "Phones",
                 "Order_Date": 1401580800000, "Sales": 300.0, "Profit": -30, "Region": null}
            ]"#,
        )
        .unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.extra_columns, vec!["Region"]);
        assert_eq!(ds.records[0].extra, vec!["West"]);
        assert_eq!(ds.records[1].extra, vec![""]);
        assert_eq!(ds.records[1].order_date, date(2014, 6, 1));
        assert_eq!(ds.records[1].profit, -30.0);
        assert_eq!(ds.categories, vec!["Furniture", "Technology"]);
    }

    #[test]
    fn empty_json_array_is_an_empty_dataset() {
        assert!(parse_json("[]").unwrap().is_empty());
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("sales.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }
}
