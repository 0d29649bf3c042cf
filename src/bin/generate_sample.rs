//! Writes a deterministic Superstore-style sales file for trying the dashboard.
//!
//! `cargo run --bin generate_sample -- --output sample_sales.csv`
//! (use a `.parquet` extension to get Parquet instead of CSV).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{ArrayRef, Date32Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Days, NaiveDate};
use clap::Parser;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "generate_sample", about = "Generate a sample sales dataset")]
struct Args {
    /// Output file; `.csv` or `.parquet`.
    #[arg(long, default_value = "sample_sales.csv")]
    output: PathBuf,

    /// Number of orders to generate.
    #[arg(long, default_value_t = 2000)]
    rows: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// (category, [(sub-category, typical unit price, typical margin)])
const CATALOGUE: &[(&str, &[(&str, f64, f64)])] = &[
    (
        "Furniture",
        &[
            ("Bookcases", 180.0, -0.03),
            ("Chairs", 150.0, 0.08),
            ("Furnishings", 40.0, 0.14),
            ("Tables", 260.0, -0.09),
        ],
    ),
    (
        "Office Supplies",
        &[
            ("Appliances", 120.0, 0.17),
            ("Art", 12.0, 0.24),
            ("Binders", 20.0, 0.15),
            ("Envelopes", 25.0, 0.42),
            ("Fasteners", 6.0, 0.31),
            ("Labels", 8.0, 0.44),
            ("Paper", 18.0, 0.43),
            ("Storage", 90.0, 0.10),
            ("Supplies", 30.0, 0.03),
        ],
    ),
    (
        "Technology",
        &[
            ("Accessories", 70.0, 0.25),
            ("Copiers", 700.0, 0.37),
            ("Machines", 450.0, 0.02),
            ("Phones", 120.0, 0.13),
        ],
    ),
];

const REGIONS: &[&str] = &["Central", "East", "South", "West"];
const DISCOUNTS: &[f64] = &[0.0, 0.0, 0.0, 0.1, 0.2, 0.3];

#[derive(Debug, Serialize)]
struct Order {
    #[serde(rename = "Row_ID")]
    row_id: i64,
    #[serde(rename = "Order_Date")]
    order_date: NaiveDate,
    #[serde(rename = "Region")]
    region: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Sub_Category")]
    sub_category: String,
    #[serde(rename = "Sales")]
    sales: f64,
    #[serde(rename = "Quantity")]
    quantity: i64,
    #[serde(rename = "Discount")]
    discount: f64,
    #[serde(rename = "Profit")]
    profit: f64,
}

fn round_cents(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn generate_orders(rows: usize, rng: &mut SimpleRng) -> Result<Vec<Order>> {
    let first_day = NaiveDate::from_ymd_opt(2014, 1, 1).context("start date")?;
    let span_days = 4 * 365;

    let mut orders = Vec::with_capacity(rows);
    for i in 0..rows {
        let (category, subs) = *rng.pick(CATALOGUE);
        let &(sub_category, unit_price, margin) = rng.pick(subs);

        let order_date = first_day
            .checked_add_days(Days::new(rng.below(span_days) as u64))
            .context("order date out of range")?;
        let quantity = 1 + rng.below(9) as i64;
        let discount = *rng.pick(DISCOUNTS);

        let price = (unit_price * rng.gauss(1.0, 0.25)).max(unit_price * 0.2);
        let sales = round_cents(price * quantity as f64 * (1.0 - discount));
        let profit = round_cents(sales * (margin - discount + rng.gauss(0.0, 0.05)));

        orders.push(Order {
            row_id: i as i64 + 1,
            order_date,
            region: rng.pick(REGIONS).to_string(),
            category: category.to_string(),
            sub_category: sub_category.to_string(),
            sales,
            quantity,
            discount,
            profit,
        });
    }
    Ok(orders)
}

fn write_csv(path: &Path, orders: &[Order]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    for order in orders {
        writer.serialize(order).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, orders: &[Order]) -> Result<()> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).context("epoch")?;
    let strings = |f: fn(&Order) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(orders.iter().map(f).collect::<Vec<_>>()))
    };
    let floats = |f: fn(&Order) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(orders.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("Row_ID", DataType::Int64, false),
        Field::new("Order_Date", DataType::Date32, false),
        Field::new("Region", DataType::Utf8, false),
        Field::new("Category", DataType::Utf8, false),
        Field::new("Sub_Category", DataType::Utf8, false),
        Field::new("Sales", DataType::Float64, false),
        Field::new("Quantity", DataType::Int64, false),
        Field::new("Discount", DataType::Float64, false),
        Field::new("Profit", DataType::Float64, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(orders.iter().map(|o| o.row_id).collect::<Vec<_>>())),
        Arc::new(Date32Array::from(
            orders
                .iter()
                .map(|o| (o.order_date - epoch).num_days() as i32)
                .collect::<Vec<_>>(),
        )),
        strings(|o| o.region.as_str()),
        strings(|o| o.category.as_str()),
        strings(|o| o.sub_category.as_str()),
        floats(|o| o.sales),
        Arc::new(Int64Array::from(orders.iter().map(|o| o.quantity).collect::<Vec<_>>())),
        floats(|o| o.discount),
        floats(|o| o.profit),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);
    let orders = generate_orders(args.rows, &mut rng)?;

    let ext = args
        .output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "csv" => write_csv(&args.output, &orders)?,
        "parquet" | "pq" => write_parquet(&args.output, &orders)?,
        other => bail!("Unsupported output extension: .{other}"),
    }

    println!("Wrote {} orders to {}", orders.len(), args.output.display());
    Ok(())
}
