mod app;
mod color;
mod data;
mod format;
mod state;
mod ui;

use std::path::PathBuf;

use app::SalesDashboardApp;
use clap::Parser;
use eframe::egui;

/// Interactive sales dashboard.
#[derive(Debug, Parser)]
#[command(name = "sales-dashboard", version, about)]
struct Cli {
    /// Sales file to open at start-up (.csv, .json or .parquet).
    data: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let cli = Cli::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sales Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(SalesDashboardApp::new(cli.data)))),
    )
}
