// main.rs - Desktop front end for the lifegame engine

use eframe::egui;
use tracing_subscriber::EnvFilter;

use lifegame::{Config, Grid};

mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_args(std::env::args().skip(1))?;
    let runtime = tokio::runtime::Runtime::new()?;

    let mut grid = Grid::new(config.width, config.height);
    config.seed.apply(&mut grid)?;
    let session = ui::Session::new(grid, config.period, &runtime)?;
    tracing::info!(width = config.width, height = config.height, "opening window");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 950.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |cc| Box::new(ui::LifeApp::new(cc.egui_ctx.clone(), runtime, session, &config))),
    )?;
    Ok(())
}
