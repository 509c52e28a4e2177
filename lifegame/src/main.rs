// main.rs - Headless runner: steps on the scheduler and prints every frame

use std::io;

use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use lifegame::{Config, Grid, LifeError, Renderer, Scheduler, SharedGrid, TextRenderer};

#[tokio::main]
async fn main() -> Result<(), LifeError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let config = Config::from_args(std::env::args().skip(1))?;
    tracing::info!(
        width = config.width,
        height = config.height,
        generations = config.generations,
        seed = ?config.seed,
        "starting headless run"
    );

    let mut grid = Grid::new(config.width, config.height);
    config.seed.apply(&mut grid)?;

    let mut renderer = TextRenderer::new(io::stdout());
    renderer.render(&grid.view());
    grid.set_on_changed(move |view| renderer.render(view));

    // Fires after the renderer, so the last frame is out before we stop.
    let (tx, mut rx) = watch::channel(grid.generation());
    grid.subscribe(Box::new(move |view| {
        tx.send_replace(view.generation);
    }));

    let mut scheduler = Scheduler::with_current_runtime(SharedGrid::new(grid), config.period)?;
    scheduler.start();

    let target = config.generations;
    if rx.wait_for(|&g| g >= target).await.is_err() {
        tracing::warn!("grid dropped before reaching the target generation");
    }
    scheduler.stop();

    let grid = scheduler.grid().lock();
    tracing::info!(
        generation = grid.generation(),
        population = grid.population(),
        "run finished"
    );
    Ok(())
}
