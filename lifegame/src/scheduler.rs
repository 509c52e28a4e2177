//! Periodic stepping driven by a tokio interval.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::error::{LifeError, Result};
use crate::grid::SharedGrid;

/// Default time between scheduled steps.
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(200);

/// The live ticker task. Dropping it cancels any future ticks.
#[derive(Debug)]
struct Ticker {
    task: JoinHandle<()>,
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[derive(Debug)]
enum State {
    Idle,
    Running(Ticker),
}

/// Steps one grid at a fixed period while running.
///
/// `start` and `stop` are idempotent: at most one ticker exists at a time,
/// and it is owned by the `Running` state.
#[derive(Debug)]
pub struct Scheduler {
    grid: SharedGrid,
    period: Duration,
    runtime: Handle,
    state: State,
}

impl Scheduler {
    pub fn new(grid: SharedGrid, period: Duration, runtime: Handle) -> Result<Self> {
        if period.is_zero() {
            return Err(LifeError::InvalidPeriod);
        }
        Ok(Self {
            grid,
            period,
            runtime,
            state: State::Idle,
        })
    }

    /// Builds a scheduler on the runtime the caller is running in.
    pub fn with_current_runtime(grid: SharedGrid, period: Duration) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| LifeError::NoRuntime)?;
        Self::new(grid, period, runtime)
    }

    pub fn grid(&self) -> &SharedGrid {
        &self.grid
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running(_))
    }

    /// Begins stepping every period, first tick one period from now.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        let task = self
            .runtime
            .spawn(run_ticks(self.grid.clone(), self.period));
        self.state = State::Running(Ticker { task });
        tracing::debug!(period_ms = self.period.as_millis() as u64, "scheduler started");
    }

    /// Cancels future ticks. A tick already stepping the grid finishes first.
    pub fn stop(&mut self) {
        if let State::Running(ticker) = std::mem::replace(&mut self.state, State::Idle) {
            drop(ticker);
            tracing::debug!("scheduler stopped");
        }
    }

    pub fn toggle(&mut self) {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Stops stepping, then clears the grid.
    pub fn clear(&mut self) {
        self.stop();
        self.grid.lock().clear();
    }
}

async fn run_ticks(grid: SharedGrid, period: Duration) {
    let mut ticks = time::interval_at(Instant::now() + period, period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticks.tick().await;
        let generation = {
            let mut grid = grid.lock();
            grid.step();
            grid.generation()
        };
        tracing::trace!(generation, "scheduled step");
    }
}
