// ui.rs - egui front end: draws frames, turns clicks into toggles, drives the scheduler

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use tokio::runtime::Runtime;

use lifegame::{
    Config, CycleDetector, Grid, GridView, PATTERNS, Renderer, Scheduler, SharedGrid, Snapshot,
    apply_input, parse_dimensions, patterns,
};

const MAX_BOX_SIZE: f32 = 15.0;
const SPACING: f32 = 0.5;
const BOARD_EXTENT: f32 = 760.0;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Latest frame published by the grid, read by the paint pass.
#[derive(Default)]
struct Frame {
    snapshot: Snapshot,
    detector: CycleDetector,
    cycled: bool,
}

/// Renderer handed to the grid: copies each frame out and asks egui to repaint.
struct FrameSink {
    frame: Arc<Mutex<Frame>>,
    ctx: egui::Context,
}

impl Renderer for FrameSink {
    fn render(&mut self, view: &GridView<'_>) {
        let mut frame = lock(&self.frame);
        let stepped = view.generation > 0 && view.generation == frame.snapshot.generation + 1;
        if stepped {
            if frame.detector.check(view) {
                frame.cycled = true;
            }
        } else {
            frame.detector.reset();
            frame.cycled = false;
        }
        frame.snapshot = view.to_snapshot();
        drop(frame);
        self.ctx.request_repaint();
    }
}

/// One grid and the scheduler that steps it. Recreating drops both.
pub struct Session {
    scheduler: Scheduler,
    frame: Arc<Mutex<Frame>>,
}

impl Session {
    pub fn new(grid: Grid, period: Duration, runtime: &Runtime) -> lifegame::Result<Self> {
        let frame = Arc::new(Mutex::new(Frame {
            snapshot: grid.view().to_snapshot(),
            ..Frame::default()
        }));
        let scheduler = Scheduler::new(SharedGrid::new(grid), period, runtime.handle().clone())?;
        Ok(Self { scheduler, frame })
    }

    /// Routes grid changes into the shared frame and wakes `ctx`.
    fn attach(&self, ctx: &egui::Context) {
        self.grid().lock().attach_renderer(FrameSink {
            frame: Arc::clone(&self.frame),
            ctx: ctx.clone(),
        });
    }

    fn grid(&self) -> &SharedGrid {
        self.scheduler.grid()
    }
}

pub struct LifeApp {
    runtime: Runtime,
    ctx: egui::Context,
    period: Duration,
    session: Session,
    clicks: VecDeque<(i32, i32)>,
    selected_pattern: usize,
    random_seed: u64,
    width_text: String,
    height_text: String,
    recreate_error: Option<String>,
    live_color: Color32,
    dead_color: Color32,
}

impl LifeApp {
    pub fn new(ctx: egui::Context, runtime: Runtime, session: Session, config: &Config) -> Self {
        session.attach(&ctx);
        Self {
            width_text: config.width.to_string(),
            height_text: config.height.to_string(),
            runtime,
            ctx,
            period: config.period,
            session,
            clicks: VecDeque::new(),
            selected_pattern: 0,
            random_seed: 1,
            recreate_error: None,
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
        }
    }

    fn recreate(&mut self) {
        let (width, height) = match parse_dimensions(&self.width_text, &self.height_text) {
            Ok(dims) => dims,
            Err(err) => {
                self.recreate_error = Some(err.to_string());
                return;
            }
        };
        match Session::new(Grid::new(width, height), self.period, &self.runtime) {
            Ok(session) => {
                tracing::info!(width, height, "recreated grid");
                session.attach(&self.ctx);
                self.session = session;
                self.clicks.clear();
                self.recreate_error = None;
            }
            Err(err) => self.recreate_error = Some(err.to_string()),
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui, snapshot: &Snapshot) {
        ui.horizontal(|ui| {
            let running = self.session.scheduler.is_running();
            let button_text = if running { "⏸ Stop" } else { "▶ Start" };
            if ui.button(button_text).clicked() {
                self.session.scheduler.toggle();
            }

            if ui.button("⏹ Clear").clicked() {
                self.session.scheduler.clear();
            }

            if ui.button("🎲 Random").clicked() {
                self.session.scheduler.stop();
                self.session.grid().lock().randomize(self.random_seed);
                self.random_seed = self.random_seed.wrapping_add(1);
            }

            ui.separator();

            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });

            if ui.button("Apply Pattern").clicked() {
                self.session.scheduler.stop();
                patterns::apply_pattern(&mut self.session.grid().lock(), &PATTERNS[self.selected_pattern]);
            }

            ui.separator();

            ui.label(format!("Generation: {}", snapshot.generation));
        });
    }

    fn recreate_row(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("width:");
            ui.add(egui::TextEdit::singleline(&mut self.width_text).desired_width(40.0));
            ui.label("height:");
            ui.add(egui::TextEdit::singleline(&mut self.height_text).desired_width(40.0));
            if ui.button("Recreate").clicked() {
                self.recreate();
            }

            ui.separator();

            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.live_color);
            ui.label("Dead:");
            ui.color_edit_button_srgba(&mut self.dead_color);
        });
        if let Some(err) = &self.recreate_error {
            ui.colored_label(Color32::RED, err.as_str());
        }
    }

    /// Paints the frame; a click queues a toggle for the cell under the pointer.
    fn board(&mut self, ui: &mut egui::Ui, snapshot: &Snapshot) {
        let longest = snapshot.width.max(snapshot.height).max(1) as f32;
        let box_size = (BOARD_EXTENT / longest - SPACING).clamp(1.0, MAX_BOX_SIZE);
        let pitch = box_size + SPACING;

        let start_pos = ui.cursor().min;
        let total_size = Vec2::new(
            pitch * snapshot.width as f32 - SPACING,
            pitch * snapshot.height as f32 - SPACING,
        );
        let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

        painter.rect_filled(Rect::from_min_size(start_pos, total_size), 0.0, Color32::BLACK);

        let view = snapshot.view();
        for y in 0..view.height {
            for x in 0..view.width {
                let rect = Rect::from_min_size(
                    egui::pos2(start_pos.x + x as f32 * pitch, start_pos.y + y as f32 * pitch),
                    Vec2::splat(box_size),
                );
                let color = if view.get(x, y) { self.live_color } else { self.dead_color };
                painter.rect_filled(rect, 1.0, color);
                if box_size >= 4.0 {
                    painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
                }
            }
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let x = ((pos.x - start_pos.x) / pitch).floor() as i32;
                let y = ((pos.y - start_pos.y) / pitch).floor() as i32;
                self.clicks.push_back((x, y));
            }
        }
    }

    fn stats(ui: &mut egui::Ui, snapshot: &Snapshot) {
        let total = snapshot.cells.len();
        let live_cells = snapshot.view().population();
        ui.horizontal(|ui| {
            ui.label(format!("Live cells: {}", live_cells));
            ui.label(format!("Dead cells: {}", total - live_cells));
            ui.label(format!(
                "Population: {:.1}%",
                live_cells as f32 / total.max(1) as f32 * 100.0
            ));
        });
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Clicks from the previous pass become toggles before drawing.
        if !self.clicks.is_empty() {
            apply_input(&mut self.session.grid().lock(), &mut self.clicks);
        }

        let (snapshot, cycled) = {
            let mut frame = lock(&self.session.frame);
            (frame.snapshot.clone(), std::mem::take(&mut frame.cycled))
        };
        if cycled && self.session.scheduler.is_running() {
            tracing::info!(generation = snapshot.generation, "cycle detected, pausing");
            self.session.scheduler.stop();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            self.controls(ui, &snapshot);
            ui.separator();
            self.recreate_row(ui);
            ui.separator();

            ui.label("Click cells to toggle them alive/dead. Use Start/Stop to run the simulation.");

            ui.separator();
            self.board(ui, &snapshot);
            ui.separator();
            Self::stats(ui, &snapshot);
        });
    }
}
