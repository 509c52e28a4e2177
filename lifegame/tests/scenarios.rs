use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use lifegame::{
    CycleDetector, Grid, Scheduler, SharedGrid, Snapshot, apply_input, parse_dimensions, patterns,
};

fn live_set(grid: &Grid) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if grid.get(x, y) {
                out.push((x, y));
            }
        }
    }
    out
}

#[test]
fn blinker_has_period_two() {
    let mut grid = Grid::new(5, 5);
    grid.put(1, 2, &["***"]);
    let horizontal = live_set(&grid);
    assert_eq!(horizontal, vec![(1, 2), (2, 2), (3, 2)]);

    grid.step();
    assert_eq!(live_set(&grid), vec![(2, 1), (2, 2), (2, 3)]);

    grid.step();
    assert_eq!(live_set(&grid), horizontal);
    assert_eq!(grid.generation(), 2);
}

#[test]
fn glider_moves_one_diagonal_every_four_steps() {
    let mut grid = Grid::new(20, 20);
    grid.put(5, 5, patterns::find("glider").unwrap().rows);
    let start = live_set(&grid);
    assert_eq!(start.len(), 5);

    for _ in 0..4 {
        grid.step();
    }
    let shifted: Vec<(usize, usize)> = start.iter().map(|&(x, y)| (x + 1, y + 1)).collect();
    assert_eq!(live_set(&grid), shifted);
    assert_eq!(grid.generation(), 4);
}

#[test]
fn glider_wraps_around_the_torus() {
    // 8x8 glider returns home after 4 * 8 steps.
    let mut grid = Grid::new(8, 8);
    grid.put(0, 0, &[".*.", "..*", "***"]);
    let start = grid.cells().to_vec();
    for _ in 0..32 {
        grid.step();
    }
    assert_eq!(grid.cells(), &start[..]);
}

#[test]
fn identical_seeds_step_identically() {
    let mut a = Grid::new(16, 12);
    let mut b = Grid::new(16, 12);
    a.randomize(2024);
    b.randomize(2024);
    for _ in 0..2 {
        a.step();
        b.step();
    }
    assert_eq!(a.cells(), b.cells());
    assert_eq!(a.generation(), b.generation());
}

#[test]
fn pattern_write_touches_only_its_cells() {
    let mut grid = Grid::new(4, 4);
    grid.clear();
    grid.put(1, 1, &["*.", ".*"]);
    assert_eq!(live_set(&grid), vec![(1, 1), (2, 2)]);
}

#[test]
fn out_of_range_toggles_change_nothing() {
    let mut grid = Grid::new(4, 4);
    grid.put(0, 0, &["**"]);
    let fired = Arc::new(AtomicU64::new(0));
    let counter = Arc::clone(&fired);
    grid.set_on_changed(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let before = grid.cells().to_vec();

    for (x, y) in [(-1, 0), (4, 0), (0, 4)] {
        grid.reverse_cell(x, y);
    }
    assert_eq!(grid.cells(), &before[..]);
    assert_eq!(grid.generation(), 0);
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

#[test]
fn clicks_feed_through_input_source() {
    let mut grid = Grid::new(5, 5);
    let mut clicks = VecDeque::from(vec![(1, 2), (2, 2), (3, 2)]);
    apply_input(&mut grid, &mut clicks);
    grid.step();
    assert_eq!(live_set(&grid), vec![(2, 1), (2, 2), (2, 3)]);
}

#[test]
fn recreate_form_rejects_garbage() {
    assert_eq!(parse_dimensions("12", "7").unwrap(), (12, 7));
    assert!(parse_dimensions("", "7").is_err());
    assert!(parse_dimensions("12", "seven").is_err());
}

#[tokio::test(start_paused = true)]
async fn scheduler_drives_observers_until_stable() {
    let mut grid = Grid::new(6, 6);
    grid.put(2, 2, &["**", "**"]);

    let frames = Arc::new(Mutex::new(Vec::<Snapshot>::new()));
    let sink = Arc::clone(&frames);
    grid.set_on_changed(move |view| sink.lock().unwrap().push(view.to_snapshot()));

    let mut scheduler =
        Scheduler::with_current_runtime(SharedGrid::new(grid), Duration::from_millis(200)).unwrap();
    scheduler.start();
    scheduler.start();
    tokio::time::sleep(Duration::from_millis(700)).await;
    scheduler.stop();

    let frames = frames.lock().unwrap();
    let generations: Vec<u64> = frames.iter().map(|f| f.generation).collect();
    assert_eq!(generations, vec![1, 2, 3]);

    let mut detector = CycleDetector::new();
    assert!(!detector.check(&frames[0].view()));
    assert!(detector.check(&frames[1].view()));
}
