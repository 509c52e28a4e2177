// grid.rs - Toroidal grid engine for Conway's Game of Life

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::observer::{Observer, ObserverId, Observers, Renderer};

/// Side length substituted for a zero width or height.
pub const DEFAULT_SIDE: usize = 20;

/// Borrowed, read-only view of a grid handed to observers.
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a> {
    pub width: usize,
    pub height: usize,
    pub generation: u64,
    /// Row-major, index = `x + y * width`.
    pub cells: &'a [bool],
}

impl GridView<'_> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[x + y * self.width]
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.width,
            height: self.height,
            generation: self.generation,
            cells: self.cells.to_vec(),
        }
    }
}

/// Owned copy of a grid's state, for handing frames across threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    pub generation: u64,
    pub cells: Vec<bool>,
}

impl Snapshot {
    pub fn view(&self) -> GridView<'_> {
        GridView {
            width: self.width,
            height: self.height,
            generation: self.generation,
            cells: &self.cells,
        }
    }
}

/// Fixed-size toroidal Life grid with double-buffered stepping.
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    scratch: Vec<bool>,
    generation: u64,
    observers: Observers,
}

impl Grid {
    /// Creates an all-dead grid at generation 0.
    ///
    /// A zero `width` or `height` is replaced by [`DEFAULT_SIDE`].
    pub fn new(width: usize, height: usize) -> Self {
        let width = if width == 0 { DEFAULT_SIDE } else { width };
        let height = if height == 0 { DEFAULT_SIDE } else { height };
        tracing::debug!(width, height, "creating grid");

        let mut grid = Self {
            width,
            height,
            cells: vec![false; width * height],
            scratch: vec![false; width * height],
            generation: 0,
            observers: Observers::default(),
        };
        grid.clear();
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current generation, row-major.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// State of `(x, y)`; anything outside the grid reads as dead.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[x + y * self.width]
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn view(&self) -> GridView<'_> {
        GridView {
            width: self.width,
            height: self.height,
            generation: self.generation,
            cells: &self.cells,
        }
    }

    /// Live cells among the 8 toroidal neighbors of `(x, y)`.
    ///
    /// Panics if `(x, y)` lies outside the grid.
    pub fn live_neighbors(&self, x: usize, y: usize) -> u8 {
        assert!(x < self.width && y < self.height, "cell ({x}, {y}) outside grid");
        count_neighbors(&self.cells, self.width, self.height, x, y)
    }

    /// Replaces the primary change callback.
    pub fn set_on_changed<F>(&mut self, callback: F)
    where
        F: FnMut(&GridView<'_>) + Send + 'static,
    {
        self.observers.set_primary(Box::new(callback));
    }

    pub fn clear_on_changed(&mut self) {
        self.observers.clear_primary();
    }

    /// Adds an observer that fires after the primary callback, in registration order.
    pub fn subscribe(&mut self, observer: Observer) -> ObserverId {
        self.observers.subscribe(observer)
    }

    /// Subscribes a renderer so it redraws after every mutation.
    pub fn attach_renderer<R>(&mut self, mut renderer: R) -> ObserverId
    where
        R: Renderer + Send + 'static,
    {
        self.subscribe(Box::new(move |view| renderer.render(view)))
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Advances one generation.
    ///
    /// Next states are computed from the current buffer into the scratch
    /// buffer, then the two are swapped.
    pub fn step(&mut self) {
        let (w, h) = (self.width, self.height);
        for y in 0..h {
            for x in 0..w {
                let i = x + y * w;
                let count = count_neighbors(&self.cells, w, h, x, y);
                self.scratch[i] = match (self.cells[i], count) {
                    (true, 2) | (true, 3) => true, // Survival
                    (false, 3) => true,            // Birth
                    _ => false,                    // Death or stays dead
                };
            }
        }

        std::mem::swap(&mut self.cells, &mut self.scratch);
        self.generation += 1;
        self.notify_changed();
    }

    /// Kills every cell and resets the generation counter.
    pub fn clear(&mut self) {
        self.cells.fill(false);
        self.generation = 0;
        self.notify_changed();
    }

    /// Flips `(x, y)`. Out-of-range coordinates are ignored without notifying.
    pub fn reverse_cell(&mut self, x: i32, y: i32) {
        let Some(i) = self.index_of(x, y) else {
            return;
        };
        self.cells[i] = !self.cells[i];
        self.notify_changed();
    }

    /// Writes `rows` with its top-left corner at `(left, top)`.
    ///
    /// `*` marks a live cell, any other character a dead one. Positions that
    /// fall outside the grid are clipped.
    pub fn put<S: AsRef<str>>(&mut self, left: i32, top: i32, rows: &[S]) {
        let mut clipped = 0usize;
        for (ry, row) in rows.iter().enumerate() {
            for (rx, ch) in row.as_ref().chars().enumerate() {
                let x = i64::from(left) + rx as i64;
                let y = i64::from(top) + ry as i64;
                match self.index_of_wide(x, y) {
                    Some(i) => self.cells[i] = ch == '*',
                    None => clipped += 1,
                }
            }
        }
        if clipped > 0 {
            tracing::debug!(left, top, clipped, "pattern clipped at grid edge");
        }
        self.notify_changed();
    }

    /// Fills roughly a third of the grid from `seed` and resets the generation.
    pub fn randomize(&mut self, seed: u64) {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        for cell in &mut self.cells {
            state = state.wrapping_mul(1103515245).wrapping_add(12345);
            *cell = (state >> 33) % 3 == 0;
        }
        self.generation = 0;
        self.notify_changed();
    }

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        self.index_of_wide(i64::from(x), i64::from(y))
    }

    fn index_of_wide(&self, x: i64, y: i64) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(x + y * self.width)
    }

    fn notify_changed(&mut self) {
        let Self {
            width,
            height,
            cells,
            generation,
            observers,
            ..
        } = self;
        observers.notify(&GridView {
            width: *width,
            height: *height,
            generation: *generation,
            cells: cells.as_slice(),
        });
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("generation", &self.generation)
            .field("population", &self.population())
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Neighbor count with edge wrap on both axes.
#[inline]
fn count_neighbors(cells: &[bool], w: usize, h: usize, x: usize, y: usize) -> u8 {
    let up = if y == 0 { h - 1 } else { y - 1 };
    let down = if y == h - 1 { 0 } else { y + 1 };
    let left = if x == 0 { w - 1 } else { x - 1 };
    let right = if x == w - 1 { 0 } else { x + 1 };

    let neighbors = [
        (left, up),   (x, up),   (right, up),
        (left, y),               (right, y),
        (left, down), (x, down), (right, down),
    ];
    neighbors
        .iter()
        .filter(|&&(nx, ny)| cells[nx + ny * w])
        .count() as u8
}

/// Grid handle shared between the scheduler's ticker and direct callers.
///
/// The lock serialises mutations; observers run while it is held.
#[derive(Debug, Clone)]
pub struct SharedGrid(Arc<Mutex<Grid>>);

impl SharedGrid {
    pub fn new(grid: Grid) -> Self {
        Self(Arc::new(Mutex::new(grid)))
    }

    /// Locks the grid. A lock poisoned by a panicking observer is recovered,
    /// since every mutation leaves the buffers consistent before notifying.
    pub fn lock(&self) -> MutexGuard<'_, Grid> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<Grid> for SharedGrid {
    fn from(grid: Grid) -> Self {
        Self::new(grid)
    }
}
