//! Change notification and the capability traits consumed by front ends.

use std::collections::VecDeque;

use crate::grid::{Grid, GridView};

/// Callback invoked after every grid mutation.
///
/// Runs while the grid is exclusively borrowed, so it must not try to reach
/// the same grid again (for example through a [`crate::SharedGrid`] lock).
pub type Observer = Box<dyn FnMut(&GridView<'_>) + Send>;

/// Handle returned by [`Grid::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Primary callback slot followed by subscribers in registration order.
#[derive(Default)]
pub(crate) struct Observers {
    primary: Option<Observer>,
    subscribers: Vec<(ObserverId, Observer)>,
    next_id: u64,
}

impl Observers {
    pub(crate) fn set_primary(&mut self, observer: Observer) {
        self.primary = Some(observer);
    }

    pub(crate) fn clear_primary(&mut self) {
        self.primary = None;
    }

    pub(crate) fn subscribe(&mut self, observer: Observer) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.subscribers.len() + usize::from(self.primary.is_some())
    }

    pub(crate) fn notify(&mut self, view: &GridView<'_>) {
        if let Some(primary) = self.primary.as_mut() {
            primary(view);
        }
        for (_, observer) in &mut self.subscribers {
            observer(view);
        }
    }
}

/// A surface that can draw the grid.
///
/// The engine makes no claim about which cells changed; a renderer may redraw
/// everything from the view it is handed.
pub trait Renderer {
    fn render(&mut self, view: &GridView<'_>);
}

/// Produces cell toggles in grid coordinates, e.g. from mouse clicks.
pub trait InputSource {
    /// Next pending toggle, or `None` when drained.
    fn next_toggle(&mut self) -> Option<(i32, i32)>;
}

impl InputSource for VecDeque<(i32, i32)> {
    fn next_toggle(&mut self) -> Option<(i32, i32)> {
        self.pop_front()
    }
}

/// Drains `source` into [`Grid::reverse_cell`]. Returns how many toggles were read.
pub fn apply_input<S: InputSource + ?Sized>(grid: &mut Grid, source: &mut S) -> usize {
    let mut applied = 0;
    while let Some((x, y)) = source.next_toggle() {
        grid.reverse_cell(x, y);
        applied += 1;
    }
    applied
}
