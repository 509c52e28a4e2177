//! Plain-text frames using the same `*` / `.` alphabet as `Grid::put`.

use std::fmt::Write as _;
use std::io::Write;

use crate::grid::GridView;
use crate::observer::Renderer;

/// One line per row, `*` for live cells and `.` for dead ones.
pub fn render_rows(view: &GridView<'_>) -> String {
    let mut out = String::with_capacity((view.width + 1) * view.height);
    for row in view.cells.chunks(view.width) {
        out.extend(row.iter().map(|&alive| if alive { '*' } else { '.' }));
        out.push('\n');
    }
    out
}

/// Writes a header line and the cell rows for every frame.
pub struct TextRenderer<W> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn frame(view: &GridView<'_>) -> String {
        let mut frame = String::new();
        let _ = writeln!(
            frame,
            "generation {} ({} alive)",
            view.generation,
            view.population()
        );
        frame.push_str(&render_rows(view));
        frame
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, view: &GridView<'_>) {
        let frame = Self::frame(view);
        if let Err(err) = self
            .out
            .write_all(frame.as_bytes())
            .and_then(|()| self.out.flush())
        {
            tracing::warn!(%err, "failed to write frame");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    #[test]
    fn test_render_rows() {
        let mut grid = Grid::new(3, 2);
        grid.put(0, 0, &["*.*", ".*."]);
        assert_eq!(render_rows(&grid.view()), "*.*\n.*.\n");
    }

    #[test]
    fn test_rows_round_trip_through_put() {
        let mut grid = Grid::new(5, 5);
        grid.randomize(3);
        let text = render_rows(&grid.view());
        let rows: Vec<&str> = text.lines().collect();

        let mut copy = Grid::new(5, 5);
        copy.put(0, 0, &rows);
        assert_eq!(copy.cells(), grid.cells());
    }

    #[test]
    fn test_renderer_writes_frames() {
        let mut renderer = TextRenderer::new(Vec::new());
        let mut grid = Grid::new(3, 3);
        grid.reverse_cell(1, 1);
        renderer.render(&grid.view());
        grid.step();
        renderer.render(&grid.view());

        let written = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(
            written,
            "generation 0 (1 alive)\n...\n.*.\n...\n\
             generation 1 (0 alive)\n...\n...\n...\n"
        );
    }

    #[test]
    fn test_attached_renderer_follows_mutations() {
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Shared(Arc<Mutex<Vec<u8>>>);
        impl Write for Shared {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let sink = Shared::default();
        let mut grid = Grid::new(2, 1);
        grid.attach_renderer(TextRenderer::new(sink.clone()));
        grid.reverse_cell(0, 0);
        grid.reverse_cell(5, 5);

        let written = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        assert_eq!(written, "generation 0 (1 alive)\n*.\n");
    }
}
