// patterns.rs - Named seed patterns in `Grid::put` row syntax

use crate::error::{LifeError, Result};
use crate::grid::Grid;

#[derive(Debug)]
pub struct Pattern {
    pub name: &'static str,
    /// `*` = live, `.` = dead.
    pub rows: &'static [&'static str],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        rows: &[
            ".*.",
            "..*",
            "***",
        ],
    },
    Pattern {
        name: "Blinker",
        rows: &["***"],
    },
    Pattern {
        name: "Toad",
        rows: &[
            ".***",
            "***.",
        ],
    },
    Pattern {
        name: "Beacon",
        rows: &[
            "**..",
            "**..",
            "..**",
            "..**",
        ],
    },
    Pattern {
        name: "Pulsar",
        rows: &[
            "..***...***..",
            ".............",
            "*....*.*....*",
            "*....*.*....*",
            "*....*.*....*",
            "..***...***..",
            ".............",
            "..***...***..",
            "*....*.*....*",
            "*....*.*....*",
            "*....*.*....*",
            ".............",
            "..***...***..",
        ],
    },
    Pattern {
        name: "R-pentomino",
        rows: &[
            ".**",
            "**.",
            ".*.",
        ],
    },
    Pattern {
        name: "Gosper Glider Gun",
        rows: &[
            "........................*...........",
            "......................*.*...........",
            "............**......**............**",
            "...........*...*....**............**",
            "**........*.....*...**..............",
            "**........*...*.**....*.*...........",
            "..........*.....*.......*...........",
            "...........*...*....................",
            "............**......................",
        ],
    },
];

impl Pattern {
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Top-left corner that centres the pattern on a `w` x `h` grid.
    pub fn centered_origin(&self, w: usize, h: usize) -> (i32, i32) {
        let left = (w as i64 - self.width() as i64) / 2;
        let top = (h as i64 - self.height() as i64) / 2;
        (left as i32, top as i32)
    }

    /// Writes the pattern at `(left, top)`; overhang is clipped.
    pub fn stamp(&self, grid: &mut Grid, left: i32, top: i32) {
        grid.put(left, top, self.rows);
    }
}

/// Case-insensitive lookup; spaces and underscores match dashes.
pub fn find(name: &str) -> Result<&'static Pattern> {
    let wanted = normalize(name);
    PATTERNS
        .iter()
        .find(|p| normalize(p.name) == wanted)
        .ok_or_else(|| LifeError::UnknownPattern(name.to_string()))
}

/// Clears the grid, then stamps `pattern` in its centre.
pub fn apply_pattern(grid: &mut Grid, pattern: &Pattern) {
    grid.clear();
    let (left, top) = pattern.centered_origin(grid.width(), grid.height());
    pattern.stamp(grid, left, top);
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c == ' ' || c == '_' { '-' } else { c.to_ascii_lowercase() })
        .collect()
}
