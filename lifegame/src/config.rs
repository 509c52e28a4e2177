//! Run settings shared by the front ends.

use std::time::Duration;

use crate::error::{LifeError, Result};
use crate::grid::{DEFAULT_SIDE, Grid};
use crate::patterns;
use crate::scheduler::DEFAULT_PERIOD;

/// How the grid is seeded before the first step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Seed {
    Empty,
    Pattern(String),
    Random(u64),
}

impl Seed {
    /// Seeds `grid`; a pattern name that is not in the library is an error.
    pub fn apply(&self, grid: &mut Grid) -> Result<()> {
        match self {
            Seed::Empty => grid.clear(),
            Seed::Pattern(name) => patterns::apply_pattern(grid, patterns::find(name)?),
            Seed::Random(seed) => grid.randomize(*seed),
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub period: Duration,
    pub seed: Seed,
    /// Generations the headless runner plays before exiting.
    pub generations: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIDE,
            height: DEFAULT_SIDE,
            period: DEFAULT_PERIOD,
            seed: Seed::Empty,
            generations: 40,
        }
    }
}

impl Config {
    /// Positional arguments: `[width] [height] [generations] [pattern | random:<seed>]`.
    ///
    /// Missing arguments keep their defaults; present ones must parse.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        let defaults = Self::default();

        let (width, height) = match (args.first(), args.get(1)) {
            (Some(w), Some(h)) => parse_dimensions(w, h)?,
            (Some(w), None) => parse_dimensions(w, &defaults.height.to_string())?,
            _ => (defaults.width, defaults.height),
        };
        let generations = match args.get(2) {
            Some(s) => s.trim().parse().map_err(|_| LifeError::InvalidArgument {
                name: "generations",
                value: s.clone(),
            })?,
            None => defaults.generations,
        };
        let seed = match args.get(3) {
            Some(s) => parse_seed(s)?,
            None => defaults.seed,
        };

        Ok(Self {
            width,
            height,
            period: defaults.period,
            seed,
            generations,
        })
    }
}

/// Parses recreate-form text. Both values must be positive integers.
pub fn parse_dimensions(width: &str, height: &str) -> Result<(usize, usize)> {
    let parse = |s: &str| s.trim().parse::<usize>().ok().filter(|&n| n > 0);
    match (parse(width), parse(height)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(LifeError::InvalidDimensions {
            width: width.to_string(),
            height: height.to_string(),
        }),
    }
}

fn parse_seed(s: &str) -> Result<Seed> {
    match s.strip_prefix("random:") {
        Some(n) => n
            .trim()
            .parse()
            .map(Seed::Random)
            .map_err(|_| LifeError::InvalidArgument {
                name: "seed",
                value: s.to_string(),
            }),
        None if s == "random" => Ok(Seed::Random(42)),
        None => Ok(Seed::Pattern(s.to_string())),
    }
}
