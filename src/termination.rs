use log::debug;

use crate::alignment_mode::{Candidates, Extremum};
use crate::matrix::{Position, ScoreMatrix};

/// Optimal score, how many candidate cells reach it, and the first of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Termination {
    pub score: i32,
    pub optimal_count: usize,
    pub start: Position,
}

/// Tracks the best value seen over a stream of candidate cells.
///
/// The first cell holding the optimum wins ties; later equal cells only bump
/// the count.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BestCells {
    extremum: Extremum,
    best: Option<(i32, Position)>,
    count: usize,
}

impl BestCells {
    pub fn new(extremum: Extremum) -> Self {
        Self {
            extremum,
            best: None,
            count: 0,
        }
    }

    pub fn observe(&mut self, value: i32, pos: Position) {
        match self.best {
            Some((best, _)) if value == best => self.count += 1,
            Some((best, _)) if !self.extremum.improves(value, best) => {}
            _ => {
                self.best = Some((value, pos));
                self.count = 1;
            }
        }
    }

    pub fn finish(self) -> Option<Termination> {
        self.best.map(|(score, start)| Termination {
            score,
            optimal_count: self.count,
            start,
        })
    }
}

/// Picks the traceback start cell among `candidates`.
///
/// An empty candidate set falls back to the corner cell.
pub fn select(matrix: &ScoreMatrix, candidates: Candidates, extremum: Extremum) -> Termination {
    let (n, m) = (matrix.rows() - 1, matrix.cols() - 1);
    let mut best = BestCells::new(extremum);
    candidates.visit(n, m, |i, j| best.observe(matrix.get(i, j), Position::new(i, j)));

    let termination = best.finish().unwrap_or(Termination {
        score: matrix.get(n, m),
        optimal_count: 1,
        start: Position::new(n, m),
    });
    debug!(
        "Optimal score {} at ({}, {}), {} optimal cell(s)",
        termination.score, termination.start.i, termination.start.j, termination.optimal_count
    );
    termination
}
