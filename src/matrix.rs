use log::debug;

use crate::alignment_mode::ModePolicy;
use crate::scoring::SubstitutionScore;
use crate::AlignerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub i: usize,
    pub j: usize,
}

impl Position {
    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }
}

/// Dense row-major score matrix of `(n + 1) x (m + 1)` cells.
#[derive(Debug, Clone, Default)]
pub struct ScoreMatrix {
    data: Vec<i32>,
    rows: usize,
    cols: usize,
}

impl ScoreMatrix {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0; rows * cols],
            rows,
            cols,
        }
    }

    /// Resizes to `rows x cols` and zeroes every cell, keeping the allocation.
    pub fn reset(&mut self, rows: usize, cols: usize) {
        self.data.clear();
        self.data.resize(rows * cols, 0);
        self.rows = rows;
        self.cols = cols;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn set(&mut self, row: usize, col: usize, value: i32) {
        self.data[row * self.cols + col] = value;
    }

    pub fn get(&self, row: usize, col: usize) -> i32 {
        self.data[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[i32] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Row `row - 1` and row `row`, the latter mutable.
    fn row_pair_mut(&mut self, row: usize) -> (&[i32], &mut [i32]) {
        let (head, tail) = self.data.split_at_mut(row * self.cols);
        let head: &[i32] = head;
        (&head[(row - 1) * self.cols..], &mut tail[..self.cols])
    }
}

/// Fills `matrix` for `s1` (rows) against `s2` (columns) under `policy`.
///
/// Rows are computed top to bottom and cells left to right; every cell only
/// reads its top, left and diagonal neighbours. A symbol pair missing from
/// the scorer, or a score that leaves the `i32` range, aborts the fill at the
/// first cell that needs it.
pub fn fill<S: SubstitutionScore>(
    matrix: &mut ScoreMatrix,
    s1: &[u8],
    s2: &[u8],
    scorer: &S,
    gap: i32,
    policy: &ModePolicy,
) -> Result<(), AlignerError> {
    let (n, m) = (s1.len(), s2.len());
    matrix.reset(n + 1, m + 1);
    debug!("Filling {}x{} score matrix", n + 1, m + 1);

    for j in 0..=m {
        matrix.set(0, j, policy.init.top(j, gap)?);
    }
    for i in 1..=n {
        let (prev, curr) = matrix.row_pair_mut(i);
        fill_row(prev, curr, i, s1[i - 1], s2, scorer, gap, policy)?;
    }
    Ok(())
}

/// Computes row `i` from row `i - 1`; `a` is `s1[i - 1]`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn fill_row<S: SubstitutionScore>(
    prev: &[i32],
    curr: &mut [i32],
    i: usize,
    a: u8,
    s2: &[u8],
    scorer: &S,
    gap: i32,
    policy: &ModePolicy,
) -> Result<(), AlignerError> {
    let extremum = policy.extremum;
    curr[0] = policy.init.left(i, gap)?;
    for (j, &b) in s2.iter().enumerate().map(|(idx, b)| (idx + 1, b)) {
        let from_top = step(prev[j], gap, i, j)?;
        let from_left = step(curr[j - 1], gap, i, j)?;
        let from_diag = step(prev[j - 1], scorer.score(a, b)?, i, j)?;

        let mut best = extremum.pick(extremum.pick(from_top, from_left), from_diag);
        if let Some(floor) = policy.floor {
            best = best.max(floor);
        }
        curr[j] = best;
    }
    Ok(())
}

/// `value + delta` for cell `(i, j)`, or `ScoreOverflow`.
pub(crate) fn step(value: i32, delta: i32, i: usize, j: usize) -> Result<i32, AlignerError> {
    value.checked_add(delta).ok_or(AlignerError::ScoreOverflow { i, j })
}
