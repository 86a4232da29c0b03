//! Score-only alignment in two rolling rows.
//!
//! Same time cost as the full engine, O(n·m), but only O(m) cells live at
//! once. No traceback is possible, so only the optimal score and the number
//! of optimal end cells are reported.

use log::debug;

use crate::alignment_mode::ModePolicy;
use crate::matrix::{fill_row, Position};
use crate::scoring::SubstitutionScore;
use crate::termination::BestCells;
use crate::AlignerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSummary {
    pub score: i32,
    pub optimal_count: usize,
}

pub fn score_only<S: SubstitutionScore>(
    s1: &[u8],
    s2: &[u8],
    scorer: &S,
    gap: i32,
    policy: &ModePolicy,
) -> Result<ScoreSummary, AlignerError> {
    let (n, m) = (s1.len(), s2.len());
    debug!("Score-only pass over {}x{} cells in two rows", n + 1, m + 1);

    let mut prev = (0..=m)
        .map(|j| policy.init.top(j, gap))
        .collect::<Result<Vec<i32>, _>>()?;
    let mut curr = vec![0; m + 1];
    let mut best = BestCells::new(policy.extremum);
    observe_row(&mut best, &prev, 0, n, m, policy);

    for i in 1..=n {
        fill_row(&prev, &mut curr, i, s1[i - 1], s2, scorer, gap, policy)?;
        observe_row(&mut best, &curr, i, n, m, policy);
        std::mem::swap(&mut prev, &mut curr);
    }

    // `prev` holds row n after the final swap
    Ok(match best.finish() {
        Some(termination) => ScoreSummary {
            score: termination.score,
            optimal_count: termination.optimal_count,
        },
        None => ScoreSummary {
            score: prev[m],
            optimal_count: 1,
        },
    })
}

fn observe_row(best: &mut BestCells, row: &[i32], i: usize, n: usize, m: usize, policy: &ModePolicy) {
    for (j, &value) in row.iter().enumerate() {
        if policy.candidates.contains(i, j, n, m) {
            best.observe(value, Position::new(i, j));
        }
    }
}
