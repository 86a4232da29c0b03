use std::fmt;
use std::str::FromStr;

use crate::AlignerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignmentMode {
    Global,       // Needleman-Wunsch
    Local,        // Smith-Waterman
    Fitting,      // s2 end-to-end inside s1
    Overlap,      // suffix of s1 against prefix of s2
    EditDistance, // unit-cost Levenshtein
}

impl AlignmentMode {
    pub const ALL: [AlignmentMode; 5] = [
        AlignmentMode::Global,
        AlignmentMode::Local,
        AlignmentMode::Fitting,
        AlignmentMode::Overlap,
        AlignmentMode::EditDistance,
    ];

    pub fn policy(self) -> ModePolicy {
        match self {
            AlignmentMode::Global => ModePolicy {
                init: BorderInit::Linear,
                extremum: Extremum::Max,
                floor: None,
                candidates: Candidates::Corner,
                stop: StopRule::Origin,
                substitution: Substitution::Table,
            },
            AlignmentMode::Local => ModePolicy {
                init: BorderInit::Zero,
                extremum: Extremum::Max,
                floor: Some(0),
                candidates: Candidates::Everywhere,
                stop: StopRule::ZeroCell,
                substitution: Substitution::Table,
            },
            AlignmentMode::Fitting => ModePolicy {
                init: BorderInit::TopRowOnly,
                extremum: Extremum::Max,
                floor: None,
                candidates: Candidates::LastColumn,
                stop: StopRule::EitherBorder,
                substitution: Substitution::Table,
            },
            AlignmentMode::Overlap => ModePolicy {
                init: BorderInit::Zero,
                extremum: Extremum::Max,
                floor: None,
                candidates: Candidates::LastColumnThenRow,
                stop: StopRule::EitherBorder,
                substitution: Substitution::Table,
            },
            AlignmentMode::EditDistance => ModePolicy {
                init: BorderInit::Linear,
                extremum: Extremum::Min,
                floor: None,
                candidates: Candidates::Corner,
                stop: StopRule::Origin,
                substitution: Substitution::Unit,
            },
        }
    }

    /// Whether the mode reports a meaningful count of optimal end cells.
    pub fn counts_optima(self) -> bool {
        !matches!(self.policy().candidates, Candidates::Corner)
    }

    /// Signed score contribution of one gap column.
    pub fn gap_step(self, indel_penalty: u32) -> Result<i32, AlignerError> {
        match self.policy().substitution {
            Substitution::Unit => Ok(1),
            Substitution::Table => i32::try_from(indel_penalty)
                .map(|penalty| -penalty)
                .map_err(|_| AlignerError::InvalidPenalty(indel_penalty)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AlignmentMode::Global => "global",
            AlignmentMode::Local => "local",
            AlignmentMode::Fitting => "fitting",
            AlignmentMode::Overlap => "overlap",
            AlignmentMode::EditDistance => "edit-distance",
        }
    }
}

impl fmt::Display for AlignmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlignmentMode {
    type Err = AlignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AlignmentMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| AlignerError::InvalidConfig(format!("unknown alignment mode: {}", s)))
    }
}

/// The fixed rules that turn the shared recurrence into one alignment mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModePolicy {
    pub init: BorderInit,
    pub extremum: Extremum,
    pub floor: Option<i32>,
    pub candidates: Candidates,
    pub stop: StopRule,
    pub substitution: Substitution,
}

/// Values of row 0 and column 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderInit {
    /// Both borders cost one gap per step.
    Linear,
    /// Row 0 costs one gap per step, column 0 is free.
    TopRowOnly,
    Zero,
}

impl BorderInit {
    /// Value of cell `(0, j)`.
    pub fn top(self, j: usize, gap: i32) -> Result<i32, AlignerError> {
        match self {
            BorderInit::Linear | BorderInit::TopRowOnly => gap_run(j, gap, 0, j),
            BorderInit::Zero => Ok(0),
        }
    }

    /// Value of cell `(i, 0)`.
    pub fn left(self, i: usize, gap: i32) -> Result<i32, AlignerError> {
        match self {
            BorderInit::Linear => gap_run(i, gap, i, 0),
            BorderInit::TopRowOnly | BorderInit::Zero => Ok(0),
        }
    }
}

fn gap_run(steps: usize, gap: i32, i: usize, j: usize) -> Result<i32, AlignerError> {
    i32::try_from(steps)
        .ok()
        .and_then(|steps| steps.checked_mul(gap))
        .ok_or(AlignerError::ScoreOverflow { i, j })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    Max,
    Min,
}

impl Extremum {
    pub fn pick(self, a: i32, b: i32) -> i32 {
        match self {
            Extremum::Max => a.max(b),
            Extremum::Min => a.min(b),
        }
    }

    /// `true` when `candidate` strictly improves on `current`.
    pub fn improves(self, candidate: i32, current: i32) -> bool {
        match self {
            Extremum::Max => candidate > current,
            Extremum::Min => candidate < current,
        }
    }
}

/// Cells that may end an optimal alignment, in scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidates {
    /// Only `(n, m)`.
    Corner,
    /// `(i, m)` for `i` in `1..=n`.
    LastColumn,
    /// The last column, then `(n, j)` for `j` in `1..=m`; `(n, m)` once.
    LastColumnThenRow,
    /// Every `(i, j)` with `i, j >= 1`, row-major.
    Everywhere,
}

impl Candidates {
    /// Visits candidate cells of an `(n + 1) x (m + 1)` matrix in scan order.
    pub fn visit<F: FnMut(usize, usize)>(self, n: usize, m: usize, mut f: F) {
        match self {
            Candidates::Corner => f(n, m),
            Candidates::LastColumn => (1..=n).for_each(|i| f(i, m)),
            Candidates::LastColumnThenRow => {
                (1..=n).for_each(|i| f(i, m));
                (1..=m)
                    .filter(|&j| !(j == m && n >= 1))
                    .for_each(|j| f(n, j));
            }
            Candidates::Everywhere => {
                for i in 1..=n {
                    for j in 1..=m {
                        f(i, j);
                    }
                }
            }
        }
    }

    pub fn contains(self, i: usize, j: usize, n: usize, m: usize) -> bool {
        match self {
            Candidates::Corner => i == n && j == m,
            Candidates::LastColumn => j == m && i >= 1,
            Candidates::LastColumnThenRow => (j == m && i >= 1) || (i == n && j >= 1),
            Candidates::Everywhere => i >= 1 && j >= 1,
        }
    }
}

/// Where traceback ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopRule {
    /// At `(0, 0)`.
    Origin,
    /// At either border.
    EitherBorder,
    /// At the first cell holding 0.
    ZeroCell,
}

impl StopRule {
    pub fn reached(self, i: usize, j: usize, value: i32) -> bool {
        match self {
            StopRule::Origin => i == 0 && j == 0,
            StopRule::EitherBorder => i == 0 || j == 0,
            StopRule::ZeroCell => value == 0,
        }
    }
}

/// Source of diagonal-step scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Substitution {
    /// The caller's scoring table.
    Table,
    /// 0 for a match, 1 for a mismatch; no table is consulted.
    Unit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentParams {
    pub mode: AlignmentMode,
    pub indel_penalty: u32,
}

impl Default for AlignmentParams {
    fn default() -> Self {
        Self {
            mode: AlignmentMode::Global,
            indel_penalty: crate::DEFAULT_INDEL_PENALTY,
        }
    }
}
