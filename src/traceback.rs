use std::fmt;

use log::{error, trace};

use crate::alignment_mode::{AlignmentMode, StopRule};
use crate::matrix::{Position, ScoreMatrix};
use crate::scoring::SubstitutionScore;
use crate::AlignerError;

pub const GAP_SYMBOL: u8 = b'-';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracebackOperation {
    Match,
    Mismatch,
    /// Gap in the first sequence, symbol from the second.
    Insertion,
    /// Symbol from the first sequence, gap in the second.
    Deletion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentResult {
    pub mode: AlignmentMode,
    pub score: i32,
    /// Number of candidate end cells holding `score`; 1 for modes that only
    /// consider the corner cell.
    pub optimal_count: usize,
    pub aligned_seq1: Vec<u8>,
    pub aligned_seq2: Vec<u8>,
    pub operations: Vec<TracebackOperation>,
    /// Cell where traceback stopped.
    pub start_position: Position,
    /// Optimal cell traceback started from.
    pub end_position: Position,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignmentStats {
    pub matches: u32,
    pub mismatches: u32,
    pub gaps: u32,
}

impl AlignmentResult {
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn stats(&self) -> AlignmentStats {
        self.operations
            .iter()
            .fold(AlignmentStats::default(), |mut acc, op| {
                match op {
                    TracebackOperation::Match => acc.matches += 1,
                    TracebackOperation::Mismatch => acc.mismatches += 1,
                    TracebackOperation::Insertion | TracebackOperation::Deletion => acc.gaps += 1,
                }
                acc
            })
    }

    /// Fraction of alignment columns that are matches; 0 for an empty alignment.
    pub fn identity(&self) -> f64 {
        if self.operations.is_empty() {
            return 0.0;
        }
        self.stats().matches as f64 / self.operations.len() as f64
    }

    pub fn aligned_seq1_str(&self) -> String {
        String::from_utf8_lossy(&self.aligned_seq1).into_owned()
    }

    pub fn aligned_seq2_str(&self) -> String {
        String::from_utf8_lossy(&self.aligned_seq2).into_owned()
    }
}

impl fmt::Display for AlignmentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.score)?;
        if self.mode.counts_optima() {
            writeln!(f, "{}", self.optimal_count)?;
        }
        writeln!(f, "{}", self.aligned_seq1_str())?;
        write!(f, "{}", self.aligned_seq2_str())
    }
}

/// The aligned rows and path produced by one traceback walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracebackPath {
    pub aligned_seq1: Vec<u8>,
    pub aligned_seq2: Vec<u8>,
    pub operations: Vec<TracebackOperation>,
    pub stop: Position,
}

/// Replays a filled score matrix backwards to recover one optimal alignment.
pub struct Traceback<'a, S> {
    matrix: &'a ScoreMatrix,
    seq1: &'a [u8],
    seq2: &'a [u8],
    scorer: &'a S,
    gap: i32,
}

impl<'a, S: SubstitutionScore> Traceback<'a, S> {
    pub fn new(matrix: &'a ScoreMatrix, seq1: &'a [u8], seq2: &'a [u8], scorer: &'a S, gap: i32) -> Self {
        Self {
            matrix,
            seq1,
            seq2,
            scorer,
            gap,
        }
    }

    /// Walks from `start` until `stop` holds.
    ///
    /// Each step takes the first move that reproduces the current cell, in
    /// the order left, top, diagonal.
    pub fn reconstruct_alignment(&self, start: Position, stop: StopRule) -> Result<TracebackPath, AlignerError> {
        let mut aligned_seq1 = Vec::new();
        let mut aligned_seq2 = Vec::new();
        let mut operations = Vec::new();

        let Position { mut i, mut j } = start;
        loop {
            let current = self.matrix.get(i, j);
            if stop.reached(i, j, current) {
                break;
            }

            if j > 0 && self.matrix.get(i, j - 1).checked_add(self.gap) == Some(current) {
                aligned_seq1.push(GAP_SYMBOL);
                aligned_seq2.push(self.seq2[j - 1]);
                operations.push(TracebackOperation::Insertion);
                j -= 1;
            } else if i > 0 && self.matrix.get(i - 1, j).checked_add(self.gap) == Some(current) {
                aligned_seq1.push(self.seq1[i - 1]);
                aligned_seq2.push(GAP_SYMBOL);
                operations.push(TracebackOperation::Deletion);
                i -= 1;
            } else if i > 0
                && j > 0
                && self
                    .matrix
                    .get(i - 1, j - 1)
                    .checked_add(self.scorer.score(self.seq1[i - 1], self.seq2[j - 1])?)
                    == Some(current)
            {
                let (a, b) = (self.seq1[i - 1], self.seq2[j - 1]);
                aligned_seq1.push(a);
                aligned_seq2.push(b);
                operations.push(if a == b {
                    TracebackOperation::Match
                } else {
                    TracebackOperation::Mismatch
                });
                i -= 1;
                j -= 1;
            } else {
                error!("Traceback found no predecessor for cell ({}, {}) = {}", i, j, current);
                return Err(AlignerError::TracebackInconsistent { i, j });
            }
            trace!("Traceback step to ({}, {})", i, j);
        }

        // Reverse the sequences and operations since we built them backwards
        aligned_seq1.reverse();
        aligned_seq2.reverse();
        operations.reverse();

        Ok(TracebackPath {
            aligned_seq1,
            aligned_seq2,
            operations,
            stop: Position::new(i, j),
        })
    }
}
