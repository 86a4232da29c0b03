//! Pairwise sequence alignment on one dynamic-programming engine.
//!
//! Five modes share a single recurrence and differ only in their
//! [`ModePolicy`]: how the borders are initialised, whether cells maximise or
//! minimise, which cells may end an optimal alignment, and where traceback
//! stops.
//!
//! Every call costs O(n·m) time and O(n·m) space for sequences of length n
//! and m. [`score_only`] keeps the time bound but needs only O(m) space, at
//! the price of losing the traceback.
//!
//! ```
//! use dp_aligner::{align, AlignmentMode, ScoringTable};
//!
//! let table = ScoringTable::blosum62();
//! let result = align(AlignmentMode::Global, b"PLEASANTLY", b"MEANLY", &table, 5).unwrap();
//! assert_eq!(result.score, 8);
//! assert_eq!(result.aligned_seq1, b"PLEASANTLY");
//! assert_eq!(result.aligned_seq2, b"-MEA--N-LY");
//! ```

use log::debug;
use thiserror::Error;

pub mod alignment_mode;
pub mod batch;
pub mod config;
pub mod linear_space;
pub mod matrix;
pub mod scoring;
pub mod termination;
pub mod traceback;

pub use crate::alignment_mode::{
    AlignmentMode, AlignmentParams, BorderInit, Candidates, Extremum, ModePolicy, StopRule, Substitution,
};
pub use crate::batch::BatchAligner;
pub use crate::config::{AlignerParameters, ScoringSource};
pub use crate::linear_space::ScoreSummary;
pub use crate::matrix::{Position, ScoreMatrix};
pub use crate::scoring::{ScoringTable, SubstitutionScore, UnitCost};
pub use crate::termination::Termination;
pub use crate::traceback::{AlignmentResult, AlignmentStats, TracebackOperation};

pub const DEFAULT_INDEL_PENALTY: u32 = 5;
pub const MAX_WORKERS: usize = 256;

#[derive(Debug, Error)]
pub enum AlignerError {
    #[error("Invalid input length: s2 ({s2_len}) must not be longer than s1 ({s1_len})")]
    InvalidInputLength { s1_len: usize, s2_len: usize },
    #[error("No score for symbol pair ({a:?}, {b:?}) in either order")]
    ScoreNotFound { a: char, b: char },
    #[error("Traceback inconsistent at cell ({i}, {j})")]
    TracebackInconsistent { i: usize, j: usize },
    #[error("Non-ASCII byte 0x{byte:02x} at position {position} of sequence {sequence}")]
    NonAsciiSymbol { sequence: u8, position: usize, byte: u8 },
    #[error("Indel penalty out of range: {0}")]
    InvalidPenalty(u32),
    #[error("Score overflow at cell ({i}, {j})")]
    ScoreOverflow { i: usize, j: usize },
    #[error("Scoring table parse error: {0}")]
    ScoringTableParse(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Batch error: {0}")]
    BatchError(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequence {
    data: Vec<u8>,
}

impl Sequence {
    pub fn new(data: &[u8]) -> Self {
        Self { data: data.to_vec() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<&str> for Sequence {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl From<&[u8]> for Sequence {
    fn from(data: &[u8]) -> Self {
        Self::new(data)
    }
}

impl AsRef<[u8]> for Sequence {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// Aligns `s1` against `s2` in `mode`.
///
/// `scoring` and `indel_penalty` are ignored by [`AlignmentMode::EditDistance`],
/// which always uses unit costs.
pub fn align(
    mode: AlignmentMode,
    s1: &[u8],
    s2: &[u8],
    scoring: &ScoringTable,
    indel_penalty: u32,
) -> Result<AlignmentResult, AlignerError> {
    let mut workspace = ScoreMatrix::default();
    align_into(&mut workspace, mode, s1, s2, scoring, indel_penalty)
}

/// Optimal score and optimal-cell count without traceback, in O(m) space.
pub fn score_only(
    mode: AlignmentMode,
    s1: &[u8],
    s2: &[u8],
    scoring: &ScoringTable,
    indel_penalty: u32,
) -> Result<ScoreSummary, AlignerError> {
    check_inputs(mode, s1, s2)?;
    let policy = mode.policy();
    let gap = mode.gap_step(indel_penalty)?;
    match policy.substitution {
        Substitution::Table => linear_space::score_only(s1, s2, scoring, gap, &policy),
        Substitution::Unit => linear_space::score_only(s1, s2, &UnitCost, gap, &policy),
    }
}

/// Levenshtein distance between `s1` and `s2`.
pub fn edit_distance(s1: &[u8], s2: &[u8]) -> Result<usize, AlignerError> {
    let mode = AlignmentMode::EditDistance;
    check_inputs(mode, s1, s2)?;
    let summary = linear_space::score_only(s1, s2, &UnitCost, mode.gap_step(0)?, &mode.policy())?;
    // Unit costs never go below zero
    Ok(summary.score.max(0) as usize)
}

/// Symbols are single ASCII bytes; Fitting also needs `s2` no longer than `s1`.
fn check_inputs(mode: AlignmentMode, s1: &[u8], s2: &[u8]) -> Result<(), AlignerError> {
    for (sequence, symbols) in [(1, s1), (2, s2)] {
        if let Some(position) = symbols.iter().position(|b| !b.is_ascii()) {
            return Err(AlignerError::NonAsciiSymbol {
                sequence,
                position,
                byte: symbols[position],
            });
        }
    }
    if mode == AlignmentMode::Fitting && s2.len() > s1.len() {
        return Err(AlignerError::InvalidInputLength {
            s1_len: s1.len(),
            s2_len: s2.len(),
        });
    }
    Ok(())
}

fn align_into(
    workspace: &mut ScoreMatrix,
    mode: AlignmentMode,
    s1: &[u8],
    s2: &[u8],
    scoring: &ScoringTable,
    indel_penalty: u32,
) -> Result<AlignmentResult, AlignerError> {
    check_inputs(mode, s1, s2)?;
    let gap = mode.gap_step(indel_penalty)?;
    debug!("Aligning {} x {} symbols in {} mode", s1.len(), s2.len(), mode);
    match mode.policy().substitution {
        Substitution::Table => run_engine(workspace, mode, s1, s2, scoring, gap),
        Substitution::Unit => run_engine(workspace, mode, s1, s2, &UnitCost, gap),
    }
}

fn run_engine<S: SubstitutionScore>(
    workspace: &mut ScoreMatrix,
    mode: AlignmentMode,
    s1: &[u8],
    s2: &[u8],
    scorer: &S,
    gap: i32,
) -> Result<AlignmentResult, AlignerError> {
    let policy = mode.policy();
    matrix::fill(workspace, s1, s2, scorer, gap, &policy)?;
    let termination = termination::select(workspace, policy.candidates, policy.extremum);
    let path = traceback::Traceback::new(workspace, s1, s2, scorer, gap)
        .reconstruct_alignment(termination.start, policy.stop)?;

    Ok(AlignmentResult {
        mode,
        score: termination.score,
        optimal_count: termination.optimal_count,
        aligned_seq1: path.aligned_seq1,
        aligned_seq2: path.aligned_seq2,
        operations: path.operations,
        start_position: path.stop,
        end_position: termination.start,
    })
}

/// Aligner bound to one set of parameters and scoring table.
///
/// The score matrix is kept between calls so repeated alignments reuse its
/// allocation; every result is independent of the buffer.
#[derive(Debug, Clone)]
pub struct Aligner {
    params: AlignmentParams,
    scoring: ScoringTable,
    workspace: ScoreMatrix,
}

impl Aligner {
    pub fn new(params: AlignmentParams, scoring: ScoringTable) -> Result<Self, AlignerError> {
        if i32::try_from(params.indel_penalty).is_err() {
            return Err(AlignerError::InvalidPenalty(params.indel_penalty));
        }
        Ok(Self {
            params,
            scoring,
            workspace: ScoreMatrix::default(),
        })
    }

    pub fn from_parameters(parameters: &AlignerParameters) -> Result<Self, AlignerError> {
        Self::new(parameters.alignment_params(), parameters.scoring().load()?)
    }

    pub fn params(&self) -> AlignmentParams {
        self.params
    }

    pub fn scoring(&self) -> &ScoringTable {
        &self.scoring
    }

    pub fn align(&mut self, seq1: &Sequence, seq2: &Sequence) -> Result<AlignmentResult, AlignerError> {
        align_into(
            &mut self.workspace,
            self.params.mode,
            seq1.as_bytes(),
            seq2.as_bytes(),
            &self.scoring,
            self.params.indel_penalty,
        )
    }

    pub fn score_only(&self, seq1: &Sequence, seq2: &Sequence) -> Result<ScoreSummary, AlignerError> {
        score_only(
            self.params.mode,
            seq1.as_bytes(),
            seq2.as_bytes(),
            &self.scoring,
            self.params.indel_penalty,
        )
    }
}
