use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::alignment_mode::{AlignmentMode, AlignmentParams};
use crate::scoring::ScoringTable;
use crate::{AlignerError, DEFAULT_INDEL_PENALTY, MAX_WORKERS};

/// Amino-acid alphabet used for match/mismatch tables.
pub const AMINO_ACIDS: &[u8] = b"ACDEFGHIKLMNPQRSTVWY";
pub const NUCLEOTIDES: &[u8] = b"ACGTUN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoringSource {
    Blosum62,
    MatchMismatch { match_score: i32, mismatch_score: i32 },
    File(PathBuf),
}

impl ScoringSource {
    pub fn load(&self) -> Result<ScoringTable, AlignerError> {
        match self {
            ScoringSource::Blosum62 => Ok(ScoringTable::blosum62()),
            ScoringSource::MatchMismatch {
                match_score,
                mismatch_score,
            } => {
                let alphabet: BTreeSet<u8> = AMINO_ACIDS.iter().chain(NUCLEOTIDES).copied().collect();
                let alphabet: Vec<u8> = alphabet.into_iter().collect();
                Ok(ScoringTable::from_match_mismatch(&alphabet, *match_score, *mismatch_score))
            }
            ScoringSource::File(path) => ScoringTable::from_path(path),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AlignerParameters {
    mode: AlignmentMode,
    indel_penalty: u32,
    scoring: ScoringSource,
    score_only: bool,
    workers: usize,
}

impl Default for AlignerParameters {
    fn default() -> Self {
        Self {
            mode: AlignmentMode::Global,
            indel_penalty: DEFAULT_INDEL_PENALTY,
            scoring: ScoringSource::Blosum62,
            score_only: false,
            workers: 1,
        }
    }
}

impl AlignerParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: AlignmentMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_indel_penalty(mut self, indel_penalty: u32) -> Result<Self, AlignerError> {
        if i32::try_from(indel_penalty).is_err() {
            return Err(AlignerError::InvalidPenalty(indel_penalty));
        }
        self.indel_penalty = indel_penalty;
        Ok(self)
    }

    pub fn with_scoring(mut self, scoring: ScoringSource) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_score_only(mut self, score_only: bool) -> Self {
        self.score_only = score_only;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Result<Self, AlignerError> {
        if workers == 0 || workers > MAX_WORKERS {
            return Err(AlignerError::InvalidConfig(format!(
                "Worker count must be between 1 and {}",
                MAX_WORKERS
            )));
        }
        self.workers = workers;
        Ok(self)
    }

    pub fn mode(&self) -> AlignmentMode {
        self.mode
    }

    pub fn indel_penalty(&self) -> u32 {
        self.indel_penalty
    }

    pub fn scoring(&self) -> &ScoringSource {
        &self.scoring
    }

    pub fn score_only(&self) -> bool {
        self.score_only
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn alignment_params(&self) -> AlignmentParams {
        AlignmentParams {
            mode: self.mode,
            indel_penalty: self.indel_penalty,
        }
    }
}
