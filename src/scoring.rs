use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::AlignerError;

/// Text of the BLOSUM62 substitution matrix, in the square format accepted by
/// [`ScoringTable::parse`].
pub const BLOSUM62_TEXT: &str = include_str!("../matrices/BLOSUM62");

/// Resolves the score of aligning two symbols against each other.
pub trait SubstitutionScore {
    fn score(&self, a: u8, b: u8) -> Result<i32, AlignerError>;
}

/// Symmetric substitution table keyed by symbol pairs.
///
/// A pair may be stored in only one ordering; [`ScoringTable::lookup`] tries
/// `(a, b)` first and then `(b, a)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoringTable {
    scores: HashMap<(u8, u8), i32>,
}

impl ScoringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in BLOSUM62 table over the 20 standard amino acids.
    pub fn blosum62() -> Self {
        static BLOSUM62: OnceLock<ScoringTable> = OnceLock::new();
        BLOSUM62
            // Compiled-in text, checked by test_blosum62_embedded
            .get_or_init(|| Self::parse(BLOSUM62_TEXT).expect("Invalid embedded BLOSUM62 table"))
            .clone()
    }

    /// Table scoring `match_score` for identical symbols and `mismatch_score`
    /// for every other pair drawn from `alphabet`.
    pub fn from_match_mismatch(alphabet: &[u8], match_score: i32, mismatch_score: i32) -> Self {
        let mut table = Self::new();
        for (idx, &a) in alphabet.iter().enumerate() {
            for &b in &alphabet[idx..] {
                let score = if a == b { match_score } else { mismatch_score };
                table.insert(a, b, score);
            }
        }
        table
    }

    pub fn insert(&mut self, a: u8, b: u8, score: i32) {
        self.scores.insert((a, b), score);
    }

    pub fn lookup(&self, a: u8, b: u8) -> Result<i32, AlignerError> {
        self.scores
            .get(&(a, b))
            .or_else(|| self.scores.get(&(b, a)))
            .copied()
            .ok_or(AlignerError::ScoreNotFound {
                a: a as char,
                b: b as char,
            })
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Parses a square matrix: a header line of column symbols followed by
    /// one line per row symbol, each holding the row symbol and one integer
    /// per column. Blank lines and lines starting with `#` are skipped.
    pub fn parse(text: &str) -> Result<Self, AlignerError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

        let (header_line, header) = lines
            .next()
            .ok_or_else(|| AlignerError::ScoringTableParse("missing header line".to_string()))?;
        let columns = header
            .split_whitespace()
            .map(|token| parse_symbol(token, header_line))
            .collect::<Result<Vec<_>, _>>()?;

        let mut table = Self::new();
        for (line_no, line) in lines {
            let mut fields = line.split_whitespace();
            let row = match fields.next() {
                Some(token) => parse_symbol(token, line_no)?,
                None => continue,
            };
            let values = fields
                .map(|token| {
                    token.parse::<i32>().map_err(|_| {
                        AlignerError::ScoringTableParse(format!(
                            "line {}: invalid score {:?}",
                            line_no, token
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if values.len() != columns.len() {
                return Err(AlignerError::ScoringTableParse(format!(
                    "line {}: expected {} scores, found {}",
                    line_no,
                    columns.len(),
                    values.len()
                )));
            }
            for (&col, score) in columns.iter().zip(values) {
                table.insert(row, col, score);
            }
        }

        if table.is_empty() {
            return Err(AlignerError::ScoringTableParse("no score rows".to_string()));
        }
        Ok(table)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, AlignerError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }
}

fn parse_symbol(token: &str, line_no: usize) -> Result<u8, AlignerError> {
    match token.as_bytes() {
        [symbol] => Ok(*symbol),
        _ => Err(AlignerError::ScoringTableParse(format!(
            "line {}: expected a single-byte symbol, found {:?}",
            line_no, token
        ))),
    }
}

impl SubstitutionScore for ScoringTable {
    fn score(&self, a: u8, b: u8) -> Result<i32, AlignerError> {
        self.lookup(a, b)
    }
}

/// Unit substitution cost used by edit distance: 0 for a match, 1 otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitCost;

impl SubstitutionScore for UnitCost {
    fn score(&self, a: u8, b: u8) -> Result<i32, AlignerError> {
        Ok(if a == b { 0 } else { 1 })
    }
}
