use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use log::{error, info};

use dp_aligner::{Aligner, AlignerError, AlignerParameters, AlignmentMode, BatchAligner, ScoringSource, Sequence};

#[derive(Parser)]
#[command(name = "dp-aligner")]
#[command(about = "Pairwise sequence alignment: global, local, fitting, overlap and edit distance", long_about = None)]
#[command(version)]
struct Cli {
    /// Alignment mode
    #[arg(value_enum)]
    mode: Mode,

    /// First sequence (rows of the score matrix)
    #[arg(value_name = "S1", requires = "s2", conflicts_with = "input")]
    s1: Option<String>,

    /// Second sequence (columns of the score matrix)
    #[arg(value_name = "S2")]
    s2: Option<String>,

    /// Read pairs from FILE: non-empty lines taken two at a time as S1 and S2
    #[arg(short = 'i', long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Worker threads used to align the pairs of --input
    #[arg(short = 'w', long, value_name = "N", default_value_t = 1)]
    workers: usize,

    /// Penalty charged for every gap column
    #[arg(short = 'g', long = "indel", value_name = "INT", default_value_t = dp_aligner::DEFAULT_INDEL_PENALTY)]
    indel_penalty: u32,

    /// Square scoring matrix file (defaults to BLOSUM62)
    #[arg(short = 'm', long, value_name = "FILE", conflicts_with = "match_score")]
    matrix: Option<PathBuf>,

    /// Score for identical symbols; scores every other pair with --mismatch
    #[arg(long = "match", value_name = "INT", requires = "mismatch_score", allow_hyphen_values = true)]
    match_score: Option<i32>,

    /// Score for differing symbols, used with --match
    #[arg(long = "mismatch", value_name = "INT", requires = "match_score", allow_hyphen_values = true)]
    mismatch_score: Option<i32>,

    /// Report only the score (and optimal count) using two rows of memory
    #[arg(short = 's', long)]
    score_only: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Global,
    Local,
    Fitting,
    Overlap,
    EditDistance,
}

impl From<Mode> for AlignmentMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Global => AlignmentMode::Global,
            Mode::Local => AlignmentMode::Local,
            Mode::Fitting => AlignmentMode::Fitting,
            Mode::Overlap => AlignmentMode::Overlap,
            Mode::EditDistance => AlignmentMode::EditDistance,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AlignerError> {
    let pairs = read_pairs(&cli)?;

    let scoring = match (&cli.matrix, cli.match_score, cli.mismatch_score) {
        (Some(path), _, _) => ScoringSource::File(path.clone()),
        (None, Some(match_score), Some(mismatch_score)) => ScoringSource::MatchMismatch {
            match_score,
            mismatch_score,
        },
        _ => ScoringSource::Blosum62,
    };
    let params = AlignerParameters::new()
        .with_mode(cli.mode.into())
        .with_indel_penalty(cli.indel_penalty)?
        .with_scoring(scoring)
        .with_score_only(cli.score_only)
        .with_workers(cli.workers)?;
    info!("Aligning {} pair(s) in {} mode", pairs.len(), params.mode());

    let reports = if params.score_only() {
        let aligner = Aligner::from_parameters(&params)?;
        pairs
            .iter()
            .map(|(s1, s2)| {
                let summary = aligner.score_only(s1, s2)?;
                Ok(if params.mode().counts_optima() {
                    format!("{}\n{}", summary.score, summary.optimal_count)
                } else {
                    summary.score.to_string()
                })
            })
            .collect::<Result<Vec<_>, AlignerError>>()?
    } else if pairs.len() == 1 {
        let mut aligner = Aligner::from_parameters(&params)?;
        let (s1, s2) = &pairs[0];
        vec![aligner.align(s1, s2)?.to_string()]
    } else {
        let batch = BatchAligner::new(&params)?;
        batch
            .align_parallel(pairs)?
            .iter()
            .map(ToString::to_string)
            .collect()
    };

    println!("{}", reports.join("\n\n"));
    Ok(())
}

fn read_pairs(cli: &Cli) -> Result<Vec<(Sequence, Sequence)>, AlignerError> {
    if let Some(path) = &cli.input {
        let text = fs::read_to_string(path)?;
        return parse_pairs(&text).ok_or_else(|| {
            AlignerError::InvalidConfig(format!(
                "{} must hold a non-empty, even number of sequence lines",
                path.display()
            ))
        });
    }

    match (&cli.s1, &cli.s2) {
        (Some(s1), Some(s2)) => Ok(vec![(Sequence::from(s1.as_str()), Sequence::from(s2.as_str()))]),
        _ => Err(AlignerError::InvalidConfig(
            "Provide S1 and S2 or --input FILE".to_string(),
        )),
    }
}

/// Pairs up the non-empty lines of `text`; `None` if there are none or one is left over.
fn parse_pairs(text: &str) -> Option<Vec<(Sequence, Sequence)>> {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|line| !line.is_empty()).collect();
    if lines.is_empty() || lines.len() % 2 != 0 {
        return None;
    }
    Some(
        lines
            .chunks_exact(2)
            .map(|pair| (Sequence::from(pair[0]), Sequence::from(pair[1])))
            .collect(),
    )
}
