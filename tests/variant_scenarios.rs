use dp_aligner::{
    align, edit_distance, score_only, AlignerError, AlignmentMode, Position, ScoringTable, TracebackOperation,
};

const PROTEIN: &[u8] = b"ACDEFGHIKLMNPQRSTVWXY";
const DNA: &[u8] = b"ACGTU";

fn unit_protein() -> ScoringTable {
    ScoringTable::from_match_mismatch(PROTEIN, 1, -1)
}

#[test]
fn test_global_blosum62() {
    let table = ScoringTable::blosum62();
    let result = align(AlignmentMode::Global, b"PLEASANTLY", b"MEANLY", &table, 5).unwrap();

    assert_eq!(result.score, 8);
    assert_eq!(result.optimal_count, 1);
    assert_eq!(result.aligned_seq1, b"PLEASANTLY");
    assert_eq!(result.aligned_seq2, b"-MEA--N-LY");
    assert_eq!(result.start_position, Position::new(0, 0));
    assert_eq!(result.end_position, Position::new(10, 6));
    assert_eq!(result.to_string(), "8\nPLEASANTLY\n-MEA--N-LY");
}

#[test]
fn test_global_unit_scores() {
    let result = align(AlignmentMode::Global, b"MEANLY", b"PENALTY", &unit_protein(), 1).unwrap();

    assert_eq!(result.score, 0);
    assert_eq!(result.aligned_seq1, b"MEAN-L-Y");
    assert_eq!(result.aligned_seq2, b"PE-NALTY");
}

#[test]
fn test_local_meanly_penalty() {
    let result = align(AlignmentMode::Local, b"MEANLY", b"PENALTY", &unit_protein(), 1).unwrap();

    // No two-letter substring is shared, so the best local hit is one match
    assert_eq!(result.score, 1);
    assert_eq!(result.optimal_count, 5);
    assert_eq!(result.aligned_seq1, b"E");
    assert_eq!(result.aligned_seq2, b"E");
    assert_eq!(result.start_position, Position::new(1, 1));
    assert_eq!(result.end_position, Position::new(2, 2));
    assert_eq!(result.to_string(), "1\n5\nE\nE");
}

#[test]
fn test_local_interior_alignment() {
    let table = ScoringTable::from_match_mismatch(DNA, 2, -1);
    let result = align(AlignmentMode::Local, b"ACACACTA", b"AGCACACA", &table, 1).unwrap();

    assert_eq!(result.score, 12);
    assert_eq!(result.optimal_count, 1);
    assert_eq!(result.aligned_seq1, b"A-CACACTA");
    assert_eq!(result.aligned_seq2, b"AGCACAC-A");
}

#[test]
fn test_local_without_positive_cells_is_empty() {
    let table = ScoringTable::from_match_mismatch(DNA, 1, -1);
    let result = align(AlignmentMode::Local, b"AAA", b"TTT", &table, 1).unwrap();

    assert_eq!(result.score, 0);
    assert_eq!(result.optimal_count, 9);
    assert!(result.is_empty());
    assert_eq!(result.end_position, Position::new(1, 1));
}

#[test]
fn test_fitting_alignment() {
    let table = ScoringTable::from_match_mismatch(DNA, 1, -1);
    let result = align(AlignmentMode::Fitting, b"GTAGGCTTAAGGTTA", b"TAGATA", &table, 1).unwrap();

    assert_eq!(result.score, 2);
    assert_eq!(result.optimal_count, 2);
    assert_eq!(result.aligned_seq1, b"TAGGCTTA");
    assert_eq!(result.aligned_seq2, b"TAGA-T-A");
    assert_eq!(result.start_position, Position::new(1, 0));
    assert_eq!(result.end_position, Position::new(9, 6));
}

#[test]
fn test_fitting_consumes_all_of_second_sequence() {
    let table = ScoringTable::from_match_mismatch(b"AX", 1, -5);
    let result = align(AlignmentMode::Fitting, b"AAAA", b"XX", &table, 1).unwrap();

    assert_eq!(result.score, -2);
    assert_eq!(result.optimal_count, 4);
    assert_eq!(result.aligned_seq1, b"--");
    assert_eq!(result.aligned_seq2, b"XX");
    assert_eq!(result.operations, vec![TracebackOperation::Insertion; 2]);
}

#[test]
fn test_fitting_traceback_stops_on_top_row() {
    let table = ScoringTable::from_match_mismatch(DNA, 1, -1);
    let result = align(AlignmentMode::Fitting, b"GAAAG", b"CG", &table, 0).unwrap();

    // The free skip of C along row 0 is not reported as a gap column
    assert_eq!(result.score, 1);
    assert_eq!(result.optimal_count, 5);
    assert_eq!(result.aligned_seq1, b"G");
    assert_eq!(result.aligned_seq2, b"G");
    assert_eq!(result.start_position, Position::new(0, 1));
    assert_eq!(result.end_position, Position::new(1, 2));
}

#[test]
fn test_fitting_rejects_longer_second_sequence() {
    let result = align(AlignmentMode::Fitting, b"TAGATA", b"GTAGGCTTAAGGTTA", &unit_protein(), 1);

    assert!(matches!(
        result,
        Err(AlignerError::InvalidInputLength { s1_len: 6, s2_len: 15 })
    ));
    assert!(matches!(
        score_only(AlignmentMode::Fitting, b"A", b"AA", &unit_protein(), 1),
        Err(AlignerError::InvalidInputLength { .. })
    ));
}

#[test]
fn test_overlap_alignment() {
    let table = ScoringTable::from_match_mismatch(PROTEIN, 1, -2);
    let result = align(AlignmentMode::Overlap, b"PAWHEAE", b"HEAGAWGHEE", &table, 2).unwrap();

    assert_eq!(result.score, 1);
    assert_eq!(result.optimal_count, 2);
    assert_eq!(result.aligned_seq1, b"HEAE");
    assert_eq!(result.aligned_seq2, b"HEA-");
    assert_eq!(result.start_position, Position::new(3, 0));
    assert_eq!(result.end_position, Position::new(7, 3));
}

#[test]
fn test_edit_distance() {
    let forward = align(AlignmentMode::EditDistance, b"EDITING", b"DISTANCE", &ScoringTable::new(), 0).unwrap();
    let backward = align(AlignmentMode::EditDistance, b"DISTANCE", b"EDITING", &ScoringTable::new(), 0).unwrap();

    assert_eq!(forward.score, 5);
    assert_eq!(backward.score, 5);
    assert_eq!(forward.aligned_seq1, b"EDI-TING-");
    assert_eq!(forward.aligned_seq2, b"-DISTANCE");
    assert_eq!(backward.aligned_seq1, b"-DISTANCE");
    assert_eq!(backward.aligned_seq2, b"EDI-TING-");
    assert_eq!(edit_distance(b"PLEASANTLY", b"MEANLY").unwrap(), 5);
    assert_eq!(forward.to_string(), "5\nEDI-TING-\n-DISTANCE");
}

#[test]
fn test_missing_pair_fails_whole_call() {
    let table = ScoringTable::from_match_mismatch(b"ACGT", 1, -1);

    for mode in [
        AlignmentMode::Global,
        AlignmentMode::Local,
        AlignmentMode::Fitting,
        AlignmentMode::Overlap,
    ] {
        let result = align(mode, b"ACGN", b"ACG", &table, 1);
        assert!(
            matches!(result, Err(AlignerError::ScoreNotFound { a: 'N', .. })),
            "{} mode",
            mode
        );
    }
    // Unit costs never consult the table
    assert!(align(AlignmentMode::EditDistance, b"ACGN", b"ACG", &table, 1).is_ok());
}

#[test]
fn test_large_penalty_reports_overflow() {
    let table = ScoringTable::from_match_mismatch(DNA, 1, -1);

    assert!(matches!(
        align(AlignmentMode::Global, b"ACG", b"", &table, 1_000_000_000),
        Err(AlignerError::ScoreOverflow { i: 3, j: 0 })
    ));
    assert!(matches!(
        score_only(AlignmentMode::Global, b"A", b"A", &table, i32::MAX as u32),
        Err(AlignerError::ScoreOverflow { i: 1, j: 1 })
    ));

    // Zero borders and the floor keep local scores in range
    let local = align(AlignmentMode::Local, b"ACGT", b"ACGT", &table, i32::MAX as u32).unwrap();
    assert_eq!(local.score, 4);
    assert_eq!(local.aligned_seq1, b"ACGT");
}

#[test]
fn test_non_ascii_sequence_rejected() {
    let table = ScoringTable::from_match_mismatch(DNA, 1, -1);
    let result = align(AlignmentMode::Local, b"ACGT", "ACGµ".as_bytes(), &table, 1);

    assert!(matches!(
        result,
        Err(AlignerError::NonAsciiSymbol { sequence: 2, position: 3, .. })
    ));
}

#[test]
fn test_empty_sequences() {
    let table = ScoringTable::from_match_mismatch(DNA, 1, -1);

    let global = align(AlignmentMode::Global, b"", b"ACG", &table, 2).unwrap();
    assert_eq!(global.score, -6);
    assert_eq!(global.aligned_seq1, b"---");
    assert_eq!(global.aligned_seq2, b"ACG");

    let global = align(AlignmentMode::Global, b"ACG", b"", &table, 2).unwrap();
    assert_eq!(global.score, -6);
    assert_eq!(global.aligned_seq1, b"ACG");
    assert_eq!(global.aligned_seq2, b"---");

    let local = align(AlignmentMode::Local, b"", b"ACG", &table, 2).unwrap();
    assert_eq!((local.score, local.optimal_count), (0, 1));
    assert!(local.is_empty());

    let fitting = align(AlignmentMode::Fitting, b"", b"", &table, 2).unwrap();
    assert_eq!((fitting.score, fitting.optimal_count), (0, 1));
    assert!(fitting.is_empty());

    let fitting = align(AlignmentMode::Fitting, b"ACGT", b"", &table, 2).unwrap();
    assert_eq!((fitting.score, fitting.optimal_count), (0, 4));
    assert!(fitting.is_empty());

    let overlap = align(AlignmentMode::Overlap, b"", b"ACG", &table, 2).unwrap();
    assert_eq!((overlap.score, overlap.optimal_count), (0, 3));
    assert!(overlap.is_empty());

    let edit = align(AlignmentMode::EditDistance, b"", b"ACG", &table, 2).unwrap();
    assert_eq!(edit.score, 3);
    assert_eq!(edit.aligned_seq1, b"---");
    assert_eq!(edit_distance(b"", b"").unwrap(), 0);
}

#[test]
fn test_score_only_agrees_on_scenarios() {
    let table = ScoringTable::from_match_mismatch(PROTEIN, 1, -2);
    let cases: [(&[u8], &[u8]); 4] = [
        (b"PAWHEAE", b"HEAGAWGHEE"),
        (b"MEANLY", b"PENALTY"),
        (b"GTAGGCTTAAGGTTA", b"TAGATA"),
        (b"", b""),
    ];

    for mode in AlignmentMode::ALL {
        for (s1, s2) in cases {
            if mode == AlignmentMode::Fitting && s2.len() > s1.len() {
                continue;
            }
            let full = align(mode, s1, s2, &table, 2).unwrap();
            let summary = score_only(mode, s1, s2, &table, 2).unwrap();
            assert_eq!(summary.score, full.score, "{} mode", mode);
            assert_eq!(summary.optimal_count, full.optimal_count, "{} mode", mode);
        }
    }
}
