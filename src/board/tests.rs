use super::*;

#[test]
fn startpos_has_twenty_legal_moves() {
    let board = Board::startpos();
    assert_eq!(board.legal_moves().len(), 20);
}

#[test]
fn fen_round_trips_through_startpos() {
    let board = Board::startpos();
    assert_eq!(board.to_fen(), fen::STARTPOS_FEN);
}

#[test]
fn fen_round_trips_an_arbitrary_midgame_position() {
    let text = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq -";
    let board = Board::from_fen(text).expect("valid FEN");
    assert_eq!(board.to_fen(), text);
}

#[test]
fn fen_rejects_truncated_input() {
    assert!(Board::from_fen("8/8/8/8/8/8/8/8 w").is_err());
}

#[test]
fn make_unmake_is_a_strict_inverse() {
    let mut board = Board::startpos();
    let key_before = board.pos_key();
    let fen_before = board.to_fen();
    for m in board.clone().legal_moves() {
        assert!(board.make_move(m));
        board.unmake_move();
        assert_eq!(board.pos_key(), key_before);
        assert_eq!(board.to_fen(), fen_before);
    }
}

#[test]
fn pos_key_matches_full_recomputation_after_a_move() {
    let mut board = Board::startpos();
    let e2e4 = board.parse_move("e2e4").expect("legal opening move");
    assert!(board.make_move(e2e4));
    assert_eq!(board.pos_key(), board.generate_pos_key());
}

#[test]
fn en_passant_capture_is_generated_and_legal() {
    let mut board = Board::from_fen("rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3")
        .expect("valid FEN with an en passant target");
    let capture = board.parse_move("d4e3").expect("en passant capture is legal");
    assert!(capture.is_en_passant());
    assert!(board.make_move(capture));
    assert_eq!(board.piece_at(Square::parse("e4").unwrap()), Piece::Empty);
}

#[test]
fn white_kingside_castle_is_available_with_a_clear_path() {
    let board = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/5NP1/PPPPPPBP/RNBQK2R w KQkq -")
        .expect("valid FEN");
    let castle = board.parse_move("e1g1").expect("castling is legal");
    assert!(castle.is_castle());
}

#[test]
fn castling_through_check_is_illegal() {
    // Black rook on f8 has a clear file down to f1: white may not castle
    // kingside through the attacked square.
    let board = Board::from_fen("k4r2/8/8/8/8/8/8/4K2R w K -").expect("valid FEN");
    assert!(board.legal_moves().into_iter().all(|m| !m.is_castle()));
}

#[test]
fn promotion_generates_all_four_piece_kinds() {
    let board = Board::from_fen("8/P6k/8/8/8/8/7K/8 w - -").expect("valid FEN");
    let promos: Vec<_> = board
        .legal_moves()
        .into_iter()
        .filter(|m| m.promoted() != Piece::Empty)
        .collect();
    assert_eq!(promos.len(), 4);
}

#[test]
fn fools_mate_is_checkmate_for_the_side_to_move() {
    let mut board = Board::startpos();
    for text in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        let m = board.parse_move(text).expect("scripted fool's mate move is legal");
        assert!(board.make_move(m));
    }
    assert!(board.legal_moves().is_empty());
    assert_eq!(board.result(Side::White), GameResult::Loss);
    assert_eq!(board.result(Side::Black), GameResult::Win);
}

#[test]
fn stalemate_has_no_legal_moves_but_is_a_draw() {
    // Classic king-in-the-corner stalemate: the queen covers a7/b7/b8 and
    // a8 itself is not attacked, so black to move has nothing to play.
    let board = Board::from_fen("k7/8/1QK5/8/8/8/8/8 b - -").expect("valid FEN");
    assert!(board.legal_moves().is_empty());
    assert!(!board.is_attacked(board.king_square(Side::Black), Side::White));
    assert_eq!(board.result(Side::Black), GameResult::Draw);
}

#[test]
fn two_bare_kings_is_an_insufficient_material_draw() {
    let board = Board::from_fen("7k/8/8/8/8/8/8/K7 w - -").expect("valid FEN");
    assert!(board.is_material_draw());
}

#[test]
fn a_rook_on_the_board_is_sufficient_material() {
    let board = Board::from_fen("7k/8/8/8/8/8/8/K6R w - -").expect("valid FEN");
    assert!(!board.is_material_draw());
}

#[test]
fn a_lone_bishop_per_side_is_an_insufficient_material_draw() {
    let board = Board::from_fen("6bk/8/8/8/8/8/8/K6B w - -").expect("valid FEN");
    assert!(board.is_material_draw());
}

#[test]
fn a_lone_knight_against_a_lone_bishop_is_an_insufficient_material_draw() {
    let board = Board::from_fen("6nk/8/8/8/8/8/8/K6B w - -").expect("valid FEN");
    assert!(board.is_material_draw());
}

#[test]
fn bishop_and_knight_on_the_same_side_is_sufficient_material() {
    let board = Board::from_fen("7k/8/8/8/8/8/8/K5BN w - -").expect("valid FEN");
    assert!(!board.is_material_draw());
}

#[test]
fn repeating_the_position_three_times_is_a_draw() {
    let mut board = Board::startpos();
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
    // Each lap back to the start position repeats it once more; three laps
    // brings the starting key's occurrence count to 3.
    for _ in 0..2 {
        for text in shuffle {
            let m = board.parse_move(text).expect("knight shuffle move is legal");
            assert!(board.make_move(m));
        }
    }
    assert_eq!(board.threefold_count(), 3);
    assert_eq!(board.result(Side::White), GameResult::Draw);
}
