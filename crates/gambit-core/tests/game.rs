use gambit_core::{Color, Game, Position, Square, UndoError, checks_and_pins, generate_legal_moves};

fn play(game: &mut Game, moves: &[&str]) {
    for uci in moves {
        game.valid_moves();
        game.play_uci(uci).unwrap_or_else(|e| panic!("{uci}: {e}"));
    }
}

#[test]
fn fools_mate_is_checkmate() {
    let mut game = Game::new();
    play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    let moves = game.valid_moves();
    assert!(moves.is_empty());
    assert!(game.in_check());
    assert!(game.checkmate());
    assert!(!game.stalemate());
    assert_eq!(game.position().side_to_move(), Color::White);
}

#[test]
fn undo_refused_after_mate_until_flags_cleared() {
    let mut game = Game::new();
    play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    game.valid_moves();
    let fen = game.fen();

    assert_eq!(game.undo_move(), Err(UndoError::GameAlreadyOver));
    assert_eq!(game.fen(), fen, "refused undo must not change the position");

    game.clear_terminal_flags();
    let undone = game.undo_move().unwrap();
    assert_eq!(undone.to_uci(), "d8h4");
    assert_eq!(
        game.fen(),
        "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq g3 0 2"
    );
    assert!(game.valid_moves().contains(undone));
}

#[test]
fn king_and_queen_stalemate() {
    let mut game = Game::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(game.valid_moves().is_empty());
    assert!(game.stalemate());
    assert!(!game.checkmate());
    assert!(!game.in_check());
}

#[test]
fn threefold_repetition_flags_stalemate() {
    let mut game = Game::new();
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
    for (ply, uci) in shuffle.iter().chain(shuffle.iter()).enumerate() {
        game.valid_moves();
        assert!(!game.stalemate(), "drawn too early before ply {}", ply + 1);
        game.play_uci(uci).unwrap();
    }
    assert!(!game.valid_moves().is_empty());
    assert!(game.stalemate());
    assert!(game.position().is_threefold_repetition());
    assert_eq!(game.position().repetition_count(), 3);
}

#[test]
fn fifty_move_clock_flags_stalemate() {
    let mut game = Game::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 99 80").unwrap();
    assert!(!game.stalemate());
    game.valid_moves();
    assert!(!game.stalemate());
    game.play_uci("a1a2").unwrap();
    game.valid_moves();
    assert!(game.stalemate());
}

#[test]
fn mate_on_fiftieth_move_is_checkmate_not_draw() {
    let mut game = Game::from_fen("7k/8/6K1/8/8/8/8/R7 w - - 99 80").unwrap();
    game.play_uci("a1a8").unwrap();
    assert_eq!(game.position().halfmove_clock(), 100);
    assert!(game.valid_moves().is_empty());
    assert!(game.checkmate());
    assert!(!game.stalemate());
}

#[test]
fn undo_restores_every_category() {
    let cases = [
        ("rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 3", "d4e3"),
        ("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 7 20", "e1g1"),
        ("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 7 20", "e1c1"),
        ("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 7 20", "a1a8"),
        ("4k3/1P6/8/8/8/8/8/4K3 w - - 0 40", "b7b8q"),
        ("4k3/8/8/8/8/8/8/4K2R w K - 12 40", "h1h5"),
    ];
    for (fen, uci) in cases {
        let mut game = Game::from_fen(fen).unwrap();
        let before = game.position().clone();
        game.play_uci(uci).unwrap();
        game.undo_move().unwrap();
        assert_eq!(game.fen(), fen, "after {uci}");
        assert_eq!(game.position(), &before, "after {uci}");
    }
}

#[test]
fn queen_on_open_file_is_a_single_check() {
    let pos: Position = "4q2k/8/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
    let info = checks_and_pins(&pos);
    assert!(info.in_check);
    assert_eq!(info.checks.len(), 1);
    assert_eq!(info.checks[0].square, Square::E8);
    assert!(info.pins.is_empty());
}

#[test]
fn shielded_king_reports_pin_not_check() {
    let pos: Position = "4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1".parse().unwrap();
    let info = checks_and_pins(&pos);
    assert!(!info.in_check);
    assert!(info.checks.is_empty());
    assert_eq!(info.pins.len(), 1);
    assert_eq!(info.pins[0].square, Square::from_algebraic("e2").unwrap());
}

#[test]
fn pinned_knight_cannot_move() {
    let mut pos: Position = "4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1".parse().unwrap();
    let moves = generate_legal_moves(&mut pos);
    assert!(moves.iter().all(|m| m.from() == Square::E1));
}

#[test]
fn fen_roundtrip_through_game() {
    let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
    let game = Game::from_fen(fen).unwrap();
    assert_eq!(game.fen(), fen);
    assert!(Game::from_fen("not a fen").is_err());
    assert!(Game::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").is_err());
}
