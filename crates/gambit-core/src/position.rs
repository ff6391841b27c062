//! The mutable game position: an 8x8 mailbox plus everything make/undo needs.

use std::collections::HashMap;
use std::fmt;

use crate::castle_rights::CastleRights;
use crate::chess_move::Move;
use crate::color::Color;
use crate::error::BoardError;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Canonical signature of a position for repetition detection.
///
/// Covers exactly the first four FEN fields: placement, side to move,
/// castling rights and en-passant target. Move counters are excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey {
    squares: [Option<Piece>; 64],
    side_to_move: Color,
    castling: CastleRights,
    en_passant: Option<Square>,
}

/// State a move destroys and undo must restore from the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Irreversible {
    pub(crate) castling: CastleRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u16,
}

/// A chess position that is mutated in place by make/undo.
///
/// Besides the board this owns the move log, the snapshot log of the
/// irreversible fields, and the repetition table. `move_log` and
/// `undo_log` always have the same length.
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    pub(crate) squares: [Option<Piece>; 64],
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastleRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,
    pub(crate) king_squares: [Square; Color::COUNT],
    pub(crate) history: HashMap<PositionKey, u8>,
    pub(crate) move_log: Vec<Move>,
    pub(crate) undo_log: Vec<Irreversible>,
}

impl Position {
    /// Create the standard starting position.
    pub fn starting_position() -> Position {
        const BACK_ROW: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut squares = [None; 64];
        for (col, kind) in BACK_ROW.into_iter().enumerate() {
            squares[col] = Some(Piece::new(kind, Color::Black));
            squares[8 + col] = Some(Piece::BLACK_PAWN);
            squares[48 + col] = Some(Piece::WHITE_PAWN);
            squares[56 + col] = Some(Piece::new(kind, Color::White));
        }

        Position::with_kings(
            squares,
            Color::White,
            CastleRights::ALL,
            None,
            0,
            1,
            [Square::E1, Square::E8],
        )
    }

    /// Assemble a position from parsed fields, validating the board.
    pub(crate) fn from_parts(
        squares: [Option<Piece>; 64],
        side_to_move: Color,
        castling: CastleRights,
        en_passant: Option<Square>,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> Result<Position, BoardError> {
        let king_squares = validate(&squares)?;
        Ok(Position::with_kings(
            squares,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
            king_squares,
        ))
    }

    fn with_kings(
        squares: [Option<Piece>; 64],
        side_to_move: Color,
        castling: CastleRights,
        en_passant: Option<Square>,
        halfmove_clock: u16,
        fullmove_number: u16,
        king_squares: [Square; Color::COUNT],
    ) -> Position {
        let mut pos = Position {
            squares,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
            king_squares,
            history: HashMap::new(),
            move_log: Vec::new(),
            undo_log: Vec::new(),
        };
        pos.history.insert(pos.key(), 1);
        pos
    }

    /// Return the piece on a square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Overwrite a square. Callers keep `king_squares` in sync themselves.
    #[inline]
    pub(crate) fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.index()] = piece;
    }

    /// Return the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Return the current castling rights.
    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    /// Square a pawn may capture onto en passant, set only right after a double push.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Plies since the last pawn move or capture.
    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    /// Full move number, starting at 1 and incremented after Black moves.
    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Cached location of the given side's king.
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    /// Moves applied since this position was constructed, oldest first.
    #[inline]
    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }

    /// The most recently applied move.
    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.move_log.last().copied()
    }

    /// Castling rights before each logged move, oldest first.
    pub fn castle_rights_log(&self) -> impl Iterator<Item = CastleRights> + '_ {
        self.undo_log.iter().map(|u| u.castling)
    }

    /// En-passant targets before each logged move, oldest first.
    pub fn en_passant_log(&self) -> impl Iterator<Item = Option<Square>> + '_ {
        self.undo_log.iter().map(|u| u.en_passant)
    }

    /// Canonical repetition signature of the current position.
    pub fn key(&self) -> PositionKey {
        PositionKey {
            squares: self.squares,
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
        }
    }

    /// How many times the current position has occurred in this game.
    pub fn repetition_count(&self) -> u8 {
        self.history.get(&self.key()).copied().unwrap_or(0)
    }

    /// Iterate over occupied squares and their pieces.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Fifty full moves without a pawn move or capture.
    #[inline]
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// The current position has occurred at least three times.
    #[inline]
    pub fn is_threefold_repetition(&self) -> bool {
        self.repetition_count() >= 3
    }

    /// Neither side can possibly deliver mate.
    ///
    /// Recognizes bare kings, a single minor piece, and one bishop each
    /// on squares of the same colour.
    pub fn has_insufficient_material(&self) -> bool {
        let mut minors: Vec<(Square, Piece)> = Vec::with_capacity(2);
        for (sq, piece) in self.pieces() {
            match piece.kind() {
                PieceKind::King => {}
                PieceKind::Knight | PieceKind::Bishop => {
                    if minors.len() == 2 {
                        return false;
                    }
                    minors.push((sq, piece));
                }
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            }
        }

        match minors.as_slice() {
            [] | [_] => true,
            [(sq_a, a), (sq_b, b)] => {
                a.kind() == PieceKind::Bishop
                    && b.kind() == PieceKind::Bishop
                    && a.color() != b.color()
                    && sq_a.is_light() == sq_b.is_light()
            }
            _ => false,
        }
    }

    /// Any draw that does not depend on the legal move list.
    pub fn is_draw_by_rule(&self) -> bool {
        self.is_fifty_move_draw() || self.is_threefold_repetition() || self.has_insufficient_material()
    }

    /// Return a wrapper that displays the board as an 8x8 grid.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::starting_position()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position(\"{self}\")")
    }
}

/// Check king counts and back-row pawns, returning both king squares.
fn validate(squares: &[Option<Piece>; 64]) -> Result<[Square; Color::COUNT], BoardError> {
    let mut kings: [Option<Square>; Color::COUNT] = [None; Color::COUNT];
    let mut counts = [0u32; Color::COUNT];

    for sq in Square::all() {
        let Some(piece) = squares[sq.index()] else {
            continue;
        };
        match piece.kind() {
            PieceKind::King => {
                counts[piece.color().index()] += 1;
                kings[piece.color().index()] = Some(sq);
            }
            PieceKind::Pawn if sq.row() == 0 || sq.row() == 7 => {
                return Err(BoardError::PawnsOnBackRank);
            }
            _ => {}
        }
    }

    let mut found = [Square::E1, Square::E8];
    for color in Color::ALL {
        match (counts[color.index()], kings[color.index()]) {
            (1, Some(sq)) => found[color.index()] = sq,
            (count, _) => return Err(BoardError::InvalidKingCount { color, count }),
        }
    }
    Ok(found)
}

/// Wrapper for pretty-printing a position as an 8x8 grid.
pub struct PrettyBoard<'a>(&'a Position);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0u8..8 {
            write!(f, "{}  ", 8 - row)?;
            for col in 0u8..8 {
                let c = Square::new(row, col)
                    .and_then(|sq| self.0.piece_at(sq))
                    .map_or('.', Piece::fen_char);
                if col < 7 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
