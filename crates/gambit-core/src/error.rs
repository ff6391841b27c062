//! Error types for position parsing, move notation and undo.

use crate::color::Color;
use crate::square::Square;

/// A FEN string could not be turned into a position.
///
/// Parsing never yields a partially constructed position: any of these
/// errors means nothing was built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    /// The FEN string has neither 4 nor 6 space-separated fields.
    #[error("invalid position format: expected 4 or 6 FEN fields, found {found}")]
    WrongFieldCount {
        /// Number of fields found.
        found: usize,
    },
    /// The piece placement section does not have exactly 8 ranks.
    #[error("invalid position format: expected 8 ranks in piece placement, found {found}")]
    WrongRankCount {
        /// Number of ranks found.
        found: usize,
    },
    /// A rank in the piece placement describes more or fewer than 8 squares.
    #[error("invalid position format: rank {rank_index} describes {length} squares, expected 8")]
    BadRankLength {
        /// Zero-based row index (0 = rank 8).
        rank_index: usize,
        /// Number of squares described.
        length: usize,
    },
    /// An unrecognized character appeared in the piece placement.
    #[error("invalid position format: invalid piece character '{character}'")]
    InvalidPieceChar {
        /// The invalid character.
        character: char,
    },
    /// The active color field is not "w" or "b".
    #[error("invalid position format: invalid active color \"{found}\"")]
    InvalidColor {
        /// The invalid color string.
        found: String,
    },
    /// An unrecognized character appeared in the castling rights field.
    #[error("invalid position format: invalid castling character '{character}'")]
    InvalidCastlingChar {
        /// The invalid character.
        character: char,
    },
    /// The en passant field is not "-" or a square on rank 3 or 6.
    #[error("invalid position format: invalid en passant square \"{found}\"")]
    InvalidEnPassant {
        /// The invalid en passant string.
        found: String,
    },
    /// A move counter is not a valid number.
    #[error("invalid position format: invalid {field} \"{found}\"")]
    InvalidMoveCounter {
        /// The field name ("halfmove clock" or "fullmove number").
        field: &'static str,
        /// The invalid string.
        found: String,
    },
    /// The parsed board fails structural validation.
    #[error("invalid position format: {source}")]
    InvalidBoard {
        /// The underlying board validation error.
        #[from]
        source: BoardError,
    },
}

/// Errors from structural validation of a parsed board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A side does not have exactly one king.
    #[error("expected 1 king for {}, found {count}", .color.name())]
    InvalidKingCount {
        /// Which side has the wrong king count.
        color: Color,
        /// Number of kings found.
        count: u32,
    },
    /// Pawns occupy the first or eighth rank.
    #[error("pawns found on back rank")]
    PawnsOnBackRank,
}

/// A coordinate move string could not be resolved against a position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveNotationError {
    /// The string is not 4 (or 5, with a promotion letter) characters long.
    #[error("invalid move notation \"{notation}\": expected 4 or 5 characters")]
    BadLength {
        /// The rejected text.
        notation: String,
    },
    /// One of the two squares is not a valid coordinate.
    #[error("invalid move notation \"{notation}\": bad square")]
    BadSquare {
        /// The rejected text.
        notation: String,
    },
    /// The source square holds no piece.
    #[error("invalid move notation \"{notation}\": no piece on {square}")]
    EmptySource {
        /// The rejected text.
        notation: String,
        /// The empty source square.
        square: Square,
    },
    /// A promotion letter other than `q` was given.
    #[error("invalid move notation \"{notation}\": only queen promotion is supported")]
    UnsupportedPromotion {
        /// The rejected text.
        notation: String,
    },
    /// The move parsed but is not legal in the position.
    #[error("illegal move \"{notation}\"")]
    IllegalMove {
        /// The rejected text.
        notation: String,
    },
}

/// Reasons an undo request is refused. The game state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UndoError {
    /// The move log is empty.
    #[error("nothing to undo")]
    NothingToUndo,
    /// Checkmate or stalemate is flagged; clear the flags first.
    #[error("game is already over")]
    GameAlreadyOver,
}
