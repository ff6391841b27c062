//! A game in progress: a position plus the terminal flags the legal move
//! list determines.

use tracing::debug;

use crate::chess_move::Move;
use crate::error::{FenError, MoveNotationError, UndoError};
use crate::movegen::{MoveList, generate_legal_moves};
use crate::position::Position;

/// Interactive game state.
///
/// The flags are refreshed by [`Game::valid_moves`]. `stalemate` covers
/// every draw, not only the no-legal-move case.
#[derive(Debug, Clone, Default)]
pub struct Game {
    position: Position,
    in_check: bool,
    checkmate: bool,
    stalemate: bool,
}

impl Game {
    /// A game from the standard starting position.
    pub fn new() -> Game {
        Game::default()
    }

    /// A game starting from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Game, FenError> {
        Ok(Game::from_position(fen.parse()?))
    }

    /// Wrap an existing position. Terminal flags start cleared.
    pub fn from_position(position: Position) -> Game {
        Game {
            position,
            in_check: false,
            checkmate: false,
            stalemate: false,
        }
    }

    /// The current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Mutable access for make/undo driven by a search.
    pub fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }

    /// Unwrap the position, dropping the flags.
    pub fn into_position(self) -> Position {
        self.position
    }

    /// FEN of the current position.
    pub fn fen(&self) -> String {
        self.position.to_fen()
    }

    /// Side to move was in check at the last [`Game::valid_moves`].
    pub fn in_check(&self) -> bool {
        self.in_check
    }

    /// Side to move is checkmated.
    pub fn checkmate(&self) -> bool {
        self.checkmate
    }

    /// No legal moves without check, or a draw by rule.
    pub fn stalemate(&self) -> bool {
        self.stalemate
    }

    /// Either terminal flag is set.
    pub fn is_over(&self) -> bool {
        self.checkmate || self.stalemate
    }

    /// Legal moves for the side to move, refreshing the terminal flags.
    pub fn valid_moves(&mut self) -> MoveList {
        let moves = generate_legal_moves(&mut self.position);
        self.in_check = self.position.is_in_check();
        self.checkmate = moves.is_empty() && self.in_check;
        self.stalemate = !self.checkmate && (moves.is_empty() || self.position.is_draw_by_rule());

        if self.checkmate {
            debug!(fen = %self.position, "checkmate");
        } else if self.stalemate {
            debug!(
                fen = %self.position,
                fifty = self.position.is_fifty_move_draw(),
                threefold = self.position.is_threefold_repetition(),
                material = self.position.has_insufficient_material(),
                "drawn position"
            );
        }
        moves
    }

    /// Apply a move taken from [`Game::valid_moves`].
    pub fn make_move(&mut self, mv: Move) {
        self.position.make_move(mv);
    }

    /// Take back the last move.
    ///
    /// Refused while a terminal flag is set; call
    /// [`Game::clear_terminal_flags`] first.
    pub fn undo_move(&mut self) -> Result<Move, UndoError> {
        if self.is_over() {
            return Err(UndoError::GameAlreadyOver);
        }
        let mv = self.position.undo_move().ok_or(UndoError::NothingToUndo)?;
        self.in_check = self.position.is_in_check();
        Ok(mv)
    }

    /// Reset both terminal flags so undo is allowed again.
    pub fn clear_terminal_flags(&mut self) {
        self.checkmate = false;
        self.stalemate = false;
    }

    /// Resolve and play a coordinate move such as `e2e4`.
    pub fn play_uci(&mut self, text: &str) -> Result<Move, MoveNotationError> {
        let mv = self.position.parse_uci_move(text)?;
        self.make_move(mv);
        Ok(mv)
    }
}
