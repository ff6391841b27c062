//! Core chess types: board representation, move generation, and game rules.

mod attacks;
mod castle_rights;
mod chess_move;
mod color;
mod direction;
mod error;
mod fen;
mod game;
mod make_move;
mod notation;
mod piece;
mod piece_kind;
mod position;
mod square;

pub mod movegen;
pub mod perft;

pub use castle_rights::{CastleRights, CastleSide};
pub use chess_move::{Move, MoveKind};
pub use color::Color;
pub use direction::Direction;
pub use error::{BoardError, FenError, MoveNotationError, UndoError};
pub use fen::STARTING_FEN;
pub use game::Game;
pub use movegen::{CheckInfo, MoveList, checks_and_pins, generate_legal_moves};
pub use piece::Piece;
pub use piece_kind::PieceKind;
pub use position::{Position, PositionKey, PrettyBoard};
pub use square::Square;
