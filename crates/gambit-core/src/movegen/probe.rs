//! Scoped board edits for legality probes.

use std::ops::Deref;

use crate::color::Color;
use crate::piece::Piece;
use crate::position::Position;
use crate::square::Square;

const MAX_EDITS: usize = 3;

/// Temporarily edits a position and restores it when dropped.
///
/// Used to ask "would the king be attacked after this move?" without a full
/// make/undo. Restoration runs on every exit path, so an early return while
/// the probe is alive cannot leak the edit.
pub(crate) struct Probe<'a> {
    pos: &'a mut Position,
    saved: [(Square, Option<Piece>); MAX_EDITS],
    len: usize,
    saved_king: Option<(Color, Square)>,
}

impl<'a> Probe<'a> {
    pub(crate) fn new(pos: &'a mut Position) -> Probe<'a> {
        Probe {
            pos,
            saved: [(Square::A1, None); MAX_EDITS],
            len: 0,
            saved_king: None,
        }
    }

    /// Overwrite a square, remembering what was there.
    pub(crate) fn set(&mut self, sq: Square, piece: Option<Piece>) {
        debug_assert!(self.len < MAX_EDITS, "probe edit budget exceeded");
        self.saved[self.len] = (sq, self.pos.piece_at(sq));
        self.len += 1;
        self.pos.set(sq, piece);
    }

    /// Move a king and its cached location together.
    pub(crate) fn move_king(&mut self, color: Color, from: Square, to: Square) {
        let king = self.pos.piece_at(from);
        self.set(from, None);
        self.set(to, king);
        if self.saved_king.is_none() {
            self.saved_king = Some((color, self.pos.king_square(color)));
        }
        self.pos.king_squares[color.index()] = to;
    }
}

impl Deref for Probe<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        &*self.pos
    }
}

impl Drop for Probe<'_> {
    fn drop(&mut self) {
        for &(sq, piece) in self.saved[..self.len].iter().rev() {
            self.pos.set(sq, piece);
        }
        if let Some((color, sq)) = self.saved_king {
            self.pos.king_squares[color.index()] = sq;
        }
    }
}
