//! Ray directions and jump offsets on the mailbox board.

/// A unit step in row/column space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    /// Row delta (negative is toward rank 8).
    pub d_row: i8,
    /// Column delta (positive is toward file h).
    pub d_col: i8,
}

impl Direction {
    pub const UP: Direction = Direction::new(-1, 0);
    pub const DOWN: Direction = Direction::new(1, 0);
    pub const LEFT: Direction = Direction::new(0, -1);
    pub const RIGHT: Direction = Direction::new(0, 1);
    pub const UP_LEFT: Direction = Direction::new(-1, -1);
    pub const UP_RIGHT: Direction = Direction::new(-1, 1);
    pub const DOWN_LEFT: Direction = Direction::new(1, -1);
    pub const DOWN_RIGHT: Direction = Direction::new(1, 1);

    /// Rook rays.
    pub const ORTHOGONAL: [Direction; 4] = [Self::UP, Self::LEFT, Self::DOWN, Self::RIGHT];

    /// Bishop rays.
    pub const DIAGONAL: [Direction; 4] = [
        Self::UP_LEFT,
        Self::UP_RIGHT,
        Self::DOWN_LEFT,
        Self::DOWN_RIGHT,
    ];

    /// All eight rays, orthogonal first. Also the king's step set.
    pub const ALL: [Direction; 8] = [
        Self::UP,
        Self::LEFT,
        Self::DOWN,
        Self::RIGHT,
        Self::UP_LEFT,
        Self::UP_RIGHT,
        Self::DOWN_LEFT,
        Self::DOWN_RIGHT,
    ];

    /// Knight jumps. Not rays: a knight never slides.
    pub const KNIGHT_JUMPS: [Direction; 8] = [
        Direction::new(-2, -1),
        Direction::new(-2, 1),
        Direction::new(-1, -2),
        Direction::new(-1, 2),
        Direction::new(1, -2),
        Direction::new(1, 2),
        Direction::new(2, -1),
        Direction::new(2, 1),
    ];

    #[inline]
    pub const fn new(d_row: i8, d_col: i8) -> Direction {
        Direction { d_row, d_col }
    }

    /// The opposite direction.
    #[inline]
    pub const fn reverse(self) -> Direction {
        Direction::new(-self.d_row, -self.d_col)
    }

    /// `true` for the four bishop rays.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        self.d_row != 0 && self.d_col != 0
    }

    /// `true` if `other` lies on the same line (this direction or its reverse).
    #[inline]
    pub fn is_aligned_with(self, other: Direction) -> bool {
        other == self || other == self.reverse()
    }
}
