//! Render-facing view of a gameplay session
//!
//! The snapshot carries exactly what external rendering may read: the board
//! grid, the powered-wire grid, the falling brick, and the score. Callers
//! keep one snapshot and refill it every frame via
//! [`Gameplay::snapshot_into`](crate::game_state::Gameplay::snapshot_into).

use nettis_types::{DirSet, Orientation, Piece, BOARD_HEIGHT, BOARD_WIDTH};

use crate::brick::Brick;

const W: usize = BOARD_WIDTH as usize;
const H: usize = BOARD_HEIGHT as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickSnapshot {
    pub pieces: [Piece; 2],
    pub x: i8,
    pub y: i8,
    pub orientation: Orientation,
}

impl From<Brick> for BrickSnapshot {
    fn from(value: Brick) -> Self {
        Self {
            pieces: value.pieces,
            x: value.x,
            y: value.y,
            orientation: value.orientation,
        }
    }
}

impl BrickSnapshot {
    /// Board cells occupied by the two brick pieces, anchor first.
    pub fn locations(&self) -> [(i8, i8); 2] {
        let (dx, dy) = self.orientation.offset();
        [(self.x, self.y), (self.x + dx, self.y + dy)]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Piece per cell, indexed `[y][x]`.
    pub board: [[Piece; W]; H],
    /// Powered incoming directions per cell, indexed `[y][x]`.
    pub powers: [[DirSet; W]; H],
    pub brick: BrickSnapshot,
    pub score: u32,
}

impl Snapshot {
    pub fn clear(&mut self) {
        self.board = [[Piece::Empty; W]; H];
        self.powers = [[DirSet::EMPTY; W]; H];
        self.brick = BrickSnapshot {
            pieces: [Piece::Empty; 2],
            x: 0,
            y: 0,
            orientation: Orientation::Right,
        };
        self.score = 0;
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        let mut snapshot = Self {
            board: [[Piece::Empty; W]; H],
            powers: [[DirSet::EMPTY; W]; H],
            brick: BrickSnapshot {
                pieces: [Piece::Empty; 2],
                x: 0,
                y: 0,
                orientation: Orientation::Right,
            },
            score: 0,
        };
        snapshot.clear();
        snapshot
    }
}
