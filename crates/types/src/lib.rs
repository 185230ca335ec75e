//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making
//! them usable in any context (core logic, UI rendering, input plumbing).
//!
//! # Board Dimensions
//!
//! The Nettis well:
//!
//! - **Width**: 6 columns (indexed 0-5)
//! - **Height**: 13 rows (indexed 0-12)
//! - **Spawn anchor**: (2, 0)
//!
//! # Timing
//!
//! Timers are wall-clock based (seconds), so frame-rate variance does not
//! change real-time cadence:
//!
//! - `GRAVITY_INTERVAL`: 0.75 s between forced one-row drops
//! - `POWER_STEP_INTERVAL`: 0.15 s between cleared cells of a power trace
//! - `JUNK_STEP_INTERVAL`: 0.15 s between stamped cells of a junk trace
//! - `TICK_MS`: 16 ms fixed frame cadence for the terminal runner

/// Board width in cells (6 columns).
pub const BOARD_WIDTH: i8 = 6;

/// Board height in cells (13 rows).
pub const BOARD_HEIGHT: i8 = 13;

/// Total number of cells on the board.
pub const BOARD_CELLS: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Spawn anchor for a freshly generated brick (x, y).
pub const SPAWN_POSITION: (i8, i8) = (BOARD_WIDTH / 2 - 1, 0);

/// Fixed timestep interval for the terminal runner (~60 FPS).
pub const TICK_MS: u64 = 16;

/// Seconds between gravity-forced drops of the falling brick.
pub const GRAVITY_INTERVAL: f64 = 0.75;

/// Seconds between consecutive cleared cells during power-trace playback.
pub const POWER_STEP_INTERVAL: f64 = 0.15;

/// Seconds between consecutive stamped cells during junk-trace playback.
pub const JUNK_STEP_INTERVAL: f64 = 0.15;

/// A cell's occupant. Every board cell holds exactly one piece; `Empty` is a
/// valid occupant, not an absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    Empty,
    /// Straight wire conducting left-right.
    HorizConn,
    /// Straight wire conducting up-down.
    VertConn,
    /// Corner wire: accepts from below/right, emits up/left.
    UpLeft,
    /// Corner wire: accepts from above/right, emits down/left.
    DownLeft,
    /// Corner wire: accepts from above/left, emits down/right.
    DownRight,
    /// Corner wire: accepts from below/left, emits up/right.
    UpRight,
    /// Power source and sink; conducts in all four directions both ways.
    Destination,
    /// Inert debris. Conducts nothing, swept by nearby trace clears.
    Junk,
    /// Emits in all four directions but accepts nothing.
    Fire,
}

/// One of the four cardinal directions on the grid.
///
/// Doubles as a brick orientation: the second brick cell sits one step from
/// the anchor along this direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Right,
    Down,
    Left,
    Up,
}

impl Orientation {
    /// All four directions, in rotation order.
    pub const ALL: [Orientation; 4] = [
        Orientation::Right,
        Orientation::Down,
        Orientation::Left,
        Orientation::Up,
    ];

    /// The opposite direction. `flip` is its own inverse.
    pub const fn flip(self) -> Self {
        match self {
            Orientation::Right => Orientation::Left,
            Orientation::Left => Orientation::Right,
            Orientation::Down => Orientation::Up,
            Orientation::Up => Orientation::Down,
        }
    }

    /// Unit offset (dx, dy) of one step in this direction.
    pub const fn offset(self) -> (i8, i8) {
        match self {
            Orientation::Right => (1, 0),
            Orientation::Down => (0, 1),
            Orientation::Left => (-1, 0),
            Orientation::Up => (0, -1),
        }
    }

    /// Next orientation clockwise (Right -> Down -> Left -> Up -> Right).
    pub const fn rotated(self) -> Self {
        match self {
            Orientation::Right => Orientation::Down,
            Orientation::Down => Orientation::Left,
            Orientation::Left => Orientation::Up,
            Orientation::Up => Orientation::Right,
        }
    }

    /// Bit index used by [`DirSet`].
    pub const fn bit(self) -> u8 {
        match self {
            Orientation::Right => 0,
            Orientation::Down => 1,
            Orientation::Left => 2,
            Orientation::Up => 3,
        }
    }
}

/// A set of directions, stored as a 4-bit mask.
///
/// Kept as a bitmask for cheap copies and intersections, but exposed only
/// through named predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DirSet(u8);

impl DirSet {
    pub const EMPTY: DirSet = DirSet(0);
    pub const ALL: DirSet = DirSet(0b1111);

    /// This set plus one direction (const-friendly builder for tables).
    pub const fn with(self, o: Orientation) -> DirSet {
        DirSet(self.0 | 1 << o.bit())
    }

    pub fn insert(&mut self, o: Orientation) {
        self.0 |= 1 << o.bit();
    }

    pub const fn contains(self, o: Orientation) -> bool {
        self.0 & 1 << o.bit() != 0
    }

    pub const fn intersect(self, other: DirSet) -> DirSet {
        DirSet(self.0 & other.0)
    }

    /// Whether the two sets share at least one direction.
    pub const fn intersects(self, other: DirSet) -> bool {
        self.0 & other.0 != 0
    }

    /// Whether every direction in `required` is present in this set.
    pub const fn contains_all(self, required: DirSet) -> bool {
        self.0 & required.0 == required.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// The logical input events sampled once per tick.
///
/// Each flag is true when the key was pressed or repeating this tick. The
/// sequencer applies them with a fixed priority (Down > Left > Right >
/// Rotate) and never combines two in one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameInput {
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub rotate: bool,
}

impl FrameInput {
    /// The empty input frame (nothing pressed).
    pub const NONE: FrameInput = FrameInput {
        down: false,
        left: false,
        right: false,
        rotate: false,
    };
}

/// A single logical game event, as produced by the key mapping layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    MoveDown,
    MoveLeft,
    MoveRight,
    Rotate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_is_involution() {
        for o in Orientation::ALL {
            assert_eq!(o.flip().flip(), o);
        }
    }

    #[test]
    fn test_flip_pairs() {
        assert_eq!(Orientation::Right.flip(), Orientation::Left);
        assert_eq!(Orientation::Down.flip(), Orientation::Up);
    }

    #[test]
    fn test_rotated_cycles_in_four() {
        for o in Orientation::ALL {
            assert_eq!(o.rotated().rotated().rotated().rotated(), o);
        }
    }

    #[test]
    fn test_offset_matches_flip() {
        for o in Orientation::ALL {
            let (dx, dy) = o.offset();
            let (fx, fy) = o.flip().offset();
            assert_eq!((dx + fx, dy + fy), (0, 0));
        }
    }

    #[test]
    fn test_dirset_predicates() {
        let set = DirSet::EMPTY.with(Orientation::Right).with(Orientation::Up);
        assert!(set.contains(Orientation::Right));
        assert!(set.contains(Orientation::Up));
        assert!(!set.contains(Orientation::Left));
        assert!(set.intersects(DirSet::EMPTY.with(Orientation::Up)));
        assert!(!set.intersects(DirSet::EMPTY.with(Orientation::Down)));
        assert!(DirSet::ALL.contains_all(set));
        assert!(!set.contains_all(DirSet::ALL));
        assert!(DirSet::EMPTY.is_empty());
        assert!(!set.is_empty());
    }

    #[test]
    fn test_dirset_insert() {
        let mut set = DirSet::EMPTY;
        set.insert(Orientation::Down);
        assert!(set.contains(Orientation::Down));
        set.insert(Orientation::Down);
        assert_eq!(set, DirSet::EMPTY.with(Orientation::Down));
    }

    #[test]
    fn test_spawn_position_in_bounds() {
        let (x, y) = SPAWN_POSITION;
        assert!(x >= 0 && x < BOARD_WIDTH);
        assert!(y >= 0 && y < BOARD_HEIGHT);
    }
}
