//! RNG module - weighted random brick generation
//!
//! A brick is drawn in two stages: a weighted category pick (what kind of
//! brick this should be), then a rejection loop over a weighted piece pool
//! until the pair satisfies the category's predicate. The loop is unbounded
//! but always terminates: every category predicate is satisfiable by the
//! pool by construction. Changing the weights must preserve that.
//!
//! Also provides a simple LCG for deterministic testing.

use nettis_types::{Orientation, Piece, SPAWN_POSITION};

use crate::brick::Brick;
use crate::pieces;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the multiply-shift reduction instead of `%`: the low bits of an
    /// LCG have short periods, and a plain modulus by a power of two would
    /// cycle through a handful of values.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// The brick archetypes, drawn with fixed weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BrickCategory {
    Connection,
    Junk,
    Random,
    Destination,
    Fire,
}

/// Weighted category table: Connection 3/8, Junk 1/8, Random 2/8,
/// Destination 1/8, Fire 1/8.
const CATEGORY_POOL: [BrickCategory; 8] = [
    BrickCategory::Connection,
    BrickCategory::Connection,
    BrickCategory::Connection,
    BrickCategory::Junk,
    BrickCategory::Random,
    BrickCategory::Random,
    BrickCategory::Destination,
    BrickCategory::Fire,
];

/// Weighted piece pool for the pair draw: straights x3 each, corners x1
/// each, Destination x2, Junk x1, Fire x1.
const PIECE_POOL: [Piece; 14] = [
    Piece::HorizConn,
    Piece::HorizConn,
    Piece::HorizConn,
    Piece::VertConn,
    Piece::VertConn,
    Piece::VertConn,
    Piece::UpLeft,
    Piece::DownLeft,
    Piece::DownRight,
    Piece::UpRight,
    Piece::Destination,
    Piece::Destination,
    Piece::Junk,
    Piece::Fire,
];

/// Whether a drawn pair satisfies the category's shape rule, given the
/// brick's own orientation (piece 1 sits one step from piece 0 along it).
fn category_accepts(
    category: BrickCategory,
    p0: Piece,
    p1: Piece,
    orientation: Orientation,
) -> bool {
    match category {
        BrickCategory::Connection => {
            if !(pieces::is_connection_type(p0) || pieces::is_connection_type(p1)) {
                return false;
            }
            // The two cells must actually connect along the brick's axis.
            pieces::outgoing(p0)
                .intersect(pieces::incoming(p1))
                .contains(orientation)
        }
        BrickCategory::Junk => p0 == Piece::Junk || p1 == Piece::Junk,
        BrickCategory::Random => p0 != Piece::Junk && p1 != Piece::Junk,
        BrickCategory::Destination => {
            if p0 == Piece::Junk || p1 == Piece::Junk {
                return false;
            }
            // Exactly one destination; the double-destination brick is
            // trivially self-completing and rejected.
            (p0 == Piece::Destination) != (p1 == Piece::Destination)
        }
        // Fire bricks never reach the pair loop.
        BrickCategory::Fire => false,
    }
}

/// Weighted random generator of valid falling bricks.
#[derive(Debug, Clone)]
pub struct BrickFactory {
    rng: SimpleRng,
}

impl BrickFactory {
    /// Create a new factory with the given seed.
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw the next brick: spawn anchor at the top center, orientation from
    /// {Right, Down}, pieces per the category rules.
    pub fn next_brick(&mut self) -> Brick {
        let (x, y) = SPAWN_POSITION;
        let orientation = if self.rng.next_range(2) == 0 {
            Orientation::Right
        } else {
            Orientation::Down
        };

        let category = CATEGORY_POOL[self.rng.next_range(CATEGORY_POOL.len() as u32) as usize];

        if category == BrickCategory::Fire {
            return Brick::new([Piece::Fire, Piece::Empty], x, y, orientation);
        }

        loop {
            let p0 = PIECE_POOL[self.rng.next_range(PIECE_POOL.len() as u32) as usize];
            let p1 = PIECE_POOL[self.rng.next_range(PIECE_POOL.len() as u32) as usize];

            // Fire only ever falls alone.
            if p0 == Piece::Fire || p1 == Piece::Fire {
                continue;
            }

            if category_accepts(category, p0, p1, orientation) {
                return Brick::new([p0, p1], x, y, orientation);
            }
        }
    }
}

impl Default for BrickFactory {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_remapped() {
        // A zero seed would fix the LCG at its additive constant forever.
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn test_factory_deterministic() {
        let mut a = BrickFactory::new(77);
        let mut b = BrickFactory::new(77);
        for _ in 0..50 {
            assert_eq!(a.next_brick(), b.next_brick());
        }
    }

    #[test]
    fn test_fire_never_paired() {
        let mut factory = BrickFactory::new(42);
        for _ in 0..10_000 {
            let brick = factory.next_brick();
            if brick.pieces[0] == Piece::Fire {
                assert_eq!(brick.pieces[1], Piece::Empty);
            } else {
                assert_ne!(brick.pieces[1], Piece::Fire);
            }
        }
    }

    #[test]
    fn test_bricks_spawn_at_top_center() {
        let mut factory = BrickFactory::new(9);
        for _ in 0..1_000 {
            let brick = factory.next_brick();
            assert_eq!((brick.x, brick.y), SPAWN_POSITION);
            assert!(matches!(
                brick.orientation,
                Orientation::Right | Orientation::Down
            ));
        }
    }

    #[test]
    fn test_connection_predicate_requires_axis_link() {
        // Two horizontal wires side by side connect along Right.
        assert!(category_accepts(
            BrickCategory::Connection,
            Piece::HorizConn,
            Piece::HorizConn,
            Orientation::Right,
        ));
        // Stacked vertically they do not.
        assert!(!category_accepts(
            BrickCategory::Connection,
            Piece::HorizConn,
            Piece::HorizConn,
            Orientation::Down,
        ));
        // A destination accepts from any side, so a wire pointing at it works.
        assert!(category_accepts(
            BrickCategory::Connection,
            Piece::VertConn,
            Piece::Destination,
            Orientation::Down,
        ));
        // No connector in the pair is rejected outright.
        assert!(!category_accepts(
            BrickCategory::Connection,
            Piece::Destination,
            Piece::Destination,
            Orientation::Right,
        ));
    }

    #[test]
    fn test_junk_and_random_predicates() {
        assert!(category_accepts(
            BrickCategory::Junk,
            Piece::Junk,
            Piece::HorizConn,
            Orientation::Right,
        ));
        assert!(!category_accepts(
            BrickCategory::Junk,
            Piece::HorizConn,
            Piece::VertConn,
            Orientation::Right,
        ));
        assert!(category_accepts(
            BrickCategory::Random,
            Piece::HorizConn,
            Piece::Destination,
            Orientation::Right,
        ));
        assert!(!category_accepts(
            BrickCategory::Random,
            Piece::Junk,
            Piece::HorizConn,
            Orientation::Right,
        ));
    }

    #[test]
    fn test_destination_predicate_wants_exactly_one() {
        assert!(category_accepts(
            BrickCategory::Destination,
            Piece::Destination,
            Piece::HorizConn,
            Orientation::Right,
        ));
        assert!(!category_accepts(
            BrickCategory::Destination,
            Piece::Destination,
            Piece::Destination,
            Orientation::Right,
        ));
        assert!(!category_accepts(
            BrickCategory::Destination,
            Piece::Junk,
            Piece::Destination,
            Orientation::Right,
        ));
        assert!(!category_accepts(
            BrickCategory::Destination,
            Piece::HorizConn,
            Piece::VertConn,
            Orientation::Right,
        ));
    }

    #[test]
    fn test_every_category_is_satisfiable_by_the_pool() {
        // The rejection loop relies on this invariant.
        for category in [
            BrickCategory::Connection,
            BrickCategory::Junk,
            BrickCategory::Random,
            BrickCategory::Destination,
        ] {
            for orientation in [Orientation::Right, Orientation::Down] {
                let satisfiable = PIECE_POOL.iter().any(|&p0| {
                    PIECE_POOL.iter().any(|&p1| {
                        p0 != Piece::Fire
                            && p1 != Piece::Fire
                            && category_accepts(category, p0, p1, orientation)
                    })
                });
                assert!(satisfiable, "{category:?} unsatisfiable for {orientation:?}");
            }
        }
    }

    #[test]
    fn test_pool_weights() {
        let count = |piece| PIECE_POOL.iter().filter(|&&p| p == piece).count();
        assert_eq!(count(Piece::HorizConn), 3);
        assert_eq!(count(Piece::VertConn), 3);
        assert_eq!(count(Piece::Destination), 2);
        assert_eq!(count(Piece::Junk), 1);
        assert_eq!(count(Piece::Fire), 1);
        assert_eq!(PIECE_POOL.len(), 14);
        assert_eq!(CATEGORY_POOL.len(), 8);
    }
}
