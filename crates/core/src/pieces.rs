//! Piece rules - static connector geometry, rotation, classification
//!
//! Pure functions over the [`Piece`] enum. Every table is an exhaustive
//! match, so an uncategorized variant is a compile error rather than a
//! silent default.

use nettis_types::{DirSet, Orientation, Piece};

use Orientation::{Down, Left, Right, Up};

/// Directions from which a piece accepts power.
pub fn incoming(piece: Piece) -> DirSet {
    match piece {
        Piece::Empty => DirSet::EMPTY,
        Piece::HorizConn => DirSet::EMPTY.with(Right).with(Left),
        Piece::VertConn => DirSet::EMPTY.with(Down).with(Up),
        Piece::UpLeft => DirSet::EMPTY.with(Down).with(Right),
        Piece::DownLeft => DirSet::EMPTY.with(Up).with(Right),
        Piece::DownRight => DirSet::EMPTY.with(Up).with(Left),
        Piece::UpRight => DirSet::EMPTY.with(Down).with(Left),
        Piece::Destination => DirSet::ALL,
        Piece::Junk => DirSet::EMPTY,
        Piece::Fire => DirSet::EMPTY,
    }
}

/// Directions into which a piece emits power.
///
/// Fire emits in all four directions but accepts none, which is what lets a
/// fire cell ignite adjacent wires without ever being powered itself.
pub fn outgoing(piece: Piece) -> DirSet {
    match piece {
        Piece::Empty => DirSet::EMPTY,
        Piece::HorizConn => DirSet::EMPTY.with(Right).with(Left),
        Piece::VertConn => DirSet::EMPTY.with(Down).with(Up),
        Piece::UpLeft => DirSet::EMPTY.with(Up).with(Left),
        Piece::DownLeft => DirSet::EMPTY.with(Down).with(Left),
        Piece::DownRight => DirSet::EMPTY.with(Down).with(Right),
        Piece::UpRight => DirSet::EMPTY.with(Up).with(Right),
        Piece::Destination => DirSet::ALL,
        Piece::Junk => DirSet::EMPTY,
        Piece::Fire => DirSet::ALL,
    }
}

/// 90-degree rotation. Straight wires swap axes, corners cycle
/// UL -> UR -> DR -> DL -> UL; everything else is rotation-invariant.
pub fn rotate(piece: Piece) -> Piece {
    match piece {
        Piece::Empty => Piece::Empty,
        Piece::HorizConn => Piece::VertConn,
        Piece::VertConn => Piece::HorizConn,
        Piece::UpLeft => Piece::UpRight,
        Piece::UpRight => Piece::DownRight,
        Piece::DownRight => Piece::DownLeft,
        Piece::DownLeft => Piece::UpLeft,
        Piece::Destination => Piece::Destination,
        Piece::Junk => Piece::Junk,
        Piece::Fire => Piece::Fire,
    }
}

/// Whether the piece is a wire (straight or corner connector).
pub fn is_connection_type(piece: Piece) -> bool {
    matches!(
        piece,
        Piece::HorizConn
            | Piece::VertConn
            | Piece::UpLeft
            | Piece::DownLeft
            | Piece::DownRight
            | Piece::UpRight
    )
}

/// All ten piece variants (for table-driven tests and rendering legends).
pub const ALL_PIECES: [Piece; 10] = [
    Piece::Empty,
    Piece::HorizConn,
    Piece::VertConn,
    Piece::UpLeft,
    Piece::DownLeft,
    Piece::DownRight,
    Piece::UpRight,
    Piece::Destination,
    Piece::Junk,
    Piece::Fire,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_four_times_is_identity() {
        for piece in ALL_PIECES {
            assert_eq!(rotate(rotate(rotate(rotate(piece)))), piece);
        }
    }

    #[test]
    fn test_corner_rotation_cycle() {
        assert_eq!(rotate(Piece::UpLeft), Piece::UpRight);
        assert_eq!(rotate(Piece::UpRight), Piece::DownRight);
        assert_eq!(rotate(Piece::DownRight), Piece::DownLeft);
        assert_eq!(rotate(Piece::DownLeft), Piece::UpLeft);
    }

    #[test]
    fn test_straight_wires_swap_under_rotation() {
        assert_eq!(rotate(Piece::HorizConn), Piece::VertConn);
        assert_eq!(rotate(Piece::VertConn), Piece::HorizConn);
    }

    #[test]
    fn test_destination_conducts_everything() {
        assert_eq!(incoming(Piece::Destination), DirSet::ALL);
        assert_eq!(outgoing(Piece::Destination), DirSet::ALL);
    }

    #[test]
    fn test_inert_pieces_conduct_nothing() {
        for piece in [Piece::Empty, Piece::Junk] {
            assert!(incoming(piece).is_empty());
            assert!(outgoing(piece).is_empty());
        }
    }

    #[test]
    fn test_fire_emits_but_never_accepts() {
        assert!(incoming(Piece::Fire).is_empty());
        assert_eq!(outgoing(Piece::Fire), DirSet::ALL);
    }

    #[test]
    fn test_corner_geometry() {
        use Orientation::{Down, Left, Right, Up};
        // An up-left corner accepts from below and from the right, and emits
        // up and to the left.
        let inc = incoming(Piece::UpLeft);
        assert!(inc.contains(Down) && inc.contains(Right));
        let out = outgoing(Piece::UpLeft);
        assert!(out.contains(Up) && out.contains(Left));
    }

    #[test]
    fn test_connection_classification() {
        assert!(is_connection_type(Piece::HorizConn));
        assert!(is_connection_type(Piece::UpRight));
        assert!(!is_connection_type(Piece::Destination));
        assert!(!is_connection_type(Piece::Junk));
        assert!(!is_connection_type(Piece::Fire));
        assert!(!is_connection_type(Piece::Empty));
    }

    #[test]
    fn test_rotation_preserves_classification() {
        for piece in ALL_PIECES {
            assert_eq!(
                is_connection_type(piece),
                is_connection_type(rotate(piece))
            );
        }
    }
}
