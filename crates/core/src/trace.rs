//! Trace engine - flood propagation over the board
//!
//! Three flood algorithms share one shape: seed a single cell, expand to
//! 4-neighbors in queue order, never revisit a cell, stop when the frontier
//! is exhausted. They differ in what counts as a passable edge:
//!
//! - **Power trace**: follows outgoing->incoming connector compatibility
//!   from a destination, accumulating which side of each visited cell
//!   received power into a [`PowerBoard`].
//! - **Junk trace**: follows a wire's outgoing directions outward; an exit
//!   that leaves the board marks the whole trace as junk-contaminated.
//! - **Fire trace**: spreads from a fire cell through directionally
//!   compatible wires, ungated by power.
//!
//! Visitation sets are a fixed bitset sized to the 78-cell grid, so tracing
//! allocates nothing and terminates within one visit per cell.

use arrayvec::ArrayVec;

use nettis_types::{DirSet, Orientation, Piece, BOARD_CELLS, BOARD_HEIGHT, BOARD_WIDTH};

use crate::board::Board;
use crate::pieces;

/// Neighbor scan order: left, right, up, down. Playback order depends on
/// it, so it is fixed rather than derived from `Orientation::ALL`.
const NEIGHBOR_SCAN: [Orientation; 4] = [
    Orientation::Left,
    Orientation::Right,
    Orientation::Up,
    Orientation::Down,
];

/// Fixed-size membership bitset over the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CellSet(u128);

impl CellSet {
    fn insert(&mut self, x: i8, y: i8) {
        if let Some(bit) = Self::bit(x, y) {
            self.0 |= 1u128 << bit;
        }
    }

    fn contains(&self, x: i8, y: i8) -> bool {
        match Self::bit(x, y) {
            Some(bit) => self.0 & 1u128 << bit != 0,
            None => false,
        }
    }

    fn bit(x: i8, y: i8) -> Option<u32> {
        if x < 0 || x >= BOARD_WIDTH || y < 0 || y >= BOARD_HEIGHT {
            return None;
        }
        Some((y as u32) * (BOARD_WIDTH as u32) + x as u32)
    }
}

/// One flood visitation result: the visited cells in order, plus the
/// counters the junk rules read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    cells: ArrayVec<(i8, i8), BOARD_CELLS>,
    visited: CellSet,
    open_conns: u32,
    junk: bool,
}

impl Trace {
    fn seeded(x: i8, y: i8) -> Self {
        let mut trace = Self::default();
        trace.push(x, y);
        trace
    }

    fn push(&mut self, x: i8, y: i8) {
        self.visited.insert(x, y);
        self.cells.push((x, y));
    }

    /// Visited cells in visitation order.
    pub fn cells(&self) -> &[(i8, i8)] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, x: i8, y: i8) -> bool {
        self.visited.contains(x, y)
    }

    /// Count of dangling ends seen while tracing (compatible expansions and
    /// open wire mouths into empty cells).
    pub fn open_connections(&self) -> u32 {
        self.open_conns
    }

    /// Whether some traced wire points off the board edge.
    pub fn is_junk_contaminated(&self) -> bool {
        self.junk
    }
}

/// Per-cell record of which incoming directions currently carry power.
/// Rebuilt from scratch on every discovery pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerBoard {
    incoming: [DirSet; BOARD_CELLS],
}

impl PowerBoard {
    pub fn new() -> Self {
        Self {
            incoming: [DirSet::EMPTY; BOARD_CELLS],
        }
    }

    /// Powered incoming directions at (x, y); empty when out of bounds.
    pub fn incoming(&self, x: i8, y: i8) -> DirSet {
        match CellSet::bit(x, y) {
            Some(bit) => self.incoming[bit as usize],
            None => DirSet::EMPTY,
        }
    }

    /// Whether any incoming direction at (x, y) carries power (rendering
    /// highlight predicate).
    pub fn is_powered(&self, x: i8, y: i8) -> bool {
        !self.incoming(x, y).is_empty()
    }

    fn accumulate(&mut self, x: i8, y: i8, from: Orientation) {
        if let Some(bit) = CellSet::bit(x, y) {
            self.incoming[bit as usize].insert(from);
        }
    }

    pub fn clear(&mut self) {
        self.incoming = [DirSet::EMPTY; BOARD_CELLS];
    }
}

impl Default for PowerBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Flood power outward from a destination seed, recording which side of
/// every reached cell the power arrived on.
///
/// An edge is passable when the current cell's outgoing set, the neighbor's
/// incoming set, and the edge direction all agree. Direct
/// destination-to-destination hops are skipped: two adjacent destinations do
/// not power each other without a wire between them.
pub fn power_trace(board: &Board, x: i8, y: i8, powers: &mut PowerBoard) -> Trace {
    let mut trace = Trace::seeded(x, y);

    let mut i = 0;
    while i < trace.cells.len() {
        let (cx, cy) = trace.cells[i];
        i += 1;

        let Some(piece) = board.get(cx, cy) else {
            continue;
        };
        let dir_from = pieces::outgoing(piece);

        for dir in NEIGHBOR_SCAN {
            let (dx, dy) = dir.offset();
            let (nx, ny) = (cx + dx, cy + dy);

            if board.is_out_of_bounds(nx, ny) || trace.contains(nx, ny) {
                continue;
            }
            let Some(other) = board.get(nx, ny) else {
                continue;
            };

            if piece == Piece::Destination && other == Piece::Destination {
                continue;
            }

            if !dir_from.intersect(pieces::incoming(other)).contains(dir) {
                continue;
            }

            powers.accumulate(nx, ny, dir.flip());
            trace.push(nx, ny);
        }
    }

    trace
}

/// Reduce a raw power trace to the cells that are fully powered: connector
/// cells stay only when the accumulated incoming power covers their entire
/// outgoing set; non-connector cells (the destinations) always stay.
pub fn filter_powered(board: &Board, trace: &Trace, powers: &PowerBoard) -> Trace {
    let mut filtered = Trace {
        open_conns: trace.open_conns,
        junk: trace.junk,
        ..Trace::default()
    };

    for &(x, y) in trace.cells() {
        let Some(piece) = board.get(x, y) else {
            continue;
        };

        if !pieces::is_connection_type(piece) {
            filtered.push(x, y);
            continue;
        }

        if powers.incoming(x, y).contains_all(pieces::outgoing(piece)) {
            filtered.push(x, y);
        }
    }

    filtered
}

/// Flood along wire outgoing directions from a connector seed, looking for
/// an exit that leaves the board. Destinations absorb a wire end silently;
/// every other dangling end counts as an open connection.
pub fn junk_trace(board: &Board, x: i8, y: i8) -> Trace {
    let mut trace = Trace::seeded(x, y);

    let mut i = 0;
    while i < trace.cells.len() {
        let (cx, cy) = trace.cells[i];
        i += 1;

        let Some(piece) = board.get(cx, cy) else {
            continue;
        };
        let dir_from = pieces::outgoing(piece);

        for dir in NEIGHBOR_SCAN {
            if !dir_from.contains(dir) {
                continue;
            }

            let (dx, dy) = dir.offset();
            let (nx, ny) = (cx + dx, cy + dy);

            if trace.contains(nx, ny) {
                continue;
            }
            if board.is_out_of_bounds(nx, ny) {
                trace.junk = true;
                continue;
            }
            let Some(other) = board.get(nx, ny) else {
                continue;
            };

            if other == Piece::Destination {
                continue;
            }

            if !dir_from.intersect(pieces::incoming(other)).contains(dir) {
                if other == Piece::Empty {
                    trace.open_conns += 1;
                }
                continue;
            }

            trace.open_conns += 1;
            trace.push(nx, ny);
        }
    }

    trace
}

/// Flood from a fire seed through directionally compatible wires. Unlike the
/// power trace this is not gated on accumulated power: fire jumps to any
/// wire it can reach.
pub fn fire_trace(board: &Board, x: i8, y: i8) -> Trace {
    let mut trace = Trace::seeded(x, y);

    let mut i = 0;
    while i < trace.cells.len() {
        let (cx, cy) = trace.cells[i];
        i += 1;

        let Some(piece) = board.get(cx, cy) else {
            continue;
        };
        if piece != Piece::Fire && !pieces::is_connection_type(piece) {
            continue;
        }
        let dir_from = pieces::outgoing(piece);

        for dir in NEIGHBOR_SCAN {
            let (dx, dy) = dir.offset();
            let (nx, ny) = (cx + dx, cy + dy);

            if board.is_out_of_bounds(nx, ny) || trace.contains(nx, ny) {
                continue;
            }
            let Some(other) = board.get(nx, ny) else {
                continue;
            };

            if !pieces::is_connection_type(other) {
                continue;
            }

            if !dir_from.intersect(pieces::incoming(other)).contains(dir) {
                continue;
            }

            trace.push(nx, ny);
        }
    }

    trace
}

/// Find the trace to play back this cycle, if any.
///
/// First raster pass: a fire cell that reaches at least one wire triggers a
/// circuit overload immediately, before any destination is considered;
/// destination seeds meanwhile accumulate the power board. Second pass: the
/// first destination (scan order breaks ties) whose filtered trace closes a
/// circuit of more than one cell wins. A lone destination never completes.
pub fn find_power_trace(board: &Board, powers: &mut PowerBoard) -> Option<Trace> {
    for y in 0..BOARD_HEIGHT {
        for x in 0..BOARD_WIDTH {
            match board.get(x, y) {
                Some(Piece::Fire) => {
                    let trace = fire_trace(board, x, y);
                    if trace.len() > 1 {
                        return Some(trace);
                    }
                }
                Some(Piece::Destination) => {
                    power_trace(board, x, y, powers);
                }
                _ => {}
            }
        }
    }

    for y in 0..BOARD_HEIGHT {
        for x in 0..BOARD_WIDTH {
            if board.get(x, y) == Some(Piece::Destination) {
                let raw = power_trace(board, x, y, powers);
                let filtered = filter_powered(board, &raw, powers);
                if filtered.len() > 1 {
                    return Some(filtered);
                }
            }
        }
    }

    None
}

/// Find the first connector (raster order) whose junk trace reaches off the
/// board, if any.
pub fn find_junk_trace(board: &Board) -> Option<Trace> {
    for y in 0..BOARD_HEIGHT {
        for x in 0..BOARD_WIDTH {
            let Some(piece) = board.get(x, y) else {
                continue;
            };
            if !pieces::is_connection_type(piece) {
                continue;
            }
            let trace = junk_trace(board, x, y);
            if trace.is_junk_contaminated() {
                return Some(trace);
            }
        }
    }

    None
}
