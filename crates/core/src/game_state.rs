//! Gameplay sequencer - the per-tick state machine
//!
//! One [`Gameplay`] value is one session: board, power grid, falling brick,
//! brick factory, scoring, and an explicit phase. `update` advances the
//! session by exactly one tick and does at most one piece of meaningful
//! work, in strict priority order:
//!
//! 1. an in-progress power playback clears its next cell on timer expiry;
//! 2. otherwise discovery runs: the power grid is rebuilt and the board is
//!    scanned for a circuit (fire overloads first, then destinations) and,
//!    failing that, for a contaminated wire run;
//! 3. an in-progress junk playback stamps its next cell on timer expiry;
//! 4. with nothing to play back, the player gets control: one input, the
//!    gravity drop, placement, and a settle pass.
//!
//! The session is created explicitly from a seed and owned by the caller's
//! frame loop; a losing overflow resets it in place rather than erroring.

use nettis_types::{
    FrameInput, Piece, BOARD_HEIGHT, BOARD_WIDTH, GRAVITY_INTERVAL, JUNK_STEP_INTERVAL,
    POWER_STEP_INTERVAL,
};

use crate::board::Board;
use crate::brick::Brick;
use crate::rng::BrickFactory;
use crate::scoring::Scoring;
use crate::snapshot::{BrickSnapshot, Snapshot};
use crate::timer::Timer;
use crate::trace::{find_junk_trace, find_power_trace, PowerBoard, Trace};

/// What the session is doing across ticks.
#[derive(Debug, Clone, PartialEq)]
enum Phase {
    /// The player controls the falling brick.
    Falling,
    /// A solved circuit is being cleared, one cell per timer expiry.
    PowerPlayback {
        trace: Trace,
        index: usize,
        timer: Timer,
    },
    /// A contaminated wire run is rotting to junk, one cell per expiry.
    JunkPlayback {
        trace: Trace,
        index: usize,
        timer: Timer,
    },
}

/// A complete gameplay session.
#[derive(Debug, Clone)]
pub struct Gameplay {
    board: Board,
    powers: PowerBoard,
    brick: Brick,
    factory: BrickFactory,
    scoring: Scoring,
    phase: Phase,
    gravity_timer: Timer,
}

impl Gameplay {
    /// Create a new session with the given RNG seed.
    pub fn new(seed: u32) -> Self {
        Self::with_board(seed, Board::new())
    }

    /// Create a session over a prepared board. This is the scenario
    /// constructor: tests and tools lay out pieces with [`Board::set`] and
    /// hand the board over; afterwards the board is owned and mutated by
    /// the session alone.
    pub fn with_board(seed: u32, board: Board) -> Self {
        let mut factory = BrickFactory::new(seed);
        let brick = factory.next_brick().bumped_into_bounds();

        Self {
            board,
            powers: PowerBoard::new(),
            brick,
            factory,
            scoring: Scoring::default(),
            phase: Phase::Falling,
            gravity_timer: Timer::default(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn powers(&self) -> &PowerBoard {
        &self.powers
    }

    pub fn brick(&self) -> Brick {
        self.brick
    }

    pub fn scoring(&self) -> Scoring {
        self.scoring
    }

    pub fn score(&self) -> u32 {
        self.scoring.score
    }

    #[cfg(test)]
    fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Advance the session by one tick. `input` is this tick's sampled
    /// events; `now` is the monotonic clock in seconds.
    pub fn update(&mut self, input: FrameInput, now: f64) {
        // Playback phases own the tick while cells remain.
        match &mut self.phase {
            Phase::PowerPlayback {
                trace,
                index,
                timer,
            } if *index < trace.len() => {
                if timer.is_expired(now) {
                    let (x, y) = trace.cells()[*index];
                    let cleared_destination = self.board.get(x, y) == Some(Piece::Destination);
                    self.board.set(x, y, Piece::Empty);
                    self.scoring.award_clear(cleared_destination);
                    self.board.clean_surroundings(x, y);
                    *timer = Timer::starting_at(now, POWER_STEP_INTERVAL);
                    *index += 1;
                }
                return;
            }
            Phase::JunkPlayback {
                trace,
                index,
                timer,
            } if *index < trace.len() => {
                if timer.is_expired(now) {
                    let (x, y) = trace.cells()[*index];
                    self.board.set(x, y, Piece::Junk);
                    *timer = Timer::starting_at(now, JUNK_STEP_INTERVAL);
                    *index += 1;
                }
                return;
            }
            _ => {}
        }

        // Discovery: rebuild the power grid and look for the next playback.
        // Every recompute bumps the multiplier, so traces chained within one
        // placement cycle pay out progressively more.
        self.powers.clear();
        self.scoring.multiplier += 1;
        if let Some(trace) = find_power_trace(&self.board, &mut self.powers) {
            self.phase = Phase::PowerPlayback {
                trace,
                index: 0,
                timer: Timer::starting_at(now, 0.0),
            };
            return;
        }

        self.scoring.multiplier += 1;
        if let Some(trace) = find_junk_trace(&self.board) {
            self.phase = Phase::JunkPlayback {
                trace,
                index: 0,
                timer: Timer::starting_at(now, 0.0),
            };
            return;
        }

        // Nothing to play back: the player has control this tick.
        self.phase = Phase::Falling;
        self.scoring.reset_chains();
        self.step_falling(input, now);
    }

    /// The idle/input part of a tick: one input, the gravity drop,
    /// placement, and a settle pass.
    fn step_falling(&mut self, input: FrameInput, now: f64) {
        let mut dx: i8 = 0;
        let mut dy: i8 = 0;

        // At most one directional input per tick, first pressed wins.
        if input.down {
            dy = 1;
        } else if input.left {
            dx = -1;
        } else if input.right {
            dx = 1;
        } else if input.rotate {
            let rotated = self.brick.rotated();
            // A rotation into occupied cells is rejected wholesale.
            if !self.board.should_place(&rotated) {
                self.brick = rotated;
            }
        }

        // The forced drop stacks on top of whatever the input chose.
        if self.gravity_timer.is_expired(now) {
            self.gravity_timer = Timer::starting_at(now, GRAVITY_INTERVAL);
            dy += 1;
        }

        if dx != 0 || dy != 0 {
            let moved = self.brick.moved(dx, dy);
            if self.board.should_place(&moved) {
                // Blocked horizontally: ignore. Blocked downward: this is
                // where the brick lands.
                if dy != 0 {
                    self.lock_and_respawn();
                }
            } else {
                self.brick = moved;
            }
        }

        self.board.settle();
    }

    /// Lock the current brick, spawn the next one, and handle overflow:
    /// a spawn into occupied cells wipes the board and the score.
    fn lock_and_respawn(&mut self) {
        self.board.put_brick(&self.brick);
        self.brick = self.factory.next_brick().bumped_into_bounds();
        if self.board.should_place(&self.brick) {
            self.scoring.reset();
            self.board.clear();
        }
    }

    /// Fill a render snapshot in place (allocation-free hot path).
    pub fn snapshot_into(&self, out: &mut Snapshot) {
        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                let (xi, yi) = (x as usize, y as usize);
                out.board[yi][xi] = self.board.get(x, y).unwrap_or(Piece::Empty);
                out.powers[yi][xi] = self.powers.incoming(x, y);
            }
        }
        out.brick = BrickSnapshot::from(self.brick);
        out.score = self.scoring.score;
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::default();
        self.snapshot_into(&mut snapshot);
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drive one update with no input.
    fn tick(game: &mut Gameplay, now: f64) {
        game.update(FrameInput::NONE, now);
    }

    fn input_down() -> FrameInput {
        FrameInput {
            down: true,
            ..FrameInput::NONE
        }
    }

    #[test]
    fn test_new_session_is_falling_and_unscored() {
        let game = Gameplay::new(12345);
        assert_eq!(game.phase, Phase::Falling);
        assert_eq!(game.score(), 0);
        assert!(game.board().cells().iter().all(|&p| p == Piece::Empty));
    }

    #[test]
    fn test_circuit_playback_scores_110() {
        // Destination - wire - destination on the floor; multiplier 1.
        let mut board = Board::new();
        board.set(1, 12, Piece::Destination);
        board.set(2, 12, Piece::HorizConn);
        board.set(3, 12, Piece::Destination);

        let mut game = Gameplay::with_board(1, board);

        // Discovery tick: the circuit is found, nothing cleared yet.
        tick(&mut game, 0.1);
        assert!(matches!(game.phase, Phase::PowerPlayback { .. }));
        assert_eq!(game.score(), 0);
        assert_eq!(game.scoring().multiplier, 1);

        // Three playback steps: 10, then 40, then 60.
        tick(&mut game, 0.3);
        assert_eq!(game.score(), 10);
        assert_eq!(game.board().get(1, 12), Some(Piece::Empty));

        tick(&mut game, 0.5);
        assert_eq!(game.score(), 50);

        tick(&mut game, 0.7);
        assert_eq!(game.score(), 110);
        assert_eq!(game.board().get(3, 12), Some(Piece::Empty));
    }

    #[test]
    fn test_playback_waits_for_timer() {
        let mut board = Board::new();
        board.set(1, 12, Piece::Destination);
        board.set(2, 12, Piece::HorizConn);
        board.set(3, 12, Piece::Destination);

        let mut game = Gameplay::with_board(1, board);
        tick(&mut game, 0.1);
        tick(&mut game, 0.3);
        assert_eq!(game.score(), 10);

        // 0.15 s have not passed; the next cell must not clear yet.
        tick(&mut game, 0.35);
        assert_eq!(game.score(), 10);

        tick(&mut game, 0.5);
        assert_eq!(game.score(), 50);
    }

    #[test]
    fn test_playback_sweeps_neighboring_junk() {
        let mut board = Board::new();
        board.set(1, 12, Piece::Destination);
        board.set(2, 12, Piece::HorizConn);
        board.set(3, 12, Piece::Destination);
        board.set(2, 11, Piece::Junk);

        let mut game = Gameplay::with_board(1, board);
        tick(&mut game, 0.1);
        tick(&mut game, 0.3); // clears (1,12); (2,11) is in its 8-neighborhood
        assert_eq!(game.board().get(2, 11), Some(Piece::Empty));
    }

    #[test]
    fn test_chained_circuits_raise_the_multiplier() {
        // Two disjoint circuits: the second is discovered after the first
        // finishes, at a higher multiplier.
        let mut board = Board::new();
        board.set(1, 11, Piece::Destination);
        board.set(2, 11, Piece::HorizConn);
        board.set(3, 11, Piece::Destination);
        board.set(0, 12, Piece::Destination);
        board.set(1, 12, Piece::HorizConn);
        board.set(2, 12, Piece::Destination);

        let mut game = Gameplay::with_board(1, board);

        tick(&mut game, 0.1); // discover the upper circuit at multiplier 1
        assert_eq!(game.scoring().multiplier, 1);

        tick(&mut game, 0.3); // clear its three cells
        tick(&mut game, 0.5);
        tick(&mut game, 0.7);
        assert_eq!(game.score(), 110);

        // The exhaustion tick re-discovers: lower circuit at multiplier 2.
        tick(&mut game, 0.9);
        assert!(matches!(game.phase, Phase::PowerPlayback { .. }));
        assert_eq!(game.scoring().multiplier, 2);
    }

    #[test]
    fn test_junk_playback_stamps_cells() {
        // A wire pointing off the left edge rots to junk.
        let mut board = Board::new();
        board.set(0, 12, Piece::HorizConn);

        let mut game = Gameplay::with_board(1, board);
        tick(&mut game, 0.1);
        assert!(matches!(game.phase, Phase::JunkPlayback { .. }));

        tick(&mut game, 0.3);
        assert_eq!(game.board().get(0, 12), Some(Piece::Junk));
    }

    #[test]
    fn test_rotation_rejected_when_blocked() {
        let mut game = Gameplay::new(9); // first brick: HorizConn pair, orientation Right
        let before = game.brick();

        // Box the brick in completely so any rotation target is occupied.
        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                game.board_mut().set(x, y, Piece::Junk);
            }
        }
        let [(x0, y0), (x1, y1)] = before.locations();
        game.board_mut().set(x0, y0, Piece::Empty);
        game.board_mut().set(x1, y1, Piece::Empty);

        // now == 0.0 keeps the gravity timer quiet, isolating the rotation.
        game.update(
            FrameInput {
                rotate: true,
                ..FrameInput::NONE
            },
            0.0,
        );

        assert_eq!(game.brick(), before);
    }

    #[test]
    fn test_blocked_horizontal_move_is_ignored() {
        let mut board = Board::new();
        for y in 0..BOARD_HEIGHT {
            board.set(0, y, Piece::Junk);
        }
        let mut game = Gameplay::with_board(1, board);

        // Walk the brick against the left wall; it must stop, not lock.
        let mut now = 0.0;
        for _ in 0..20 {
            now += 0.01; // fast ticks so gravity rarely fires
            game.update(
                FrameInput {
                    left: true,
                    ..FrameInput::NONE
                },
                now,
            );
        }
        let [(x0, _), (x1, _)] = game.brick().locations();
        assert!(x0 >= 1 && x1 >= 1);
    }

    #[test]
    fn test_forced_drop_locks_and_respawns() {
        let mut game = Gameplay::new(3);
        let mut now = 0.0;

        // Hold Down until the first brick locks (board gains pieces).
        for _ in 0..200 {
            now += 0.1;
            game.update(input_down(), now);
            if game.board().cells().iter().any(|&p| p != Piece::Empty) {
                break;
            }
        }
        assert!(game.board().cells().iter().any(|&p| p != Piece::Empty));
    }

    #[test]
    fn test_overflow_wipes_board_and_score() {
        // Fill everything except the brick's own cells, so the lock's
        // respawn lands on occupied cells.
        let mut game = Gameplay::new(5);
        game.scoring.score = 420;

        let locations = game.brick().locations();
        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                if !locations.contains(&(x, y)) {
                    game.board_mut().set(x, y, Piece::Junk);
                }
            }
        }

        game.update(input_down(), 0.1);

        assert_eq!(game.score(), 0);
        assert!(game.board().cells().iter().all(|&p| p == Piece::Empty));
    }

    #[test]
    fn test_idle_tick_resets_chains_but_not_score() {
        let mut game = Gameplay::new(1);
        game.scoring.score = 99;
        game.scoring.node_chain = 2;
        game.scoring.wire_chain = 5;

        tick(&mut game, 0.01);

        assert_eq!(game.score(), 99);
        assert_eq!(game.scoring().node_chain, 0);
        assert_eq!(game.scoring().wire_chain, 0);
        assert_eq!(game.scoring().multiplier, 0);
    }

    #[test]
    fn test_snapshot_mirrors_session() {
        let mut board = Board::new();
        board.set(4, 12, Piece::Fire);
        let mut game = Gameplay::with_board(9, board);
        game.scoring.score = 30;

        let snapshot = game.snapshot();
        assert_eq!(snapshot.board[12][4], Piece::Fire);
        assert_eq!(snapshot.score, 30);
        assert_eq!(snapshot.brick.pieces, game.brick().pieces);
    }

    #[test]
    fn test_powers_persist_during_playback() {
        let mut board = Board::new();
        board.set(1, 12, Piece::Destination);
        board.set(2, 12, Piece::HorizConn);
        board.set(3, 12, Piece::Destination);

        let mut game = Gameplay::with_board(1, board);
        tick(&mut game, 0.1);
        assert!(game.powers().is_powered(2, 12));

        // Mid-playback the highlight is still there.
        tick(&mut game, 0.3);
        assert!(game.powers().is_powered(2, 12));
    }
}
