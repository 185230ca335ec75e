//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the whole Nettis simulation: board state, the
//! falling brick, the trace engine, and the per-tick sequencer. It has
//! **zero dependencies** on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: same seed and same clock values produce identical
//!   sessions
//! - **Testable**: every rule has unit coverage, and whole playback
//!   sequences can be driven with a synthetic clock
//! - **Portable**: runs in any environment (terminal, headless)
//! - **Fast**: zero-allocation tracing over a fixed bitset
//!
//! # Module Structure
//!
//! - [`board`]: the 6x13 well with gravity and junk sweeping
//! - [`brick`]: the two-cell falling unit
//! - [`pieces`]: connector direction tables, rotation, classification
//! - [`rng`]: weighted random brick generation
//! - [`trace`]: power / junk / fire flood tracing and discovery scans
//! - [`timer`]: wall-clock pacing timers
//! - [`scoring`]: chained clear rewards
//! - [`game_state`]: the per-tick phase machine tying it all together
//! - [`snapshot`]: the render-facing view
//!
//! # Game Rules
//!
//! Bricks of two pieces fall into the well. Power flows from destination
//! nodes through directionally compatible wires; a closed circuit clears
//! cell by cell with compounding score. A wire run that points off the
//! board edge rots into junk cell by cell instead. A fire piece that
//! touches a wire overloads the whole connected run. Overflowing the well
//! wipes the board and the score and play continues.
//!
//! # Example
//!
//! ```
//! use nettis_core::Gameplay;
//! use nettis_types::FrameInput;
//!
//! let mut game = Gameplay::new(12345);
//!
//! // One tick: no input, 16ms into the session.
//! game.update(FrameInput::NONE, 0.016);
//!
//! let snapshot = game.snapshot();
//! assert_eq!(snapshot.score, 0);
//! ```

pub mod board;
pub mod brick;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod timer;
pub mod trace;

pub use nettis_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use brick::Brick;
pub use game_state::Gameplay;
pub use rng::{BrickFactory, SimpleRng};
pub use scoring::Scoring;
pub use snapshot::{BrickSnapshot, Snapshot};
pub use timer::Timer;
pub use trace::{
    filter_powered, find_junk_trace, find_power_trace, fire_trace, junk_trace, power_trace,
    PowerBoard, Trace,
};
