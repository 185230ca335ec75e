//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It renders the core [`Snapshot`](nettis_core::Snapshot) into a simple
//! framebuffer that is flushed to a terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Draw the well, the powered-wire highlight, the falling brick, and the
//!   score/legend sidebar
//! - Keep the drawing API small (full redraws of a 6x13 well are cheap)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use nettis_core as core;
pub use nettis_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_full_into, TerminalRenderer};
