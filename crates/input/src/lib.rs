//! Terminal input module (core-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`nettis_types::InputEvent`] and assembles
//! per-tick [`nettis_types::FrameInput`] frames, with hold-to-repeat
//! handling for terminals that never emit key-release events.

pub mod handler;
pub mod map;

pub use nettis_types as types;

pub use handler::InputHandler;
pub use map::{map_key_event, should_quit};
