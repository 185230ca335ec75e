//! Per-tick input assembly with hold-to-repeat.
//!
//! Supports terminals that do not emit key release events by using a
//! timeout: a key counts as held only while press/repeat events keep
//! arriving for it.

use crate::types::{FrameInput, InputEvent};

/// Delay before a held key starts repeating (milliseconds).
pub const DEFAULT_DAS_MS: u32 = 150;

/// Interval between synthesized repeats of a held key (milliseconds).
pub const DEFAULT_ARR_MS: u32 = 50;

// In terminals without key-release events, a short timeout prevents a single
// tap from turning into a sustained "held" state.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Latches key events between ticks and synthesizes hold repeats, producing
/// one [`FrameInput`] per tick.
#[derive(Debug, Clone)]
pub struct InputHandler {
    latched: FrameInput,
    held: Option<InputEvent>,
    held_ms: u32,
    arr_accumulator_ms: u32,
    since_last_event_ms: u32,
    das_delay: u32,
    arr_rate: u32,
    key_release_timeout_ms: u32,
}

fn apply(event: InputEvent, frame: &mut FrameInput) {
    match event {
        InputEvent::MoveDown => frame.down = true,
        InputEvent::MoveLeft => frame.left = true,
        InputEvent::MoveRight => frame.right = true,
        InputEvent::Rotate => frame.rotate = true,
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            latched: FrameInput::NONE,
            held: None,
            held_ms: 0,
            arr_accumulator_ms: 0,
            since_last_event_ms: 0,
            das_delay,
            arr_rate,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    /// Feed a press or terminal-repeat event.
    pub fn handle_key_press(&mut self, event: InputEvent) {
        apply(event, &mut self.latched);
        self.since_last_event_ms = 0;
        if self.held != Some(event) {
            self.held = Some(event);
            self.held_ms = 0;
            self.arr_accumulator_ms = 0;
        }
    }

    /// Feed a release event (terminals that emit them).
    pub fn handle_key_release(&mut self, event: InputEvent) {
        if self.held == Some(event) {
            self.held = None;
        }
    }

    /// Produce this tick's input frame: everything latched since the last
    /// tick, plus a synthesized repeat of the held key once the DAS delay
    /// has passed.
    pub fn frame(&mut self, elapsed_ms: u32) -> FrameInput {
        let mut out = self.latched;
        self.latched = FrameInput::NONE;

        if let Some(event) = self.held {
            self.since_last_event_ms += elapsed_ms;
            if self.since_last_event_ms > self.key_release_timeout_ms {
                // No event in too long: treat the key as released.
                self.held = None;
                return out;
            }

            self.held_ms += elapsed_ms;
            if self.held_ms >= self.das_delay {
                self.arr_accumulator_ms += elapsed_ms;
                if self.arr_accumulator_ms >= self.arr_rate {
                    self.arr_accumulator_ms = 0;
                    apply(event, &mut out);
                }
            }
        }

        out
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
