//! Scoring module - chained clear rewards
//!
//! Playback of a power trace pays out per cleared cell, and the payout
//! compounds three ways: the multiplier rises with every consecutive trace
//! found in one placement cycle, the wire chain counts cells cleared so far,
//! and the node chain counts destinations among them. All three reset when
//! the player regains control; only the score itself survives.

/// Running score plus the per-cycle chain accumulators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scoring {
    pub score: u32,
    pub node_chain: u32,
    pub wire_chain: u32,
    pub multiplier: u32,
}

/// Points for clearing one traced cell at the current chain state.
pub fn clear_award(multiplier: u32, node_chain: u32, wire_chain: u32) -> u32 {
    10u32
        .saturating_mul(multiplier)
        .saturating_mul(node_chain + 1)
        .saturating_mul(wire_chain + 1)
}

impl Scoring {
    /// Award one cleared cell, then advance the chains. The payout uses the
    /// chain values from before this cell, so the first cell of a cycle at
    /// multiplier 1 is always worth 10.
    pub fn award_clear(&mut self, cleared_destination: bool) {
        self.score = self
            .score
            .saturating_add(clear_award(self.multiplier, self.node_chain, self.wire_chain));
        self.wire_chain += 1;
        if cleared_destination {
            self.node_chain += 1;
        }
    }

    /// Reset the per-cycle chains, keeping the score.
    pub fn reset_chains(&mut self) {
        self.node_chain = 0;
        self.wire_chain = 0;
        self.multiplier = 0;
    }

    /// Full reset (loss condition).
    pub fn reset(&mut self) {
        *self = Scoring::default();
    }
}
