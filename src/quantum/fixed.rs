use std::num::NonZeroU64;

use super::{QuantumPolicy, SchedCtx, Ticks};

#[derive(Debug, Clone, Copy)]
pub struct FixedQuantum {
    quantum: NonZeroU64,
}

impl FixedQuantum {
    pub fn new(quantum: NonZeroU64) -> Self {
        Self { quantum }
    }
}

impl QuantumPolicy for FixedQuantum {
    fn quantum(&mut self, _ctx: &SchedCtx) -> Ticks {
        self.quantum.get()
    }
}
