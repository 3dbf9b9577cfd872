pub mod fixed;
pub mod median;

use std::{fmt, num::NonZeroU64};

use crate::core::{SchedCtx, Ticks};
pub use fixed::FixedQuantum;
pub use median::{MedianQuantum, median_quantum};

/// Smallest quantum ever handed to the engine.
pub const MIN_QUANTUM: Ticks = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroQuantum,
    /// Arrival and burst times large enough to run the clock past `u64`.
    ClockOverflow,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroQuantum => write!(f, "zero quantum length"),
            Self::ClockOverflow => write!(f, "process times overflow the simulation clock"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Decides how long the queue head may run once dispatched.
pub trait QuantumPolicy {
    /// Called once per dispatch, with the candidate still at the head of
    /// `ctx.ready`. Must return a value of at least [`MIN_QUANTUM`].
    fn quantum(&mut self, ctx: &SchedCtx) -> Ticks;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantumMode {
    Fixed(NonZeroU64),
    /// Rounded median of the cpu time consumed by the queued processes.
    Median,
}

impl QuantumMode {
    pub fn fixed(quantum: Ticks) -> Result<Self, ConfigError> {
        NonZeroU64::new(quantum)
            .map(Self::Fixed)
            .ok_or(ConfigError::ZeroQuantum)
    }
}

impl fmt::Display for QuantumMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(quantum) => write!(f, "fixed quantum {quantum}"),
            Self::Median => write!(f, "median quantum"),
        }
    }
}

/// Runtime-selected policy, for callers that pick the mode from a config.
#[derive(Debug)]
pub enum AnyQuantum {
    Fixed(FixedQuantum),
    Median(MedianQuantum),
}

impl From<QuantumMode> for AnyQuantum {
    fn from(mode: QuantumMode) -> Self {
        match mode {
            QuantumMode::Fixed(quantum) => Self::Fixed(FixedQuantum::new(quantum)),
            QuantumMode::Median => Self::Median(MedianQuantum::new()),
        }
    }
}

impl QuantumPolicy for AnyQuantum {
    fn quantum(&mut self, ctx: &SchedCtx) -> Ticks {
        match self {
            Self::Fixed(policy) => policy.quantum(ctx),
            Self::Median(policy) => policy.quantum(ctx),
        }
    }
}
