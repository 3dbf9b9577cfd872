use super::process::ProcessSpec;
use crate::{
    core::Ticks,
    quantum::{ConfigError, QuantumMode},
};

/// Clock cost of dispatching a different process than the one that just ran.
pub const DEFAULT_SWITCH_COST: Ticks = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    pub quantum: QuantumMode,
    pub switch_cost: Ticks,
}

impl SimConfig {
    pub fn new(quantum: QuantumMode) -> Self {
        Self {
            quantum,
            switch_cost: DEFAULT_SWITCH_COST,
        }
    }

    pub fn with_switch_cost(mut self, switch_cost: Ticks) -> Self {
        self.switch_cost = switch_cost;
        self
    }

    /// Reject traces whose clock could leave the `Ticks` range.
    pub fn check(&self, procs: &[ProcessSpec]) -> Result<(), ConfigError> {
        clock_horizon(procs, self.switch_cost)
            .map(|_| ())
            .ok_or(ConfigError::ClockOverflow)
    }
}

/// Upper bound on the clock for a run over `procs`, or `None` if it does not
/// fit in `Ticks`.
///
/// Idle jumps never pass the last arrival. After that the clock only moves
/// by run slices, at most the total burst, and by one switch per slice.
pub fn clock_horizon(procs: &[ProcessSpec], switch_cost: Ticks) -> Option<Ticks> {
    let work = procs
        .iter()
        .try_fold(0 as Ticks, |acc, spec| acc.checked_add(spec.burst_time))?;
    let switches = work.checked_mul(switch_cost)?;
    let last_arrival = procs.iter().map(|spec| spec.arrival_time).max().unwrap_or(0);

    last_arrival.checked_add(work)?.checked_add(switches)
}
