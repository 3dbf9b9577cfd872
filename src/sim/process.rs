use crate::core::{Pid, Ticks};

/// One row of the process table, as handed over by a loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessSpec {
    pub pid: Pid,
    pub arrival_time: Ticks,
    // Never zero; loaders reject such rows.
    pub burst_time: Ticks,
}

impl ProcessSpec {
    pub fn new(pid: Pid, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            pid,
            arrival_time,
            burst_time,
        }
    }
}
