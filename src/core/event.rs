use crate::core::{Pid, Ticks};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    Arrived {
        pid: Pid,
    },
    // Previous process still had work left and went back to the tail
    Requeued {
        pid: Pid,
    },
    Completed {
        pid: Pid,
        wait_time: Ticks,
    },
    ContextSwitch {
        from: Pid,
        to: Pid,
        cost: Ticks,
    },
    FirstDispatch {
        pid: Pid,
        response_time: Ticks,
    },
    Ran {
        pid: Pid,
        quantum: Ticks,
        run_length: Ticks,
    },
    // Queue drained before the next arrival
    IdleJump {
        to: Ticks,
    },
}

/// Event tagged with the clock value at which it happened.
pub type TimedEvent = (Ticks, SimEvent);
