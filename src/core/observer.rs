use super::state::{ProcState, SchedCtx};

/// Checks the engine's bookkeeping after every step. Only active in debug
/// builds.
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &SchedCtx) {
        self.step += 1;
        if !cfg!(debug_assertions) {
            return;
        }

        if let Some(key) = ctx.current {
            let task = ctx.process(key);
            debug_assert_eq!(
                task.state,
                ProcState::Running,
                "current process {} must be Running",
                task.pid
            );
            debug_assert_eq!(
                ctx.ready.front(),
                Some(key),
                "current process {} must sit at the queue head",
                task.pid
            );
        }

        let mut running = 0;
        for (key, task) in &ctx.procs {
            debug_assert!(
                task.cpu_time <= task.burst_time,
                "process {} ran past its burst",
                task.pid
            );

            match task.state {
                ProcState::Ready | ProcState::Running => debug_assert!(
                    ctx.ready.contains(key),
                    "process {} is {:?} but not queued",
                    task.pid,
                    task.state
                ),
                ProcState::Arriving | ProcState::Finished => debug_assert!(
                    !ctx.ready.contains(key),
                    "process {} is {:?} but still queued",
                    task.pid,
                    task.state
                ),
            }

            if task.state == ProcState::Finished {
                debug_assert!(
                    task.is_finished() && task.completion_time.is_some(),
                    "process {} marked Finished without completing",
                    task.pid
                );
            }
            if task.state == ProcState::Running {
                running += 1;
            }
        }
        debug_assert!(running <= 1, "{running} processes running on one CPU");
    }
}
