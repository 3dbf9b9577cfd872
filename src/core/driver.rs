use log::{debug, trace};

use super::{
    event::{SimEvent, TimedEvent},
    observer::Observer,
    state::{ProcKey, SchedCtx, Ticks},
};
use crate::quantum::QuantumPolicy;

pub struct SchedCore<Q: QuantumPolicy> {
    pub ctx: SchedCtx,
    pub policy: Q,
    switch_cost: Ticks,
    total_wait_time: Ticks,
    total_response_time: Ticks,
    observer: Observer,
}

impl<Q: QuantumPolicy> SchedCore<Q> {
    pub fn new(capacity: usize, policy: Q, switch_cost: Ticks) -> Self {
        Self {
            ctx: SchedCtx::new(capacity),
            policy,
            switch_cost,
            total_wait_time: 0,
            total_response_time: 0,
            observer: Observer::new(),
        }
    }

    // Retire or rotate the previous process, then dispatch the queue head.
    // Returns false if the queue was empty and nothing ran.
    pub fn tick(&mut self, events: &mut Vec<TimedEvent>) -> bool {
        let previous = self.retire_previous(events);

        let Some(next) = self.ctx.ready.front() else {
            return false;
        };

        if let Some(prev) = previous {
            if prev != next {
                let from = self.ctx.process(prev).pid;
                let to = self.ctx.process(next).pid;
                events.push((
                    self.ctx.now,
                    SimEvent::ContextSwitch {
                        from,
                        to,
                        cost: self.switch_cost,
                    },
                ));
                self.ctx.advance_time(self.switch_cost);
            }
        }

        self.dispatch(next, events);
        true
    }

    fn retire_previous(&mut self, events: &mut Vec<TimedEvent>) -> Option<ProcKey> {
        let key = self.ctx.current.take()?;
        let removed = self.ctx.ready.remove(key);
        debug_assert!(removed, "Previous process missing from the ready queue");

        let now = self.ctx.now;
        let pid = self.ctx.process(key).pid;
        if self.ctx.process(key).is_finished() {
            self.ctx.mark_completed(key, now);
            let task = self.ctx.process(key);
            let wait_time = now - task.arrival_time - task.burst_time;
            self.total_wait_time += wait_time;

            debug!("t={now} pid {pid} completed, waited {wait_time}");
            events.push((now, SimEvent::Completed { pid, wait_time }));
        } else {
            self.ctx.requeue(key);
            events.push((now, SimEvent::Requeued { pid }));
        }

        Some(key)
    }

    fn dispatch(&mut self, key: ProcKey, events: &mut Vec<TimedEvent>) {
        let now = self.ctx.now;
        self.ctx.set_running(key);

        let task = self.ctx.process_mut(key);
        let pid = task.pid;
        if task.first_dispatch.is_none() {
            task.first_dispatch = Some(now);
            let response_time = now - task.arrival_time;
            self.total_response_time += response_time;
            events.push((now, SimEvent::FirstDispatch { pid, response_time }));
        }

        // The candidate is still queued, so it counts towards an adaptive
        // quantum.
        let quantum = self.policy.quantum(&self.ctx);
        debug_assert!(quantum > 0, "Quantum policy returned zero");

        let task = self.ctx.process_mut(key);
        let run_length = quantum.min(task.remaining());
        task.cpu_time += run_length;
        self.ctx.advance_time(run_length);

        trace!("t={now} pid {pid} runs {run_length} (quantum {quantum})");
        events.push((
            now,
            SimEvent::Ran {
                pid,
                quantum,
                run_length,
            },
        ));
    }

    pub fn observe(&mut self) {
        self.observer.observe(&self.ctx);
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn total_wait_time(&self) -> Ticks {
        self.total_wait_time
    }

    pub fn total_response_time(&self) -> Ticks {
        self.total_response_time
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }
}
