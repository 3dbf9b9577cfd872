use slotmap::{SlotMap, new_key_type};

use super::queue::ReadyQueue;

pub type Ticks = u64;
pub type Pid = u64;

// Slot in the process arena; stable for the lifetime of a simulation.
new_key_type! {
    pub struct ProcKey;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcState {
    /// Not yet admitted to the ready queue.
    Arriving,
    Ready,
    Running,
    Finished,
}

#[derive(Debug, Clone)]
pub struct Process {
    pub pid: Pid,
    pub state: ProcState,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub cpu_time: Ticks,
    pub first_dispatch: Option<Ticks>,
    pub completion_time: Option<Ticks>,
}

impl Process {
    pub fn remaining(&self) -> Ticks {
        self.burst_time - self.cpu_time
    }

    pub fn is_finished(&self) -> bool {
        self.cpu_time == self.burst_time
    }

    /// Time spent ready but not running. Known once the process completes.
    pub fn wait_time(&self) -> Option<Ticks> {
        self.completion_time
            .map(|done| done - self.arrival_time - self.burst_time)
    }

    /// Delay between arrival and first dispatch.
    pub fn response_time(&self) -> Option<Ticks> {
        self.first_dispatch.map(|start| start - self.arrival_time)
    }
}

/// Everything the engine mutates while a simulation runs: the clock, the
/// process arena, the ready queue and the process that ran last.
#[derive(Debug)]
pub struct SchedCtx {
    pub now: Ticks,
    pub procs: SlotMap<ProcKey, Process>,
    pub ready: ReadyQueue,

    // Process dispatched by the previous iteration. It stays at the head of
    // the ready queue until it is retired or rotated.
    pub current: Option<ProcKey>,
}

impl SchedCtx {
    pub fn new(capacity: usize) -> Self {
        Self {
            now: 0,
            procs: SlotMap::with_capacity_and_key(capacity),
            ready: ReadyQueue::with_capacity(capacity),
            current: None,
        }
    }

    pub fn create_process(&mut self, pid: Pid, arrival_time: Ticks, burst_time: Ticks) -> ProcKey {
        debug_assert!(burst_time > 0, "Process {pid} has zero burst time");

        self.procs.insert(Process {
            pid,
            state: ProcState::Arriving,
            arrival_time,
            burst_time,
            cpu_time: 0,
            first_dispatch: None,
            completion_time: None,
        })
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self
            .now
            .checked_add(delta)
            .expect("Simulation clock overflowed its checked horizon");
    }

    pub fn jump_to(&mut self, time: Ticks) {
        debug_assert!(time >= self.now, "Clock cannot move backwards");
        self.now = time;
    }

    pub fn process(&self, key: ProcKey) -> &Process {
        &self.procs[key]
    }

    pub fn process_mut(&mut self, key: ProcKey) -> &mut Process {
        &mut self.procs[key]
    }

    pub fn admit(&mut self, key: ProcKey) {
        let task = self.process_mut(key);
        debug_assert_eq!(
            task.state,
            ProcState::Arriving,
            "Process {} admitted twice",
            task.pid
        );
        task.state = ProcState::Ready;
        self.ready.push_back(key);
    }

    pub fn requeue(&mut self, key: ProcKey) {
        let task = self.process_mut(key);
        debug_assert!(
            !task.is_finished(),
            "Finished process {} cannot be requeued",
            task.pid
        );
        task.state = ProcState::Ready;
        self.ready.push_back(key);
    }

    pub fn set_running(&mut self, key: ProcKey) {
        debug_assert_eq!(
            self.ready.front(),
            Some(key),
            "Only the queue head can be dispatched"
        );
        debug_assert!(self.current.is_none(), "A process is already running");

        self.current = Some(key);
        self.process_mut(key).state = ProcState::Running;
    }

    pub fn mark_completed(&mut self, key: ProcKey, completion_time: Ticks) {
        debug_assert!(
            !self.ready.contains(key),
            "Completing process {} that is still enqueued",
            self.procs[key].pid
        );

        let task = self.process_mut(key);
        debug_assert!(task.is_finished(), "Process {} has work left", task.pid);
        task.state = ProcState::Finished;
        task.completion_time = Some(completion_time);
    }
}
