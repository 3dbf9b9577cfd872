use log::debug;
use rustc_hash::FxHashMap;

use super::{
    config::{SimConfig, clock_horizon},
    process::ProcessSpec,
    stats::{Report, Summary},
};
use crate::{
    core::{
        driver::SchedCore,
        event::{SimEvent, TimedEvent},
        state::{Pid, ProcKey, Process, Ticks},
    },
    quantum::{AnyQuantum, ConfigError, QuantumPolicy},
};

pub struct Sim<Q: QuantumPolicy> {
    pub core: SchedCore<Q>,
    // Arena keys in admission order
    arrivals: Vec<ProcKey>,
    arrival_cursor: usize,
    pids: FxHashMap<Pid, ProcKey>,
}

impl<Q: QuantumPolicy> Sim<Q> {
    /// `procs` must fit the clock range, see [`SimConfig::check`].
    pub fn new(mut procs: Vec<ProcessSpec>, policy: Q, switch_cost: Ticks) -> Self {
        debug_assert!(
            clock_horizon(&procs, switch_cost).is_some(),
            "Process times overflow the simulation clock"
        );

        // Stable, so equal arrival times keep their input order.
        procs.sort_by_key(|spec| spec.arrival_time);

        let mut core = SchedCore::new(procs.len(), policy, switch_cost);
        let mut pids = FxHashMap::default();
        let arrivals = procs
            .iter()
            .map(|spec| {
                let key = core
                    .ctx
                    .create_process(spec.pid, spec.arrival_time, spec.burst_time);
                let previous = pids.insert(spec.pid, key);
                debug_assert!(previous.is_none(), "Duplicate pid {}", spec.pid);
                key
            })
            .collect();

        Self {
            core,
            arrivals,
            arrival_cursor: 0,
            pids,
        }
    }

    /// Run one iteration of the scheduling loop and return what happened.
    pub fn step(&mut self) -> Vec<TimedEvent> {
        let mut events = Vec::new();
        self.handle_arrivals(&mut events);

        if !self.core.tick(&mut events) {
            if let Some(&next) = self.arrivals.get(self.arrival_cursor) {
                let to = self.core.ctx.process(next).arrival_time;
                debug!("t={} idle until {to}", self.core.now());
                events.push((self.core.now(), SimEvent::IdleJump { to }));
                self.core.ctx.jump_to(to);
            }
        }

        self.core.observe();
        events
    }

    fn handle_arrivals(&mut self, events: &mut Vec<TimedEvent>) {
        let now = self.core.now();
        while let Some(&key) = self.arrivals.get(self.arrival_cursor) {
            let task = self.core.ctx.process(key);
            if task.arrival_time > now {
                break;
            }

            events.push((now, SimEvent::Arrived { pid: task.pid }));
            self.core.ctx.admit(key);
            self.arrival_cursor += 1;
        }
    }

    /// Step until every process has arrived and finished.
    pub fn run(&mut self) -> Report {
        while !self.is_done() {
            self.step();
        }
        self.report()
    }

    pub fn is_done(&self) -> bool {
        self.arrival_cursor == self.arrivals.len()
            && self.core.ctx.ready.is_empty()
            && self.core.ctx.current.is_none()
    }

    pub fn report(&self) -> Report {
        Report {
            total_wait_time: self.core.total_wait_time(),
            total_response_time: self.core.total_response_time(),
            process_count: self.arrivals.len(),
        }
    }

    pub fn summary(&self) -> Summary {
        Summary::from_processes(self.processes())
    }

    pub fn now(&self) -> Ticks {
        self.core.now()
    }

    pub fn process(&self, pid: Pid) -> Option<&Process> {
        self.pids.get(&pid).map(|&key| self.core.ctx.process(key))
    }

    /// Processes in admission order.
    pub fn processes(&self) -> impl Iterator<Item = &Process> {
        self.arrivals.iter().map(|&key| self.core.ctx.process(key))
    }
}

impl Sim<AnyQuantum> {
    pub fn from_config(procs: Vec<ProcessSpec>, config: &SimConfig) -> Result<Self, ConfigError> {
        config.check(&procs)?;
        Ok(Self::new(procs, config.quantum.into(), config.switch_cost))
    }
}

/// Simulate `procs` to completion under `config`.
pub fn simulate(procs: Vec<ProcessSpec>, config: &SimConfig) -> Result<Report, ConfigError> {
    Ok(Sim::from_config(procs, config)?.run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantum::QuantumMode;

    fn fixed(quantum: Ticks) -> SimConfig {
        SimConfig::new(QuantumMode::fixed(quantum).unwrap())
    }

    #[test]
    fn ties_keep_input_order() {
        let procs = vec![
            ProcessSpec::new(7, 3, 1),
            ProcessSpec::new(4, 0, 1),
            ProcessSpec::new(9, 3, 1),
            ProcessSpec::new(1, 0, 1),
        ];
        let sim = Sim::from_config(procs, &fixed(1)).unwrap();
        let order: Vec<Pid> = sim.processes().map(|p| p.pid).collect();
        assert_eq!(order, vec![4, 1, 7, 9]);
    }

    #[test]
    fn lookup_by_pid() {
        let mut sim = Sim::from_config(vec![ProcessSpec::new(42, 2, 3)], &fixed(5)).unwrap();
        sim.run();

        let task = sim.process(42).unwrap();
        assert_eq!(task.first_dispatch, Some(2));
        assert_eq!(task.completion_time, Some(5));
        assert!(sim.process(1).is_none());
    }

    #[test]
    fn empty_set_is_done_immediately() {
        let mut sim = Sim::from_config(Vec::new(), &fixed(1)).unwrap();
        assert!(sim.is_done());
        assert_eq!(sim.run(), Report::default());
    }

    #[test]
    fn observer_sees_every_step() {
        let mut sim = Sim::from_config(
            vec![ProcessSpec::new(1, 0, 3), ProcessSpec::new(2, 0, 3)],
            &fixed(1),
        )
        .unwrap();
        let mut steps = 0;
        while !sim.is_done() {
            sim.step();
            steps += 1;
        }
        assert_eq!(sim.core.observer().steps(), steps);
    }

    #[test]
    fn overflowing_trace_is_refused_before_running() {
        let procs = vec![ProcessSpec::new(1, u64::MAX - 1, 5)];
        assert!(matches!(
            Sim::from_config(procs.clone(), &fixed(10)),
            Err(ConfigError::ClockOverflow)
        ));
        assert_eq!(simulate(procs, &fixed(10)), Err(ConfigError::ClockOverflow));
    }
}
