use rr_model::{
    Pid, ProcessSpec, QuantumMode, Report, Sim, SimConfig, SimEvent, Ticks,
    core::TimedEvent,
    quantum::AnyQuantum,
    sim::bernoulli_processes,
    simulate,
    trace::parse_process_table,
};

fn fixed(quantum: Ticks) -> SimConfig {
    SimConfig::new(QuantumMode::fixed(quantum).unwrap())
}

fn run_logged(procs: Vec<ProcessSpec>, config: &SimConfig) -> (Sim<AnyQuantum>, Vec<TimedEvent>) {
    let mut sim = Sim::from_config(procs, config).unwrap();
    let mut log = Vec::new();
    while !sim.is_done() {
        log.extend(sim.step());
    }
    (sim, log)
}

// (start, pid, run_length) for every slice that ran
fn slices(log: &[TimedEvent]) -> Vec<(Ticks, Pid, Ticks)> {
    log.iter()
        .filter_map(|(at, event)| match event {
            SimEvent::Ran {
                pid, run_length, ..
            } => Some((*at, *pid, *run_length)),
            _ => None,
        })
        .collect()
}

fn assert_consistent(sim: &Sim<AnyQuantum>, report: &Report) {
    let mut wait_sum = 0;
    let mut response_sum = 0;
    for task in sim.processes() {
        let completion = task.completion_time.expect("process never completed");
        let first = task.first_dispatch.expect("process never dispatched");
        assert_eq!(task.cpu_time, task.burst_time);
        assert!(completion >= task.arrival_time + task.burst_time);
        assert!(first >= task.arrival_time);
        assert_eq!(
            task.wait_time(),
            Some(completion - task.arrival_time - task.burst_time)
        );
        assert_eq!(task.response_time(), Some(first - task.arrival_time));
        wait_sum += task.wait_time().unwrap();
        response_sum += task.response_time().unwrap();
    }
    assert_eq!(report.total_wait_time, wait_sum);
    assert_eq!(report.total_response_time, response_sum);
    assert_eq!(report.process_count, sim.processes().count());
}

#[test]
fn single_process_runs_in_quantum_slices() {
    let (sim, log) = run_logged(vec![ProcessSpec::new(1, 0, 5)], &fixed(2));

    assert_eq!(slices(&log), vec![(0, 1, 2), (2, 1, 2), (4, 1, 1)]);
    assert!(
        !log.iter()
            .any(|(_, e)| matches!(e, SimEvent::ContextSwitch { .. }))
    );

    let task = sim.process(1).unwrap();
    assert_eq!(task.completion_time, Some(5));
    assert_eq!(task.wait_time(), Some(0));
    assert_eq!(task.response_time(), Some(0));
    assert_eq!(
        sim.report(),
        Report {
            total_wait_time: 0,
            total_response_time: 0,
            process_count: 1,
        }
    );
}

#[test]
fn two_processes_alternate_with_switch_cost() {
    let procs = vec![ProcessSpec::new(1, 0, 4), ProcessSpec::new(2, 0, 4)];
    let (sim, log) = run_logged(procs, &fixed(2));

    assert_eq!(
        slices(&log),
        vec![(0, 1, 2), (3, 2, 2), (6, 1, 2), (9, 2, 2)]
    );
    assert_eq!(sim.process(1).unwrap().completion_time, Some(8));
    assert_eq!(sim.process(2).unwrap().completion_time, Some(11));

    let report = sim.report();
    assert_eq!(report.total_wait_time, 4 + 7);
    assert_eq!(report.total_response_time, 3);
    assert_eq!(report.average_wait_time(), 5.5);
    assert_eq!(report.average_response_time(), 1.5);
    assert_consistent(&sim, &report);
}

#[test]
fn idle_gap_jumps_without_switch_cost() {
    let procs = vec![ProcessSpec::new(1, 0, 2), ProcessSpec::new(2, 10, 3)];
    let (sim, log) = run_logged(procs, &fixed(4));

    assert!(log.contains(&(2, SimEvent::IdleJump { to: 10 })));
    assert!(
        !log.iter()
            .any(|(_, e)| matches!(e, SimEvent::ContextSwitch { .. }))
    );
    assert_eq!(slices(&log), vec![(0, 1, 2), (10, 2, 3)]);

    let late = sim.process(2).unwrap();
    assert_eq!(late.first_dispatch, Some(10));
    assert_eq!(late.completion_time, Some(13));
    assert_eq!(sim.report().total_wait_time, 0);
    assert_eq!(sim.report().total_response_time, 0);
}

#[test]
fn finished_process_still_charges_switch_to_successor() {
    let procs = vec![ProcessSpec::new(1, 0, 1), ProcessSpec::new(2, 0, 1)];
    let (sim, log) = run_logged(procs, &fixed(3));

    assert!(log.contains(&(
        1,
        SimEvent::ContextSwitch {
            from: 1,
            to: 2,
            cost: 1
        }
    )));
    assert_eq!(sim.process(2).unwrap().first_dispatch, Some(2));
    assert_eq!(sim.process(2).unwrap().completion_time, Some(3));
}

#[test]
fn arrivals_during_a_slice_queue_ahead_of_the_rotated_process() {
    // pid 2 arrives while pid 1 runs, so it goes first after the rotation.
    let procs = vec![ProcessSpec::new(1, 0, 4), ProcessSpec::new(2, 1, 2)];
    let (_, log) = run_logged(procs, &fixed(2));

    assert_eq!(slices(&log), vec![(0, 1, 2), (3, 2, 2), (6, 1, 2)]);
}

#[test]
fn arrival_exactly_at_slice_end_is_admitted_first() {
    let procs = vec![ProcessSpec::new(1, 0, 4), ProcessSpec::new(2, 2, 1)];
    let (sim, log) = run_logged(procs, &fixed(2));

    assert_eq!(slices(&log), vec![(0, 1, 2), (3, 2, 1), (5, 1, 2)]);
    assert_eq!(sim.process(2).unwrap().response_time(), Some(1));
}

#[test]
fn zero_switch_cost_keeps_clock_tight() {
    let procs = vec![ProcessSpec::new(1, 0, 4), ProcessSpec::new(2, 0, 4)];
    let (sim, log) = run_logged(procs, &fixed(2).with_switch_cost(0));

    assert_eq!(
        slices(&log),
        vec![(0, 1, 2), (2, 2, 2), (4, 1, 2), (6, 2, 2)]
    );
    assert_eq!(sim.now(), 8);
}

#[test]
fn median_quantum_follows_queue() {
    let procs = vec![
        ProcessSpec::new(1, 0, 3),
        ProcessSpec::new(2, 0, 3),
        ProcessSpec::new(3, 0, 3),
    ];
    let (sim, log) = run_logged(procs, &SimConfig::new(QuantumMode::Median));

    let quanta: Vec<(Pid, Ticks)> = log
        .iter()
        .filter_map(|(_, event)| match event {
            SimEvent::Ran { pid, quantum, .. } => Some((*pid, *quantum)),
            _ => None,
        })
        .collect();
    // [0,0,0] -> 1, [0,0,1] -> 0 -> 1, [0,1,1] -> 1, then [1,1,1] -> 1,
    // [1,1,2] -> 1, [1,2,2] -> 2 finishing pid 3, then [2,2] and [2] -> 2.
    assert_eq!(
        quanta,
        vec![(1, 1), (2, 1), (3, 1), (1, 1), (2, 1), (3, 2), (1, 2), (2, 2)]
    );

    let report = sim.report();
    assert_consistent(&sim, &report);
}

#[test]
fn fixed_quantum_runs_are_deterministic() {
    let procs = bernoulli_processes(400, 0.35, 0.4, 2, 7, 21);
    let config = fixed(3);

    let (a, log_a) = run_logged(procs.clone(), &config);
    let (b, log_b) = run_logged(procs, &config);

    assert_eq!(log_a, log_b);
    assert_eq!(a.report(), b.report());
}

#[test]
fn totals_match_per_process_values() {
    for seed in 0..8 {
        let procs = bernoulli_processes(200, 0.3, 0.3, 2, 6, seed);
        if procs.is_empty() {
            continue;
        }

        for config in [fixed(1), fixed(4), SimConfig::new(QuantumMode::Median)] {
            let mut sim = Sim::from_config(procs.clone(), &config).unwrap();
            let report = sim.run();
            assert_consistent(&sim, &report);
        }
    }
}

#[test]
fn simulate_matches_stepping() {
    let procs = bernoulli_processes(150, 0.5, 0.5, 1, 5, 4);
    let config = SimConfig::new(QuantumMode::Median);

    let (sim, _) = run_logged(procs.clone(), &config);
    assert_eq!(simulate(procs, &config), Ok(sim.report()));
}

#[test]
fn loaded_table_end_to_end() {
    let procs = parse_process_table(b"4\n1, 0, 7\n2, 2, 4\n3, 4, 1\n4, 5, 4\n").unwrap();
    let mut sim = Sim::from_config(procs, &fixed(3)).unwrap();
    let report = sim.run();

    assert_consistent(&sim, &report);
    assert_eq!(
        report,
        Report {
            total_wait_time: 49,
            total_response_time: 19,
            process_count: 4,
        }
    );
    // Completions 21, 19, 13 and 23; first runs at 0, 4, 12 and 14.
    let completions: Vec<Option<Ticks>> = sim.processes().map(|p| p.completion_time).collect();
    assert_eq!(completions, vec![Some(21), Some(19), Some(13), Some(23)]);
    assert_eq!(
        report.to_string(),
        "Average wait time: 12.25\nAverage response time: 4.75"
    );
}

#[test]
fn oversized_table_is_a_config_error() {
    let procs = parse_process_table(b"1\n1 18446744073709551614 5\n").unwrap();
    let err = simulate(procs, &fixed(10)).unwrap_err();
    assert_eq!(err, rr_model::ConfigError::ClockOverflow);
}
