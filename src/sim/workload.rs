use rand::prelude::*;

use super::process::ProcessSpec;
use crate::core::Ticks;

/// Synthetic process table: on each of `ticks` ticks a process arrives with
/// probability `p_arrival`, and is short with probability `p_short`.
/// The same seed always yields the same trace.
///
/// Pids count up from 1 in arrival order, matching the numbering of
/// hand-written tables fed to [`crate::trace::parse_process_table`], so a
/// generated trace prints the same way as a loaded one.
pub fn bernoulli_processes(
    ticks: Ticks,
    p_arrival: f64,
    p_short: f64,
    short_burst: Ticks,
    long_burst: Ticks,
    seed: u64,
) -> Vec<ProcessSpec> {
    debug_assert!(short_burst > 0 && long_burst > 0, "Bursts must be positive");

    let mut rng = StdRng::seed_from_u64(seed);
    let mut procs = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let burst_time = if rng.random::<f64>() < p_short {
                short_burst
            } else {
                long_burst
            };

            procs.push(ProcessSpec {
                pid: procs.len() as u64 + 1,
                arrival_time: t,
                burst_time,
            });
        }
    }

    procs
}
