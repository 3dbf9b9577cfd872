use std::fmt;

use average::{Estimate, Max, Mean};

use crate::core::{Process, Ticks};

/// Aggregate outcome of a simulation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Report {
    pub total_wait_time: Ticks,
    pub total_response_time: Ticks,
    pub process_count: usize,
}

impl Report {
    pub fn average_wait_time(&self) -> f64 {
        average_of(self.total_wait_time, self.process_count)
    }

    pub fn average_response_time(&self) -> f64 {
        average_of(self.total_response_time, self.process_count)
    }
}

fn average_of(total: Ticks, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    total as f64 / count as f64
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average wait time: {:.2}", self.average_wait_time())?;
        write!(f, "Average response time: {:.2}", self.average_response_time())
    }
}

/// Per-process distribution of wait and response times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean_wait_time: f64,
    pub max_wait_time: f64,
    pub mean_response_time: f64,
    pub max_response_time: f64,
}

impl Summary {
    /// Only processes whose values are known contribute.
    pub fn from_processes<'a>(procs: impl IntoIterator<Item = &'a Process>) -> Self {
        let mut wait_mean = Mean::new();
        let mut wait_max = Max::new();
        let mut response_mean = Mean::new();
        let mut response_max = Max::new();

        for task in procs {
            if let Some(wait) = task.wait_time() {
                wait_mean.add(wait as f64);
                wait_max.add(wait as f64);
            }
            if let Some(response) = task.response_time() {
                response_mean.add(response as f64);
                response_max.add(response as f64);
            }
        }

        Self {
            mean_wait_time: unless_empty(wait_mean.mean(), wait_mean.is_empty()),
            max_wait_time: unless_empty(wait_max.max(), wait_mean.is_empty()),
            mean_response_time: unless_empty(response_mean.mean(), response_mean.is_empty()),
            max_response_time: unless_empty(response_max.max(), response_mean.is_empty()),
        }
    }
}

fn unless_empty(value: f64, empty: bool) -> f64 {
    if empty { 0.0 } else { value }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Longest wait time: {:.0}", self.max_wait_time)?;
        write!(f, "Longest response time: {:.0}", self.max_response_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ProcState;

    #[test]
    fn averages_divide_by_count() {
        let report = Report {
            total_wait_time: 11,
            total_response_time: 3,
            process_count: 2,
        };
        assert_eq!(report.average_wait_time(), 5.5);
        assert_eq!(report.average_response_time(), 1.5);
        assert_eq!(
            report.to_string(),
            "Average wait time: 5.50\nAverage response time: 1.50"
        );
    }

    fn finished(pid: u64, arrival: Ticks, burst: Ticks, first: Ticks, done: Ticks) -> Process {
        Process {
            pid,
            state: ProcState::Finished,
            arrival_time: arrival,
            burst_time: burst,
            cpu_time: burst,
            first_dispatch: Some(first),
            completion_time: Some(done),
        }
    }

    #[test]
    fn summary_tracks_mean_and_max() {
        let mut running = finished(3, 2, 3, 6, 0);
        running.state = ProcState::Running;
        running.cpu_time = 1;
        running.completion_time = None;

        // waits 3 and 2; responses 0, 2 and 4
        let procs = [finished(1, 0, 2, 0, 5), finished(2, 1, 1, 3, 4), running];
        let summary = Summary::from_processes(&procs);

        assert_eq!(summary.mean_wait_time, 2.5);
        assert_eq!(summary.max_wait_time, 3.0);
        assert_eq!(summary.mean_response_time, 2.0);
        assert_eq!(summary.max_response_time, 4.0);
        assert_eq!(
            summary.to_string(),
            "Longest wait time: 3\nLongest response time: 4"
        );
    }

    #[test]
    fn empty_summary_is_zero() {
        let summary = Summary::from_processes(std::iter::empty());
        assert_eq!(
            summary,
            Summary {
                mean_wait_time: 0.0,
                max_wait_time: 0.0,
                mean_response_time: 0.0,
                max_response_time: 0.0,
            }
        );
        assert_eq!(
            summary.to_string(),
            "Longest wait time: 0\nLongest response time: 0"
        );
    }

    #[test]
    fn empty_report_averages_to_zero() {
        let report = Report::default();
        assert_eq!(report.average_wait_time(), 0.0);
        assert_eq!(report.average_response_time(), 0.0);
    }
}
