use super::{MIN_QUANTUM, QuantumPolicy, SchedCtx, Ticks};

/// Median of `samples`, rounding a half-integer mean to the nearest even
/// value. Never below [`MIN_QUANTUM`]; an empty slice yields it directly.
///
/// `samples` is sorted in place.
pub fn median_quantum(samples: &mut [Ticks]) -> Ticks {
    if samples.is_empty() {
        return MIN_QUANTUM;
    }

    samples.sort_unstable();
    let mid = samples.len() / 2;
    let median = if samples.len() % 2 == 1 {
        samples[mid]
    } else {
        midpoint_half_even(samples[mid - 1], samples[mid])
    };

    median.max(MIN_QUANTUM)
}

// Mean of two sorted values without overflow. An odd span leaves exactly one
// half over `floor`, so the tie goes to whichever neighbour is even.
fn midpoint_half_even(low: Ticks, high: Ticks) -> Ticks {
    let span = high - low;
    let floor = low + span / 2;
    if span % 2 == 0 || floor % 2 == 0 {
        floor
    } else {
        floor + 1
    }
}

/// Adaptive quantum recomputed on every dispatch from the ready queue.
#[derive(Debug, Default)]
pub struct MedianQuantum {
    // Reused between dispatches
    samples: Vec<Ticks>,
}

impl MedianQuantum {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QuantumPolicy for MedianQuantum {
    fn quantum(&mut self, ctx: &SchedCtx) -> Ticks {
        self.samples.clear();
        self.samples
            .extend(ctx.ready.iter().map(|key| ctx.process(key).cpu_time));
        median_quantum(&mut self.samples)
    }
}
