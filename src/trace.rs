//! Process-table loading.
//!
//! A table is a stream of unsigned decimal integers separated by arbitrary
//! non-digit bytes: the process count, then one `pid arrival burst` triple
//! per process. Anything after the last triple is ignored.

use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};

use crate::{quantum::QuantumMode, sim::ProcessSpec};

struct Scanner<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Next run of digits, skipping whatever precedes it.
    fn next_int(&mut self) -> Result<u64> {
        let mut value: Option<u64> = None;

        while let Some(&byte) = self.data.get(self.pos) {
            if byte.is_ascii_digit() {
                let digit = u64::from(byte - b'0');
                let acc = value.unwrap_or(0);
                value = Some(
                    acc.checked_mul(10)
                        .and_then(|acc| acc.checked_add(digit))
                        .ok_or_else(|| anyhow!("integer overflow"))?,
                );
            } else if value.is_some() {
                break;
            }
            self.pos += 1;
        }

        value.ok_or_else(|| anyhow!("missing integer"))
    }
}

pub fn parse_process_table(data: &[u8]) -> Result<Vec<ProcessSpec>> {
    let mut scanner = Scanner::new(data);

    let count = scanner.next_int()?;
    if count == 0 {
        bail!("no processes");
    }

    // The count is untrusted; let the vector grow as rows actually parse.
    let mut procs = Vec::new();
    for _ in 0..count {
        let pid = scanner.next_int()?;
        let arrival_time = scanner.next_int()?;
        let burst_time = scanner.next_int()?;
        if burst_time == 0 {
            bail!("process {pid} has zero burst time");
        }
        procs.push(ProcessSpec::new(pid, arrival_time, burst_time));
    }

    Ok(procs)
}

pub fn load_process_table(path: impl AsRef<Path>) -> Result<Vec<ProcessSpec>> {
    let path = path.as_ref();
    let data = std::fs::read(path).with_context(|| format!("{}: failed to read", path.display()))?;
    parse_process_table(&data).with_context(|| format!("{}: invalid process table", path.display()))
}

/// `"median"` selects the adaptive quantum; otherwise the first integer in
/// `arg` is the fixed quantum.
pub fn parse_quantum(arg: &str) -> Result<QuantumMode> {
    if arg == "median" {
        return Ok(QuantumMode::Median);
    }

    let quantum = Scanner::new(arg.as_bytes()).next_int()?;
    Ok(QuantumMode::fixed(quantum)?)
}
