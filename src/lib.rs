pub mod core;
pub mod quantum;
pub mod sim;
pub mod trace;

pub use crate::core::{Pid, Process, SimEvent, Ticks};
pub use quantum::{ConfigError, QuantumMode, QuantumPolicy};
pub use sim::{ProcessSpec, Report, Sim, SimConfig, simulate};
