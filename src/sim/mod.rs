pub mod config;
pub mod driver;
pub mod process;
pub mod stats;
pub mod workload;

pub use config::{DEFAULT_SWITCH_COST, SimConfig};
pub use driver::{Sim, simulate};
pub use process::ProcessSpec;
pub use stats::{Report, Summary};
pub use workload::bernoulli_processes;
