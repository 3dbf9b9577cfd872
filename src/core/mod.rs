pub mod driver;
pub mod event;
pub mod observer;
pub mod queue;
pub mod state;

pub use driver::SchedCore;
pub use event::{SimEvent, TimedEvent};
pub use queue::ReadyQueue;
pub use state::{Pid, ProcKey, ProcState, Process, SchedCtx, Ticks};
