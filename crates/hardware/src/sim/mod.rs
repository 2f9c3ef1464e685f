//! Trace sources and the replay driver.
//!
//! Provides the access streams fed to the cache (synthetic or read from a
//! text file) and the [`Simulator`](simulator::Simulator) that replays them.

pub mod simulator;
pub mod trace;

pub use simulator::Simulator;
pub use trace::{MemAccess, SyntheticTrace, TextTrace, TraceError};
