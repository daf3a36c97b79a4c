//! Deterministic simulation harness for Pairlink game testing.
//!
//! Seeded, virtual-time implementations of the Environment and Driver
//! abstractions plus an in-memory lossy link, for deterministic and
//! reproducible testing of full games under message loss.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all execution paths,
//! not specific scenarios. Use [`InvariantRegistry::standard()`] for the
//! common session invariants.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod scenario;
pub mod sim_driver;
pub mod sim_env;
pub mod sim_link;

pub use invariants::{
    InvariantRegistry, PairInvariant, SessionInvariant, SessionSnapshot, Violation,
};
pub use scenario::TwoPlayerGame;
pub use sim_driver::{SimDriver, SimDriverError, SimState, new_sim_driver};
pub use sim_env::SimEnv;
pub use sim_link::{End, LossyLink};
