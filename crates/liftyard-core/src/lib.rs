//! Liftyard Core - Warehouse Training Round Engine
//!
//! Drives one round of a warehouse-logistics training exercise: a
//! procedurally generated shelf floor is seeded with boxes under configurable
//! rules, a job is derived, and trainee progress is tracked as an
//! externally-driven vehicle carries boxes between zones.
//!
//! # Architecture
//!
//! Generated structure lives in a `hecs` ECS world:
//! - **Entities**: shelf rows, placed boxes
//! - **Components**: Pure data attached to entities (ShelfRow, BoxItem, SlotRef)
//! - The engine owns the world plus the per-round bookkeeping (job set,
//!   correctness tracker, clock, odometer)
//!
//! Vehicle physics, telemetry transport, and rendering are external
//! collaborators: they feed zone-entry events, distance, and ticks in, and
//! read state out.
//!
//! # Example
//!
//! ```rust,no_run
//! use liftyard_core::prelude::*;
//! use liftyard_logic::config::RoundConfig;
//!
//! let mut engine = RoundEngine::new();
//!
//! // Build a floor and derive the job
//! engine.generate(RoundConfig::default());
//!
//! // Fixed-step loop driven by the host
//! loop {
//!     engine.tick(1.0 / 50.0);
//!     if engine.phase() == RoundPhase::Finished {
//!         break;
//!     }
//! }
//! let (breakdown, record) = engine.finalize("Trainee");
//! ```

pub mod components;
pub mod engine;
pub mod generation;
pub mod job;
pub mod leaderboard;
pub mod verifier;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::RoundEngine;
    pub use crate::verifier::{EntryOutcome, RoundPhase, ZoneEntry};
}
