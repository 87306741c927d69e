//! Pure round logic for Liftyard.
//!
//! This crate contains all warehouse-round logic that is independent of any
//! RNG stream, ECS world, or runtime. Functions take plain data and return
//! results, making them unit-testable and portable across the native engine,
//! headless harness tools, and any future frontend.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`constants`] | Box kinds, shelf zones, slots-per-shelf (u8 IDs) |
//! | [`config`] | Round configuration, clamping, audits, templates |
//! | [`layout`] | Row-to-zone partitioning and derived shelf spacing |
//! | [`score`] | Score breakdown arithmetic and leaderboard records |

pub mod config;
pub mod constants;
pub mod layout;
pub mod score;
