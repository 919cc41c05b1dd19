//! Debris tracking core: Keplerian orbit propagation and conjunction screening.
//!
//! The [`propagation`] module turns element sets into trajectories, the
//! [`conjunction`] module compares trajectories and current states to produce
//! alerts. Both are synchronous and side-effect free; [`catalog`] and
//! [`monitor`] are the thin caller layer used by the CLI.

pub mod catalog;
pub mod config;
pub mod conjunction;
pub mod monitor;
pub mod object;
pub mod propagation;
