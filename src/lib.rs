// src/lib.rs
//! Core engine for the Berichtsheft training report journal.
//!
//! Azubis log one Nachweis per reporting period; the period length follows
//! the profile's interval (daily, weekly or monthly). This crate computes
//! which period is currently open and which past periods have no report
//! yet, from caller-supplied in-memory data only: no clock reads, no
//! storage, no framework types.
//!
//! The binary in `main.rs` is the thin collaborator around the engine; the
//! engine itself lives in [`calendar`], [`schedule`], [`coverage`] and
//! [`nachweis`].

pub mod calendar;
pub mod coverage;
pub mod nachweis;
pub mod schedule;


pub use coverage::{current_period, current_period_bounds, missing_periods};
pub use nachweis::{covered_periods, Nachweis, NachweisSeed};
pub use schedule::{ParseIntervalError, ReportingInterval, ReportingPeriod, TrainingProfile};
