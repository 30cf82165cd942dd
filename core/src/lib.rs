//! covbench core: bounded execution of test-generation tools and
//! coverage-based classification of what they produce.
//!
//! The two load-bearing pieces are [`runner`] (spawn one process, pump
//! its streams, enforce a wall-clock budget, kill the whole process
//! group on overrun) and [`coverage`] (paint per-line statuses over
//! method ranges and classify against a required percentage). The
//! [`engine`] folds both into per-snippet evaluation records.

pub mod api;
pub mod config;
pub mod context;
pub mod coverage;
pub mod engine;
pub mod error;
pub mod runner;
pub mod tool;
pub mod util;
