//! SyncEngine for keeping project artifacts in step with the unit graph
//!
//! This module provides:
//! - **full sync**: regenerate the solution and every unit's project
//! - **incremental sync**: decide from a changed file set whether anything
//!   needs regenerating, and regenerate only the implicated units
//! - **report**: what each pass wrote, skipped and failed on

mod engine;
mod report;

pub use engine::SyncEngine;
pub use report::SyncReport;
