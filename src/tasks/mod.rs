//! Background Tasks
//!
//! Maintenance tasks for the in-process store engine.

mod reaper;

pub use reaper::spawn_reaper_task;
