//! Building blocks which keep a route graph schedule consistent and evaluate it.

pub mod assignability;
pub mod features;
pub mod schedule_update;
