//! SQL for the score tables. Every write is a single upsert statement.

pub mod composite;
pub mod tags;
