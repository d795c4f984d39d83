//! # valadata-pipeline
//!
//! The batch driver. For each target entity it runs the engine
//! (normalize → resolve → energy → tags) and writes the records through a
//! [`ScoreStore`](valadata_core::traits::ScoreStore). A failing entity is
//! counted and reported; it never aborts the batch.

pub mod driver;
pub mod provider;
pub mod report;
pub mod request;
pub mod snapshot;

pub use driver::BatchDriver;
pub use provider::{EntityProvider, InMemoryProvider};
pub use report::{BatchReport, EntityFailure};
pub use request::{BatchMode, BatchRequest, BatchTarget};
pub use snapshot::EntitySnapshot;
