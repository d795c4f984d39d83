//! Trait seams between the pure engine and its collaborators.

pub mod cancellation;
pub mod score_store;

pub use cancellation::{Cancellable, CancellationToken};
pub use score_store::ScoreStore;
