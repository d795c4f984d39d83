//! # valadata-engine
//!
//! The pure core: source normalization, canonical fact resolution, signal
//! extraction, the composite ("energy") score and the derived tag scores.
//!
//! Every function here is synchronous, total and free of I/O. Malformed
//! provider input degrades to absent or neutral output instead of failing.

pub mod energy;
pub mod lexicon;
pub mod normalize;
pub mod resolve;
pub mod signals;
pub mod tags;

pub use energy::{EnergyComponents, EnergyScore};
pub use normalize::{normalize, normalize_all};
pub use resolve::{resolve, resolve_raw, ServiceFactsPayload};
pub use signals::{RawSignals, VenueText};
