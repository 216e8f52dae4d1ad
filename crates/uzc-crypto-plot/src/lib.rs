//! # UZC Crypto Plot
//!
//! Proof-of-capacity calculations: which scoop a block reads, what a plot
//! holds there, and how long its owner must wait before forging.
//!
//! ## Key Types
//!
//! - [`MiningPlot`] - 256 KiB of deterministic plot data for `(account, nonce)`
//! - [`Scoop`] - Index of a 64-byte slice, always below 4096
//! - [`PocVersion`] - Plot layout, PoC1 or PoC2
//! - [`DeadlineSearch`] - Best deadline over a nonce range, sequential or on
//!   tokio's blocking pool
//!
//! All functions except [`DeadlineSearch::search_parallel`] are synchronous
//! and pure.

pub mod calculator;
pub mod error;
pub mod plot;
pub mod search;
pub mod types;

pub use calculator::{
    deadline, deadline_from_hit, generation_signature, hit, hit_from_scoop_data, plot_data, scoop,
};
pub use error::{PlotError, Result};
pub use plot::MiningPlot;
pub use search::{BestDeadline, DeadlineSearch, SearchConfig};
pub use types::{GenerationSignature, PocVersion, Scoop, PLOT_SIZE, SCOOPS_PER_PLOT, SCOOP_SIZE};
