//! Euclidean rhythm engine
//!
//! A pipeline of pure integer functions: the cursor is mapped into the
//! pattern (`position`), the rasterized line is sampled around that index
//! (`raster`) and a change in its value marks an onset (`onset`). `query`
//! ties them together behind domain validation; `Rhythm` carries validated
//! parameters for repeated per-tick use.

mod euclid;
mod onset;
mod position;
mod query;
mod raster;
mod render;

#[cfg(test)]
mod tests;

pub use euclid::{Rhythm, RhythmSpec};
pub use onset::is_onset;
pub use position::{floor_mod, map_index};
pub use query::{query, validate};
pub use raster::rasterize;
pub use render::{render, Steps};
