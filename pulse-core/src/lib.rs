//! # Pulse Core
//!
//! WASM-compatible core of the pulse sequencer: the Euclidean rhythm engine
//! and the front end of the pattern language. No audio, MIDI, clock or I/O.
//!
//! ## Features
//!
//! - **serde**: (de)serialize rhythms; deserialized rhythms are validated
//! - **wasm**: JavaScript bindings via wasm-bindgen
//!
//! ## Example
//!
//! ```
//! use pulse_core::Rhythm;
//!
//! let tresillo = Rhythm::new(3, 8)?;
//! assert_eq!(tresillo.to_string(), "x..x..x.");
//! assert!(tresillo.is_hit(3));
//! # Ok::<(), pulse_core::RhythmError>(())
//! ```

pub mod error;
pub mod parser;
pub mod rhythm;
pub mod time;
pub mod wasm;

pub use error::{RhythmError, Violation};
pub use rhythm::{query, render, Rhythm, RhythmSpec};
pub use time::Time;
