//! # Pulse
//!
//! Terminal toolkit around the Euclidean rhythm engine in `pulse-core`:
//! an interpreter for the pattern language, a REPL with file watching, and
//! a small CLI for one-off renders and queries.
//!
//! ## Modules
//!
//! - `interpreter`: evaluates pattern-language programs against named
//!   bindings.
//! - `commands`: REPL command registry (`query`, `load`, `watch`, ...).
//! - `repl`: the interactive loop and script watcher.
//! - `display`: colored rendering and display settings.

pub mod commands;
pub mod display;
pub mod interpreter;
pub mod repl;

pub use crate::display::DisplayConfig;
pub use crate::interpreter::{Interpreter, Value};
pub use pulse_core::{query, render, Rhythm, RhythmError};
