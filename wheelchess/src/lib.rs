//! Cursor-driven chess for a device with four direction switches, a centre
//! confirm switch and a bitmap display.
//!
//! The rules live in the `chess` crate. This crate turns button presses into
//! moves through the [`controller::Controller`] and tells a
//! [`render::RenderSink`] which parts of the screen changed.

pub mod config;
pub mod controller;
pub mod input;
pub mod render;
pub mod script;
pub mod terminal;

pub use controller::{Controller, Selection};
pub use input::{Button, InputSource, PressFlags, Presses, ScriptedInput};
pub use render::{Highlight, RecordingSink, Redraw, Region, RenderSink, TileView};
pub use script::{load_script, parse_script, ScriptError};
