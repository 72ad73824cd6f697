//! Input handling for the orrery: pointer drag/zoom accumulation and the
//! small fixed key map (focus selection, quit).

mod bindings;
mod pointer;

pub use bindings::{KeyCommand, command_for_key};
pub use pointer::PointerState;
