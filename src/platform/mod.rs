//! Platform abstraction layer
//!
//! Translates native window events into simulation input.

pub mod input;

pub use input::{InputState, Key, map_key};
