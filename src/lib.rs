//! Cosmic Dodge: a terminal arcade dodger.
//!
//! The crate is split into a pure simulation core (`core`), key handling
//! (`input`), and terminal presentation (`term`). The binary in `main.rs`
//! wires them into a fixed-tick loop.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
