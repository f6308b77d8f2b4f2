// src/display/mod.rs
//! Display of decoded frames

pub mod terminal;

pub use terminal::TerminalDisplay;
