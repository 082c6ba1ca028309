//! CLI Interface: keystroke capture and terminal rendering
//!
//! # Components
//! - `input.rs`: crossterm keystroke capture and QWERTY physical-key mapping
//! - `display.rs`: lesson rendering, live metrics, unlock celebration

pub mod display;
pub mod input;
