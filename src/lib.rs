//! Pseudo-3D Racing Library
//!
//! A scanline-perspective racing simulation that can run headless or with a Bevy UI.

pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;
