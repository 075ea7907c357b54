//! sensorwin Processing — derived signals over sample windows.
//!
//! Analyzes windowed sample data to produce downstream control values:
//! - **Motion gain:** velocity-dependent amplification that damps slow
//!   jitter and boosts deliberate movement
//! - **Window statistics:** per-component mean/min/max over a window
//!
//! This crate is pure computation — no I/O, no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod motion;
pub mod stats;

pub use motion::{MotionAmplifier, MotionGainConfig};
pub use stats::WindowStats;
