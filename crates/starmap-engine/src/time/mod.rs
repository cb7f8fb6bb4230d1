//! Time subsystem.
//!
//! Lap timing for render passes. Intended usage:
//! - one `Stopwatch` per tile render
//! - call `lap(name)` after each pass; read `laps()` or log them at the end

mod stopwatch;

pub use stopwatch::{Lap, Stopwatch};
