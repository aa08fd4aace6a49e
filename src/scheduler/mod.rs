//! Hourly refresh: trigger timing, cancellable waits, the cycle state machine and atomic publish.

/// Clocks, cancellable waits and signal handling.
pub mod clock;
/// Refresh cycle state machine.
pub mod cycle;
/// Atomic replacement of the published video.
pub mod publish;
/// When the next refresh fires.
pub mod trigger;
