//! Platform abstraction traits for the GUI runtime.
//!
//! The engine never reads the system clock itself; the host measures frame
//! time through a [`Clock`] and hands it over inside the frame's input.

/// Provides timing information for the runtime.
pub trait Clock {
    /// Instant type produced by this clock implementation.
    type Instant: Copy;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;

    /// Returns the number of seconds elapsed since `since`.
    fn elapsed_seconds(&self, since: Self::Instant) -> f32;
}
