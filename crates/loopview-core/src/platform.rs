//! Platform abstraction consumed by runtime crates.

/// Source of monotonic time.
///
/// The widget core never reads a clock (the countdown is tick-driven);
/// this seam exists so runtime crates can account for elapsed time without
/// binding the core to `std::time`.
pub trait Clock {
    type Instant: Copy;

    fn now(&self) -> Self::Instant;

    fn elapsed_millis(&self, since: Self::Instant) -> u64;
}
