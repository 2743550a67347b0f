//! Widget constants.
//!
//! These are fixed configuration, not runtime-tunable knobs: hosts that
//! need different timing construct the widget with their own values.

use std::time::Duration;

/// Ticks between automatic page advances. One tick is one period of the
/// host's interval timer (one second under `loopview-runtime-std`).
pub const AUTO_ADVANCE_TICKS: u32 = 5;

/// Period of the host's interval timer.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Suggested duration for the animated offset move after a drag settles.
/// Advisory: the viewport capability owns the actual animation.
pub const SETTLE_ANIMATION: Duration = Duration::from_millis(250);
