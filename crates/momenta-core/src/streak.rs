//! Trailing streak calculation over the day window.

use crate::window::DayWindow;

/// Count the unbroken run of completed days at the end of the window.
///
/// Scans from the most recent slot backward and stops at the first
/// incomplete day. The scan deliberately covers the whole window, future
/// slots included: a future day marked complete in stored data extends the
/// streak, matching the original tracker's behavior.
pub fn trailing_streak(window: &DayWindow) -> u32 {
    let mut streak = 0;
    for slot in window.slots().iter().rev() {
        if slot.is_completed {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}
