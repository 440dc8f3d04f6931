//! Expiring timers over a wrapping millisecond counter

/// One-shot deadline
///
/// [`arm`](Self::arm) only records the duration; the countdown starts at the
/// first [`expired`](Self::expired) check, so arming from a command handler
/// that has no notion of the current time still yields the full duration.
/// Arithmetic wraps, so a `u32` millisecond counter rolling over is harmless.
///
/// ```
/// use matrix_informer::Deadline;
///
/// let mut deadline = Deadline::new();
/// deadline.arm(1_000);
/// assert!(!deadline.expired(u32::MAX - 100));
/// assert!(!deadline.expired(800));
/// assert!(deadline.expired(900));
/// assert!(!deadline.is_armed());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Deadline {
    duration_ms: Option<u32>,
    started_ms: Option<u32>,
}

impl Deadline {
    /// Create a disarmed deadline
    pub const fn new() -> Self {
        Self {
            duration_ms: None,
            started_ms: None,
        }
    }

    /// Arm (or re-arm) for `duration_ms`, restarting the countdown
    pub fn arm(&mut self, duration_ms: u32) {
        self.duration_ms = Some(duration_ms);
        self.started_ms = None;
    }

    /// Cancel the deadline
    pub fn disarm(&mut self) {
        self.duration_ms = None;
        self.started_ms = None;
    }

    /// Whether the deadline is armed
    pub fn is_armed(&self) -> bool {
        self.duration_ms.is_some()
    }

    /// Check the deadline at `now_ms`
    ///
    /// Returns `true` exactly once when the duration has elapsed, disarming
    /// the deadline. A disarmed deadline never expires.
    pub fn expired(&mut self, now_ms: u32) -> bool {
        let Some(duration) = self.duration_ms else {
            return false;
        };
        let started = *self.started_ms.get_or_insert(now_ms);
        if now_ms.wrapping_sub(started) >= duration {
            self.disarm();
            true
        } else {
            false
        }
    }
}
