//! Wall-clock time source
//!
//! The scheduler reads the time of day from a [`TimeSource`] once per tick.
//! Boards with a battery-backed RTC implement the trait over their chip
//! driver; [`SoftClock`] keeps time from the monotonic millisecond counter
//! alone and loses it on power-down.

/// Calendar date and time of day
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateTime {
    /// Full year, e.g. 2024
    pub year: u16,
    /// Month, 1..=12
    pub month: u8,
    /// Day of month, 1..=31
    pub day: u8,
    /// Hour, 0..=23
    pub hour: u8,
    /// Minute, 0..=59
    pub minute: u8,
    /// Second, 0..=59
    pub second: u8,
}

impl Default for DateTime {
    fn default() -> Self {
        Self {
            year: 2000,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }
}

impl DateTime {
    /// Build a date-time, clamping the time-of-day fields
    ///
    /// Hours above 23 become 23, minutes and seconds above 59 become 59.
    /// Date fields are taken as given.
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour: hour.min(23),
            minute: minute.min(59),
            second: second.min(59),
        }
    }

    /// Advance by `seconds`, rolling over minutes, hours, days, months and years
    ///
    /// ```
    /// use matrix_informer::DateTime;
    ///
    /// let eve = DateTime::new(2023, 12, 31, 23, 59, 59);
    /// assert_eq!(eve.add_seconds(1), DateTime::new(2024, 1, 1, 0, 0, 0));
    /// ```
    pub fn add_seconds(self, seconds: u32) -> Self {
        let total = self.second as u64
            + self.minute as u64 * 60
            + self.hour as u64 * 3600
            + seconds as u64;
        let of_day = (total % 86_400) as u32;
        let mut days = total / 86_400;

        let mut result = Self {
            hour: (of_day / 3600) as u8,
            minute: (of_day / 60 % 60) as u8,
            second: (of_day % 60) as u8,
            ..self
        };

        while days > 0 {
            let month_days = days_in_month(result.year, result.month);
            if result.day < month_days {
                result.day += 1;
            } else {
                result.day = 1;
                if result.month >= 12 {
                    result.month = 1;
                    result.year = result.year.saturating_add(1);
                } else {
                    result.month += 1;
                }
            }
            days -= 1;
        }
        result
    }
}

/// Whether `year` is a Gregorian leap year
pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`; unknown months count as 31 days
pub fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// Source of wall-clock time
pub trait TimeSource {
    /// Current time, given the monotonic uptime in milliseconds
    fn now(&mut self, uptime_ms: u32) -> DateTime;

    /// Set the current time as of `uptime_ms`
    fn set(&mut self, time: DateTime, uptime_ms: u32);
}

/// Time source driven by the monotonic millisecond counter
///
/// ```
/// use matrix_informer::{DateTime, SoftClock, TimeSource};
///
/// let mut clock = SoftClock::new();
/// clock.set(DateTime::new(2024, 3, 1, 12, 0, 0), 10_000);
/// assert_eq!(clock.now(70_500).minute, 1);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct SoftClock {
    base: DateTime,
    base_ms: u32,
    /// Sub-second remainder carried across re-bases
    carry_ms: u32,
}

impl SoftClock {
    /// Start at 2000-01-01 00:00:00 at uptime 0
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimeSource for SoftClock {
    fn now(&mut self, uptime_ms: u32) -> DateTime {
        let elapsed = uptime_ms
            .wrapping_sub(self.base_ms)
            .saturating_add(self.carry_ms);
        // Re-base every hour so the wrapping counter never laps the base
        if elapsed >= 3_600_000 {
            self.base = self.base.add_seconds(elapsed / 1000);
            self.base_ms = uptime_ms;
            self.carry_ms = elapsed % 1000;
            return self.base;
        }
        self.base.add_seconds(elapsed / 1000)
    }

    fn set(&mut self, time: DateTime, uptime_ms: u32) {
        self.base = time;
        self.base_ms = uptime_ms;
        self.carry_ms = 0;
    }
}
